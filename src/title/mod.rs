//! Title parsing: raw video title -> artist and song.
//!
//! Two strategies:
//! - pattern matching over common title layouts (always available)
//! - AI-assisted extraction through a chat-completion service (needs an API key)
//!
//! [`TitleParser`] applies the configured precedence between them.

pub mod ai;
pub mod pattern;

use crate::config::{MissingCredential, ParseStrategy, ParserConfig};
use crate::credential::ApiCredential;
use ai::AiTitleParser;
use std::fmt;

/// Artist and song inferred from a video title. Both fields are trimmed and
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongIdentity {
    pub artist: String,
    pub song: String,
}

impl SongIdentity {
    pub fn new(artist: &str, song: &str) -> Option<Self> {
        let artist = artist.trim();
        let song = song.trim();
        if artist.is_empty() || song.is_empty() {
            return None;
        }
        Some(Self {
            artist: artist.to_string(),
            song: song.to_string(),
        })
    }
}

impl fmt::Display for SongIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.song)
    }
}

/// Which strategy produced an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseSource {
    Ai,
    Patterns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Identified { song: SongIdentity, source: ParseSource },
    NotIdentified,
    /// AI parsing is mandatory but no API key is stored.
    CredentialRequired,
}

#[derive(Debug, Clone)]
pub struct TitleParser {
    strategy: ParseStrategy,
    fallback_to_patterns: bool,
    on_missing_credential: MissingCredential,
    ai: Option<AiTitleParser>,
}

impl TitleParser {
    pub fn from_config(cfg: &ParserConfig) -> anyhow::Result<Self> {
        let ai = match cfg.strategy {
            ParseStrategy::Assisted => Some(AiTitleParser::new(&cfg.ai)?),
            ParseStrategy::Patterns => None,
        };
        Ok(Self {
            strategy: cfg.strategy,
            fallback_to_patterns: cfg.fallback_to_patterns,
            on_missing_credential: cfg.on_missing_credential,
            ai,
        })
    }

    /// Parser that only uses the built-in patterns.
    #[cfg(test)]
    pub fn patterns_only() -> Self {
        Self {
            strategy: ParseStrategy::Patterns,
            fallback_to_patterns: true,
            on_missing_credential: MissingCredential::Patterns,
            ai: None,
        }
    }

    pub async fn parse(&self, title: &str, credential: Option<&ApiCredential>) -> ParseOutcome {
        let ai = match (self.strategy, &self.ai) {
            (ParseStrategy::Assisted, Some(ai)) => ai,
            _ => return Self::by_patterns(title),
        };

        let Some(credential) = credential else {
            return match self.on_missing_credential {
                MissingCredential::Patterns => {
                    tracing::debug!("no API key stored, using title patterns");
                    Self::by_patterns(title)
                }
                MissingCredential::Require => ParseOutcome::CredentialRequired,
            };
        };

        if let Some(song) = ai.identify(title, credential).await {
            return ParseOutcome::Identified {
                song,
                source: ParseSource::Ai,
            };
        }

        if self.fallback_to_patterns {
            tracing::debug!("AI parser came back empty, falling back to title patterns");
            Self::by_patterns(title)
        } else {
            ParseOutcome::NotIdentified
        }
    }

    fn by_patterns(title: &str) -> ParseOutcome {
        match pattern::parse(title) {
            Some(song) => ParseOutcome::Identified {
                song,
                source: ParseSource::Patterns,
            },
            None => ParseOutcome::NotIdentified,
        }
    }
}
