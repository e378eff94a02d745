//! Title -> song identity -> lyrics.

pub mod token;

use crate::config::Config;
use crate::credential::ApiCredential;
use crate::lyrics::LyricsBackend;
use crate::title::{ParseOutcome, SongIdentity, TitleParser};

pub use token::{RequestToken, RequestTokens};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found { song: SongIdentity, lyrics: String },
    LyricsNotFound { song: SongIdentity },
    SongNotIdentified,
    CredentialRequired,
}

impl LookupOutcome {
    /// Notification shown to the user, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            LookupOutcome::Found { .. } => None,
            LookupOutcome::LyricsNotFound { .. } => Some("Lyrics not found"),
            LookupOutcome::SongNotIdentified => Some("Could not determine song from the video title"),
            LookupOutcome::CredentialRequired => Some("API key required: run `key <your key>`"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    parser: TitleParser,
    backend: LyricsBackend,
}

impl Pipeline {
    pub fn new(parser: TitleParser, backend: LyricsBackend) -> Self {
        Self { parser, backend }
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let parser = TitleParser::from_config(&cfg.parser)?;
        let backend = LyricsBackend::from_config(&cfg.lyrics)?;
        tracing::debug!(
            strategy = ?cfg.parser.strategy,
            provider = backend.name(),
            "lookup pipeline ready"
        );
        Ok(Self::new(parser, backend))
    }

    pub fn backend(&self) -> &LyricsBackend {
        &self.backend
    }

    pub async fn lookup(&self, title: &str, credential: Option<&ApiCredential>) -> LookupOutcome {
        let song = match self.parser.parse(title, credential).await {
            ParseOutcome::Identified { song, source } => {
                tracing::info!(%song, ?source, "identified song");
                song
            }
            ParseOutcome::NotIdentified => {
                tracing::info!(title, "could not identify song");
                return LookupOutcome::SongNotIdentified;
            }
            ParseOutcome::CredentialRequired => return LookupOutcome::CredentialRequired,
        };

        match self.backend.resolve(&song).await {
            Some(lyrics) => LookupOutcome::Found { song, lyrics },
            None => LookupOutcome::LyricsNotFound { song },
        }
    }
}
