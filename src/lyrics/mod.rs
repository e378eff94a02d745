//! Lyrics lookup for an identified song.
//!
//! This module provides:
//! - the [`LyricsProvider`] contract (search for a lookup key, then fetch text)
//! - clients for ChartLyrics, LRCLIB, lyrics.ovh and an offline mock
//! - [`LyricsBackend`], the provider picked by configuration at startup

pub mod chartlyrics;
pub mod lrclib;
pub mod lyrics_ovh;
pub mod mock;

use crate::config::{LyricsConfig, ProviderKind};
use crate::error::ProviderError;
use crate::title::SongIdentity;
use async_trait::async_trait;

pub use chartlyrics::ChartLyricsClient;
pub use lrclib::LrclibClient;
pub use lyrics_ovh::LyricsOvhClient;
pub use mock::MockProvider;

/// A lyrics service. Two-step services return a provider-issued key from
/// `search`; one-step services use the identity itself as the key and do all
/// the work in `fetch`.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    type Key: Send + Sync + std::fmt::Debug;

    fn name(&self) -> &'static str;

    /// Key of the first candidate the service returns, if any.
    async fn search(&self, song: &SongIdentity) -> Result<Option<Self::Key>, ProviderError>;

    async fn fetch(&self, key: &Self::Key) -> Result<Option<String>, ProviderError>;
}

/// Search then fetch. Failures are logged and reported as `None`.
pub async fn resolve<P: LyricsProvider>(provider: &P, song: &SongIdentity) -> Option<String> {
    let key = match provider.search(song).await {
        Ok(Some(key)) => key,
        Ok(None) => {
            tracing::info!(provider = provider.name(), %song, "no lyrics candidates");
            return None;
        }
        Err(e) => {
            tracing::warn!(provider = provider.name(), %song, error = %e, "lyrics search failed");
            return None;
        }
    };

    tracing::debug!(provider = provider.name(), ?key, "fetching lyrics");
    match provider.fetch(&key).await {
        Ok(Some(text)) if !text.trim().is_empty() => Some(text),
        Ok(_) => {
            tracing::info!(provider = provider.name(), %song, "provider returned no lyric text");
            None
        }
        Err(e) => {
            tracing::warn!(provider = provider.name(), %song, error = %e, "lyrics fetch failed");
            None
        }
    }
}

/// The configured lyrics provider.
#[derive(Debug, Clone)]
pub enum LyricsBackend {
    ChartLyrics(ChartLyricsClient),
    Lrclib(LrclibClient),
    LyricsOvh(LyricsOvhClient),
    Mock(MockProvider),
}

impl LyricsBackend {
    pub fn from_config(cfg: &LyricsConfig) -> anyhow::Result<Self> {
        let timeout = std::time::Duration::from_secs(cfg.timeout_secs);
        Ok(match cfg.provider {
            ProviderKind::Chartlyrics => {
                Self::ChartLyrics(ChartLyricsClient::new(&cfg.chartlyrics_url, timeout)?)
            }
            ProviderKind::Lrclib => Self::Lrclib(LrclibClient::new(&cfg.lrclib_url, timeout)?),
            ProviderKind::LyricsOvh => {
                Self::LyricsOvh(LyricsOvhClient::new(&cfg.lyrics_ovh_url, timeout)?)
            }
            ProviderKind::Mock => Self::Mock(MockProvider),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ChartLyrics(p) => p.name(),
            Self::Lrclib(p) => p.name(),
            Self::LyricsOvh(p) => p.name(),
            Self::Mock(p) => p.name(),
        }
    }

    pub async fn resolve(&self, song: &SongIdentity) -> Option<String> {
        match self {
            Self::ChartLyrics(p) => resolve(p, song).await,
            Self::Lrclib(p) => resolve(p, song).await,
            Self::LyricsOvh(p) => resolve(p, song).await,
            Self::Mock(p) => resolve(p, song).await,
        }
    }
}

/// Shared reqwest client setup for the lyrics providers.
pub(crate) fn http_client(timeout: std::time::Duration) -> anyhow::Result<reqwest::Client> {
    use anyhow::Context;
    reqwest::Client::builder()
        .user_agent(concat!("singalong/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("build lyrics http client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Two-step provider with canned search results that records fetch calls.
    struct ScriptedProvider {
        candidates: Vec<(u32, &'static str)>,
        search_fails: bool,
        fetch_result: Result<Option<String>, &'static str>,
        fetched: Mutex<Vec<(u32, String)>>,
    }

    impl ScriptedProvider {
        fn new(candidates: Vec<(u32, &'static str)>) -> Self {
            Self {
                candidates,
                search_fails: false,
                fetch_result: Ok(Some("la la la".to_string())),
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn fetched(&self) -> Vec<(u32, String)> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LyricsProvider for ScriptedProvider {
        type Key = (u32, String);

        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn search(&self, _song: &SongIdentity) -> Result<Option<Self::Key>, ProviderError> {
            if self.search_fails {
                return Err(ProviderError::Status(reqwest::StatusCode::BAD_GATEWAY));
            }
            Ok(self
                .candidates
                .first()
                .map(|(id, checksum)| (*id, checksum.to_string())))
        }

        async fn fetch(&self, key: &Self::Key) -> Result<Option<String>, ProviderError> {
            self.fetched.lock().unwrap().push(key.clone());
            match &self.fetch_result {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(ProviderError::Malformed(msg.to_string())),
            }
        }
    }

    fn song() -> SongIdentity {
        SongIdentity::new("Daft Punk", "One More Time").unwrap()
    }

    #[tokio::test]
    async fn empty_search_skips_fetch() {
        let provider = ScriptedProvider::new(vec![]);
        assert_eq!(resolve(&provider, &song()).await, None);
        assert!(provider.fetched().is_empty());
    }

    #[tokio::test]
    async fn first_candidate_is_fetched() {
        let provider = ScriptedProvider::new(vec![(42, "abc"), (7, "zzz")]);
        assert_eq!(
            resolve(&provider, &song()).await.as_deref(),
            Some("la la la")
        );
        assert_eq!(provider.fetched(), vec![(42, "abc".to_string())]);
    }

    #[tokio::test]
    async fn failures_become_absence() {
        let mut provider = ScriptedProvider::new(vec![(1, "a")]);
        provider.search_fails = true;
        assert_eq!(resolve(&provider, &song()).await, None);
        assert!(provider.fetched().is_empty());

        let mut provider = ScriptedProvider::new(vec![(1, "a")]);
        provider.fetch_result = Err("bad xml");
        assert_eq!(resolve(&provider, &song()).await, None);

        let mut provider = ScriptedProvider::new(vec![(1, "a")]);
        provider.fetch_result = Ok(Some("  \n ".to_string()));
        assert_eq!(resolve(&provider, &song()).await, None);
    }

    #[tokio::test]
    async fn backend_from_config() {
        let cfg = LyricsConfig {
            provider: ProviderKind::Mock,
            ..LyricsConfig::default()
        };
        let backend = LyricsBackend::from_config(&cfg).unwrap();
        assert_eq!(backend.name(), "mock");
        assert!(backend.resolve(&song()).await.is_some());

        let cfg = LyricsConfig::default();
        assert_eq!(LyricsBackend::from_config(&cfg).unwrap().name(), "chartlyrics");
    }
}
