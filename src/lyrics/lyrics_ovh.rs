//! lyrics.ovh client: a single `GET /v1/{artist}/{title}` returning
//! `{"lyrics": "..."}`.

use super::{LyricsProvider, http_client};
use crate::error::{ProviderError, check_status};
use crate::title::SongIdentity;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct LyricsOvhResponse {
    lyrics: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LyricsOvhClient {
    client: reqwest::Client,
    base_url: String,
}

impl LyricsOvhClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LyricsProvider for LyricsOvhClient {
    type Key = SongIdentity;

    fn name(&self) -> &'static str {
        "lyrics.ovh"
    }

    async fn search(&self, song: &SongIdentity) -> Result<Option<SongIdentity>, ProviderError> {
        Ok(Some(song.clone()))
    }

    async fn fetch(&self, song: &SongIdentity) -> Result<Option<String>, ProviderError> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(&song.artist),
            urlencoding::encode(&song.song)
        );

        let response = self.client.get(&url).send().await?;
        let body: LyricsOvhResponse = check_status(response)?.json().await?;
        Ok(body.lyrics)
    }
}
