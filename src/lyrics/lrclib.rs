//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API. Lookups go through `/search` for a record id
//! and then `/get/{id}` for the record itself; only the plain lyrics are used.
//! API Documentation: https://lrclib.net/docs

use super::{LyricsProvider, http_client};
use crate::error::{ProviderError, check_status};
use crate::title::SongIdentity;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// LRCLIB record as returned by `/search` and `/get/{id}`
#[derive(Debug, Deserialize, Clone)]
pub struct LrclibRecord {
    id: i64,
    #[serde(rename = "plainLyrics")]
    plain_lyrics: Option<String>,
    #[serde(default)]
    instrumental: bool,
}

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LyricsProvider for LrclibClient {
    type Key = i64;

    fn name(&self) -> &'static str {
        "lrclib"
    }

    async fn search(&self, song: &SongIdentity) -> Result<Option<i64>, ProviderError> {
        let url = format!(
            "{}/search?track_name={}&artist_name={}",
            self.base_url,
            urlencoding::encode(&song.song),
            urlencoding::encode(&song.artist)
        );

        let response = self.client.get(&url).send().await?;
        let results: Vec<LrclibRecord> = check_status(response)?.json().await?;
        Ok(results.first().map(|r| r.id))
    }

    async fn fetch(&self, id: &i64) -> Result<Option<String>, ProviderError> {
        let url = format!("{}/get/{}", self.base_url, id);

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let record: LrclibRecord = check_status(response)?.json().await?;
        if record.instrumental {
            tracing::debug!(id, "LRCLIB record is instrumental");
        }
        Ok(record.plain_lyrics)
    }
}
