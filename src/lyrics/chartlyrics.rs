//! ChartLyrics API client
//!
//! Two round trips over an XML API:
//! - `SearchLyric?artist=..&song=..` lists matches with a `LyricId` and `LyricChecksum`
//! - `GetLyric?lyricId=..&lyricChecksum=..` returns the lyric text

use super::{LyricsProvider, http_client};
use crate::error::{ProviderError, check_status};
use crate::title::SongIdentity;
use async_trait::async_trait;
use roxmltree::{Document, Node};
use std::time::Duration;

/// Id and checksum pair from a search result, needed by `GetLyric`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricKey {
    pub lyric_id: u64,
    pub lyric_checksum: String,
}

#[derive(Debug, Clone)]
pub struct ChartLyricsClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChartLyricsClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        let response = self.client.get(url).send().await?;
        Ok(check_status(response)?.text().await?)
    }
}

#[async_trait]
impl LyricsProvider for ChartLyricsClient {
    type Key = LyricKey;

    fn name(&self) -> &'static str {
        "chartlyrics"
    }

    async fn search(&self, song: &SongIdentity) -> Result<Option<LyricKey>, ProviderError> {
        let url = format!(
            "{}/SearchLyric?artist={}&song={}",
            self.base_url,
            urlencoding::encode(&song.artist),
            urlencoding::encode(&song.song)
        );
        let xml = self.get_text(&url).await?;
        first_search_result(&xml)
    }

    async fn fetch(&self, key: &LyricKey) -> Result<Option<String>, ProviderError> {
        let url = format!(
            "{}/GetLyric?lyricId={}&lyricChecksum={}",
            self.base_url,
            key.lyric_id,
            urlencoding::encode(&key.lyric_checksum)
        );
        let xml = self.get_text(&url).await?;
        lyric_text(&xml)
    }
}

fn child_text<'a>(node: Node<'a, 'a>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// First `SearchLyricResult` that carries an id and checksum. The API pads
/// the list with empty `xsi:nil` entries, those are skipped.
fn first_search_result(xml: &str) -> Result<Option<LyricKey>, ProviderError> {
    let doc = Document::parse(xml)?;
    let key = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "SearchLyricResult")
        .find_map(|n| {
            let lyric_id = child_text(n, "LyricId")?.parse::<u64>().ok()?;
            let lyric_checksum = child_text(n, "LyricChecksum")?.to_string();
            Some(LyricKey {
                lyric_id,
                lyric_checksum,
            })
        });
    Ok(key)
}

fn lyric_text(xml: &str) -> Result<Option<String>, ProviderError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "GetLyricResult" {
        return Err(ProviderError::Malformed(format!(
            "unexpected root element <{}>",
            root.tag_name().name()
        )));
    }
    Ok(child_text(root, "Lyric").map(str::to_string))
}
