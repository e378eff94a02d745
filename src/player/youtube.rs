use crate::error::{ProviderError, check_status};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .unwrap()
});

static BARE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// 11-character YouTube video id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Accepts watch/embed/short links or a bare id.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if BARE_ID_RE.is_match(input) {
            return Some(Self(input.to_string()));
        }
        let caps = URL_RE.captures(input)?;
        Some(Self(caps.get(1)?.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct OEmbed {
    title: Option<String>,
}

/// Read a video's title through the oEmbed endpoint.
pub async fn fetch_title(
    client: &reqwest::Client,
    oembed_url: &str,
    id: &VideoId,
) -> Result<String, ProviderError> {
    let url = format!(
        "{}?url={}&format=json",
        oembed_url,
        urlencoding::encode(&id.watch_url())
    );
    let response = client.get(&url).send().await?;
    let body: OEmbed = check_status(response)?.json().await?;
    body.title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ProviderError::Malformed("oEmbed reply has no title".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::OneShotServer;

    fn id(input: &str) -> Option<String> {
        VideoId::parse(input).map(|v| v.0)
    }

    #[test]
    fn test_video_id_forms() {
        let want = Some("FGBhQbmPwH8".to_string());
        assert_eq!(id("https://www.youtube.com/watch?v=FGBhQbmPwH8"), want);
        assert_eq!(id("https://youtube.com/watch?feature=share&v=FGBhQbmPwH8&t=10"), want);
        assert_eq!(id("https://youtu.be/FGBhQbmPwH8?si=abc"), want);
        assert_eq!(id("https://www.youtube.com/embed/FGBhQbmPwH8"), want);
        assert_eq!(id("https://www.youtube.com/v/FGBhQbmPwH8"), want);
        assert_eq!(id("  FGBhQbmPwH8 "), want);
    }

    #[test]
    fn test_id_patterns_compile() {
        assert!(BARE_ID_RE.is_match("FGBhQbmPwH8"));
        assert!(URL_RE.is_match("https://youtu.be/FGBhQbmPwH8"));
    }

    #[test]
    fn test_video_id_rejects() {
        assert_eq!(id("https://vimeo.com/123456"), None);
        assert_eq!(id("https://youtu.be/short"), None);
        assert_eq!(id("Daft Punk - One More Time"), None);
        assert_eq!(id(""), None);
    }

    #[tokio::test]
    async fn test_fetch_title() {
        let body = r#"{"title":"Daft Punk - One More Time (Official Video)","author_name":"Daft Punk","type":"video"}"#;
        let server = OneShotServer::start("200 OK", "application/json", body).await;
        let client = reqwest::Client::new();
        let video = VideoId::parse("FGBhQbmPwH8").unwrap();
        let title = fetch_title(&client, &format!("{}/oembed", server.base_url), &video)
            .await
            .unwrap();
        assert_eq!(title, "Daft Punk - One More Time (Official Video)");

        let request = server.request().await;
        assert!(request.starts_with(
            "GET /oembed?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DFGBhQbmPwH8&format=json"
        ));
    }

    #[tokio::test]
    async fn test_fetch_title_unavailable() {
        let server = OneShotServer::start("401 Unauthorized", "text/plain", "Unauthorized").await;
        let client = reqwest::Client::new();
        let video = VideoId::parse("FGBhQbmPwH8").unwrap();
        let err = fetch_title(&client, &format!("{}/oembed", server.base_url), &video)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Status(_)));
    }
}
