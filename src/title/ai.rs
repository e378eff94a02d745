//! AI-assisted title parsing through an OpenAI-compatible chat-completion API.

use super::SongIdentity;
use crate::config::AiConfig;
use crate::credential::ApiCredential;
use crate::error::{ProviderError, check_status};
use anyhow::Context;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You extract music metadata from YouTube video titles. \
Reply with a single JSON object of the form {\"artist\": \"...\", \"song\": \"...\"} and nothing else. \
Remove featured artists (feat., ft., with), remix or version notes, and video type labels \
such as Official Video, Lyric Video, Audio, Live, HD or 4K.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: [ChatMessage<'a>; 2],
    model: &'a str,
    stream: bool,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExtractedSong {
    artist: Option<String>,
    song: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AiTitleParser {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl AiTitleParser {
    pub fn new(cfg: &AiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build AI parser http client")?;
        Ok(Self {
            http,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
        })
    }

    /// Ask the model for artist and song. Any failure is logged and yields `None`.
    pub async fn identify(&self, title: &str, credential: &ApiCredential) -> Option<SongIdentity> {
        match self.request(title, credential).await {
            Ok(Some(song)) => {
                tracing::debug!(%song, "AI parser identified title");
                Some(song)
            }
            Ok(None) => {
                tracing::info!(title, "AI parser returned no usable artist/song");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI title parsing failed");
                None
            }
        }
    }

    async fn request(
        &self,
        title: &str,
        credential: &ApiCredential,
    ) -> Result<Option<SongIdentity>, ProviderError> {
        let body = ChatRequest {
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: title,
                },
            ],
            model: &self.model,
            stream: false,
            temperature: 0.0,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .await?;
        let reply: ChatResponse = check_status(response)?.json().await?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::Malformed("reply has no message content".into()))?;

        parse_reply(&content)
    }
}

/// Parse the model's message content (a JSON object, possibly inside a
/// markdown code fence) into a sanitized identity.
fn parse_reply(content: &str) -> Result<Option<SongIdentity>, ProviderError> {
    let extracted: ExtractedSong = serde_json::from_str(strip_code_fence(content))?;
    let (Some(artist), Some(song)) = (extracted.artist, extracted.song) else {
        return Ok(None);
    };
    Ok(SongIdentity::new(&sanitize(&artist), &sanitize(&song)))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Keep letters, digits, whitespace and `-`; collapse whitespace runs; trim.
pub fn sanitize(field: &str) -> String {
    let kept: String = field
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::OneShotServer;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("  AC/DC  "), "ACDC");
        assert_eq!(sanitize("Guns N' Roses"), "Guns N Roses");
        assert_eq!(sanitize("Beyoncé\t&  JAY-Z!"), "Beyoncé JAY-Z");
        assert_eq!(sanitize("?!*"), "");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for raw in ["  AC/DC  ", "Beyoncé\t&  JAY-Z!", "a  b\n\nc", "Mötley Crüe", "x--y"] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_parse_reply() {
        let song = parse_reply(r#"{"artist": "Daft Punk", "song": "One More Time!"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(song, SongIdentity::new("Daft Punk", "One More Time").unwrap());

        let fenced = "```json\n{\"artist\":\"Adele\",\"song\":\"Hello\"}\n```";
        assert_eq!(
            parse_reply(fenced).unwrap().unwrap(),
            SongIdentity::new("Adele", "Hello").unwrap()
        );
    }

    #[test]
    fn test_parse_reply_missing_fields() {
        assert_eq!(parse_reply(r#"{"artist": "Daft Punk"}"#).unwrap(), None);
        assert_eq!(parse_reply(r#"{"artist": "!!", "song": "x"}"#).unwrap(), None);
        assert!(matches!(
            parse_reply("Artist: Daft Punk"),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "a title",
                },
            ],
            model: "m",
            stream: false,
            temperature: 0.0,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["messages"][1]["role"], "user");
        assert_eq!(v["messages"][1]["content"], "a title");
        assert_eq!(v["stream"], false);
        assert_eq!(v["temperature"], 0.0);
        assert_eq!(v["model"], "m");
    }

    #[tokio::test]
    async fn test_identify_against_local_server() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"artist\":\"Daft Punk\",\"song\":\"One More Time\"}"}}]}"#;
        let server = OneShotServer::start("200 OK", "application/json", body).await;

        let parser = AiTitleParser::new(&AiConfig {
            endpoint: format!("{}/v1/chat/completions", server.base_url),
            model: "test-model".into(),
            timeout_secs: 5,
        })
        .unwrap();
        let key = ApiCredential::new("sk-local").unwrap();
        let song = parser.identify("DAFT PUNK | one more time", &key).await;
        assert_eq!(song, SongIdentity::new("Daft Punk", "One More Time"));

        let request = server.request().await.to_ascii_lowercase();
        assert!(request.starts_with("post /v1/chat/completions"));
        assert!(request.contains("authorization: bearer sk-local"));
        assert!(request.contains("\"model\":\"test-model\""));
    }

    #[tokio::test]
    async fn test_identify_error_status_is_none() {
        let server = OneShotServer::start("401 Unauthorized", "application/json", "{}").await;
        let parser = AiTitleParser::new(&AiConfig {
            endpoint: format!("{}/v1/chat/completions", server.base_url),
            ..AiConfig::default()
        })
        .unwrap();
        let key = ApiCredential::new("sk-bad").unwrap();
        assert_eq!(parser.identify("Adele - Hello", &key).await, None);
    }
}
