use thiserror::Error;

/// Failure of a single call to an external service (lyrics provider, AI
/// parser, oEmbed). Callers log it and degrade to an absent result.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Malformed(e.to_string())
    }
}

impl From<roxmltree::Error> for ProviderError {
    fn from(e: roxmltree::Error) -> Self {
        ProviderError::Malformed(e.to_string())
    }
}

/// Turn a non-success response into `ProviderError::Status`.
pub fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ProviderError::Status(status))
    }
}
