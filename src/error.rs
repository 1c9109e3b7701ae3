//! Error types for backend calls

use thiserror::Error;

/// Failure of a single backend request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot read attachment {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Short description for the log and the status line
    pub fn summary(&self) -> String {
        match self {
            ApiError::Transport(e) if e.is_timeout() => "Request timed out".to_string(),
            ApiError::Transport(e) if e.is_connect() => format!("Connection failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
