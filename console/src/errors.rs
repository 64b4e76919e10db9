//! Error types for the mamabear console

use thiserror::Error;

/// Main error type for the mamabear console
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("API error: {status} - {body}")]
    ApiError { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Empty payload from {0}")]
    EmptyPayload(String),

    #[error("Operation already in progress: {0}")]
    Busy(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// True for errors that mean "the server has nothing for this key"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConsoleError::NotFound(_) | ConsoleError::EmptyPayload(_)
        )
    }
}

impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Internal(err.to_string())
    }
}
