//! OpenAI client error types.

use thiserror::Error;

/// Result type for OpenAI operations.
pub type OpenAiResult<T> = Result<T, OpenAiError>;

/// Errors that can occur during generation calls.
#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("OpenAI API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Generation did not complete normally (finish reason: {finish_reason})")]
    IncompleteGeneration { finish_reason: String },

    #[error("Generation returned empty content")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl OpenAiError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Whether this error means the model produced partial or filtered
    /// output rather than failing outright.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            OpenAiError::IncompleteGeneration { .. } | OpenAiError::EmptyResponse
        )
    }
}
