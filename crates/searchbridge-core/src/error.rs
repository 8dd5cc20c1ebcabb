//! Error types for searchbridge

use thiserror::Error;

/// Result type alias using SearchBridgeError
pub type Result<T> = std::result::Result<T, SearchBridgeError>;

/// Error type alias for convenience
pub type Error = SearchBridgeError;

/// Main error type for searchbridge
#[derive(Debug, Error)]
pub enum SearchBridgeError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
