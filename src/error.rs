//! Error types shared across the relay.

use thiserror::Error;

/// Startup configuration problems. All of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("unsupported STORE_URL `{0}`, expected an http(s):// or sqlite: URL")]
    UnsupportedStoreUrl(String),

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("completion provider rejected the request: {0}")]
    Api(String),

    #[error("completion response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid completion request: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("history store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("history store responded with {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("message must be a non-empty string")]
    Validation,

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("completion provider returned no content")]
    EmptyCompletion,

    #[error("chat history is unavailable: {0}")]
    HistoryUnavailable(#[source] StoreError),
}
