//! Error types used by the crate.

use mapir_types::GeometryError;
use thiserror::Error;

/// Mapir error type.
#[derive(Debug, Error)]
pub enum MapirError {
    /// Client is not configured properly, e.g. no access token is set.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Request URL cannot be constructed.
    #[error("malformed url: {0}")]
    MalformedUrl(String),
    /// Invalid geometry.
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),
    /// Network error or timeout.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Server responded with a non-success status code.
    #[error("server responded with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Beginning of the response body.
        message: String,
    },
    /// Response payload does not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// The task was cancelled before it completed.
    #[error("task was cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for MapirError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(Box::new(value))
    }
}

impl From<serde_json::Error> for MapirError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
