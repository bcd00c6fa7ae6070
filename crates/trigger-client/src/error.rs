//! Error types for the API client.

use thiserror::Error;

/// Errors that can occur when calling the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status code.
    #[error("API error: {status}")]
    Api { status: u16 },

    /// Transport-level HTTP error (connection refused, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot carry endpoint paths.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
