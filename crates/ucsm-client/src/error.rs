//! UCS Manager client errors

use thiserror::Error;

/// Errors that can occur when interacting with the UCS Manager API
#[derive(Debug, Error)]
pub enum UcsError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// UCS Manager API returned an error
    #[error("UCS Manager API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, expired session cookie)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Managed object not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., malformed distinguished name)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
