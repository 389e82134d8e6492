//! Client error types

use launch_types::TypesError;
use thiserror::Error;

/// Errors talking to the control plane
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The control plane answered with a non-success status
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as sent
        message: String,
    },

    /// A JSON payload could not be decoded
    #[error("Malformed response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A status token or identifier failed to parse
    #[error(transparent)]
    Types(#[from] TypesError),

    /// Client configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Did the control plane report the resource as missing?
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
