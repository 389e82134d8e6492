//! Error types for launch-health.

use thiserror::Error;

/// Errors produced while probing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthError {
    /// The URL could not be turned into a request.
    #[error("invalid endpoint url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A single reachability attempt failed.
    #[error("check failed for {url}: {reason}")]
    CheckFailed { url: String, reason: String },

    /// The endpoint stayed unreachable for every allowed attempt.
    #[error("{url} unreachable after {attempts} attempts: {last_error}")]
    Unreachable {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

/// Result type for health operations.
pub type HealthResult<T> = Result<T, HealthError>;
