//! Error types for launch-types.

use thiserror::Error;

/// Errors raised while parsing or validating core types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// The rack reported a status token this client does not know.
    #[error("unknown application status: {0:?}")]
    UnknownStatus(String),

    /// The rack reported a build status token this client does not know.
    #[error("unknown build status: {0:?}")]
    UnknownBuildStatus(String),

    /// An application name failed validation.
    #[error("invalid app name {name:?}: {reason}")]
    InvalidAppName { name: String, reason: String },
}

/// Result type for type-level parsing.
pub type TypesResult<T> = Result<T, TypesError>;
