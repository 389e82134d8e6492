//! Deployment error types

use crate::builder::BuildError;
use crate::poller::PollTimeout;
use launch_client::ClientError;
use launch_types::{AppName, TypesError};
use std::fmt;
use thiserror::Error;

/// Phase of a deploy, used in errors and progress events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeployPhase {
    EnsureApp,
    Build,
    Promote,
    WaitForRunning,
    FetchDescriptor,
    WaitForAvailability,
}

impl fmt::Display for DeployPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeployPhase::EnsureApp => "app creation",
            DeployPhase::Build => "build",
            DeployPhase::Promote => "promotion",
            DeployPhase::WaitForRunning => "release rollout",
            DeployPhase::FetchDescriptor => "descriptor fetch",
            DeployPhase::WaitForAvailability => "endpoint availability",
        };
        f.write_str(name)
    }
}

/// Deployment errors
#[derive(Debug, Error)]
pub enum DeployError {
    /// A control-plane request failed; the message is passed through as-is
    #[error(transparent)]
    Client(ClientError),

    /// The application descriptor could not be decoded
    #[error("Failed to decode application descriptor from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The rack reported a status this client does not understand
    #[error("Unknown application status: {0:?}")]
    UnknownStatus(String),

    /// The release builder failed; nothing was promoted
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The application vanished between promotion and descriptor fetch
    #[error("App {0} not found")]
    AppNotFound(AppName),

    /// The rack reported the application as failed
    #[error("App {app} failed during {phase}")]
    AppFailed { app: AppName, phase: DeployPhase },

    /// A polling deadline or the overall deploy deadline expired
    #[error("Timeout waiting for {operation}")]
    Timeout { operation: String },

    /// Endpoints stayed unreachable under a bounded availability policy
    #[error("Endpoints unavailable: {}", .endpoints.join(", "))]
    Unavailable { endpoints: Vec<String> },
}

impl From<ClientError> for DeployError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Decode { path, source } => DeployError::Decode { path, source },
            ClientError::Types(TypesError::UnknownStatus(status)) => {
                DeployError::UnknownStatus(status)
            }
            other => DeployError::Client(other),
        }
    }
}

impl From<PollTimeout> for DeployError {
    fn from(timeout: PollTimeout) -> Self {
        DeployError::Timeout {
            operation: timeout.operation,
        }
    }
}

/// Result type for deployment operations
pub type Result<T> = std::result::Result<T, DeployError>;
