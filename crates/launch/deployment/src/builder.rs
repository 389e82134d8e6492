//! Release builder contract

use crate::poller::PollTimeout;
use async_trait::async_trait;
use launch_client::ClientError;
use launch_types::{AppName, ReleaseId};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from turning source into a release
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to package {path}: {reason}")]
    Package { path: PathBuf, reason: String },

    #[error("Build {build} failed: {reason}")]
    Failed { build: String, reason: String },

    #[error("Build {build} completed without a release")]
    MissingRelease { build: String },

    #[error("Timeout waiting for {operation}")]
    Timeout { operation: String },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PollTimeout> for BuildError {
    fn from(timeout: PollTimeout) -> Self {
        BuildError::Timeout {
            operation: timeout.operation,
        }
    }
}

/// Turns a source directory into a release of an application
///
/// Implementations return the release identifier exactly as the rack
/// reported it; the orchestrator promotes that identifier unmodified.
#[async_trait]
pub trait ReleaseBuilder: Send + Sync {
    async fn build(&self, source_dir: &Path, app: &AppName) -> Result<ReleaseId, BuildError>;
}
