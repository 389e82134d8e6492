//! CLI error types

use launch_build::IGNORE_FILE;
use launch_client::ClientError;
use launch_deployment::DeployError;
use launch_types::TypesError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// The deploy itself failed
    #[error(transparent)]
    Deploy(#[from] DeployError),

    /// The control-plane client could not be set up
    #[error(transparent)]
    Client(#[from] ClientError),

    /// App name missing or invalid
    #[error(transparent)]
    Types(#[from] TypesError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Extra line printed under the error, when there is something to add.
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::Deploy(DeployError::Build(_)) => Some(format!(
                "check the build output on the rack; large directories can be trimmed with {}",
                IGNORE_FILE
            )),
            CliError::Deploy(DeployError::Timeout { .. }) => {
                Some("raise --timeout or leave it unset to wait indefinitely".to_string())
            }
            CliError::Client(ClientError::Config(_)) => {
                Some("set --host or LAUNCH_HOST to the rack address".to_string())
            }
            _ => None,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
