//! Progress reporting for deploy runs
//!
//! The orchestrator never writes to a global logger for user-facing
//! progress; it reports to the [`DeployObserver`] it was built with.

use std::path::PathBuf;

use launch_types::{AppName, AppStatus, Endpoint, ReleaseId};
use tracing::{debug, info, warn};

use crate::error::DeployPhase;

/// Something worth telling the operator about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// The app did not exist and is being created
    CreatingApp { app: AppName },

    /// A freshly created app reached `running`
    AppCreated { app: AppName },

    /// One status poll completed
    StatusObserved {
        app: AppName,
        status: AppStatus,
        phase: DeployPhase,
    },

    /// Source is being handed to the release builder
    Building { app: AppName, source_dir: PathBuf },

    /// The builder produced a release
    Built { release: ReleaseId },

    /// Promotion was requested
    Promoting { release: ReleaseId },

    /// The promoted release is running
    Released { release: ReleaseId },

    /// Endpoint probes are starting
    WaitingForEndpoints { endpoints: Vec<Endpoint> },

    /// One endpoint answered
    EndpointReachable { endpoint: Endpoint, attempts: u32 },

    /// One endpoint gave up under a bounded policy
    EndpointUnreachable { endpoint: Endpoint, error: String },
}

/// Receives progress events from the orchestrator
pub trait DeployObserver: Send + Sync {
    fn on_event(&self, event: &DeployEvent);
}

/// Observer that turns events into `tracing` records
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DeployObserver for TracingObserver {
    fn on_event(&self, event: &DeployEvent) {
        match event {
            DeployEvent::CreatingApp { app } => info!(app = %app, "creating app"),
            DeployEvent::AppCreated { app } => info!(app = %app, "app created"),
            DeployEvent::StatusObserved { app, status, phase } => {
                debug!(app = %app, status = %status, phase = %phase, "status")
            }
            DeployEvent::Building { app, source_dir } => {
                info!(app = %app, source_dir = %source_dir.display(), "building")
            }
            DeployEvent::Built { release } => info!(release = %release, "build complete"),
            DeployEvent::Promoting { release } => info!(release = %release, "releasing"),
            DeployEvent::Released { release } => info!(release = %release, "release running"),
            DeployEvent::WaitingForEndpoints { endpoints } => {
                info!(count = endpoints.len(), "waiting for app")
            }
            DeployEvent::EndpointReachable { endpoint, attempts } => {
                info!(name = %endpoint.name, url = %endpoint.url, attempts, "endpoint reachable")
            }
            DeployEvent::EndpointUnreachable { endpoint, error } => {
                warn!(name = %endpoint.name, url = %endpoint.url, error = %error, "endpoint unreachable")
            }
        }
    }
}
