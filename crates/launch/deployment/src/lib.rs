//! Launch deploy orchestration
//!
//! Drives one deploy of a source directory to completion:
//! 1. ensure the application exists, creating it and waiting for `running`
//! 2. build the source into a release via a [`ReleaseBuilder`]
//! 3. promote the release and wait for `running` again
//! 4. re-fetch the descriptor and [extract](extract_endpoints) its endpoints
//! 5. wait for every endpoint to answer, under an [`AvailabilityPolicy`]

pub mod builder;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod observer;
pub mod orchestrator;
pub mod poller;

pub use builder::{BuildError, ReleaseBuilder};
pub use config::{AvailabilityPolicy, DeployConfig};
pub use endpoints::extract_endpoints;
pub use error::{DeployError, DeployPhase, Result};
pub use observer::{DeployEvent, DeployObserver, TracingObserver};
pub use orchestrator::{DeployReport, EndpointReport, Orchestrator, OrchestratorBuilder};
pub use poller::{PollTimeout, StatusPoller};
