//! Launch availability probing
//!
//! Waits for freshly deployed endpoints to answer:
//! - [`AvailabilityCheck`] performs a single reachability attempt
//! - [`wait_for_availability`] retries a check under a [`ProbePolicy`]
//! - [`Prober`] fans out one wait per endpoint and joins on all of them

pub mod checks;
pub mod config;
pub mod error;
pub mod prober;
pub mod wait;

pub use checks::{AvailabilityCheck, HttpCheck};
pub use config::ProbePolicy;
pub use error::{HealthError, HealthResult};
pub use prober::{ProbeOutcome, Prober};
pub use wait::{wait_for_availability, Reachable};
