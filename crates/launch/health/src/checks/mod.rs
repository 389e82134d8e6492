//! Single-attempt reachability checks.

mod http;

pub use http::HttpCheck;

use async_trait::async_trait;

use crate::error::HealthResult;

/// One reachability attempt against a URL.
///
/// Returning [`HealthError::CheckFailed`](crate::HealthError::CheckFailed)
/// asks the caller to try again; any other error is final.
#[async_trait]
pub trait AvailabilityCheck: Send + Sync {
    async fn check(&self, url: &str) -> HealthResult<()>;
}
