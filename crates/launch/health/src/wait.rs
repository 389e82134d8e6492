//! Retry loop around a single check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::checks::AvailabilityCheck;
use crate::config::ProbePolicy;
use crate::error::{HealthError, HealthResult};

/// Proof that an endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reachable {
    pub url: String,

    /// Attempts used, including the successful one.
    pub attempts: u32,

    /// Time from the first attempt to the successful answer.
    pub waited_ms: u64,

    pub reached_at: DateTime<Utc>,
}

/// Block until `url` passes `check`, or the policy gives up.
///
/// Every failed or timed-out attempt is followed by `policy.interval` of
/// sleep and counts against `policy.max_attempts`. No single failure ends the
/// wait early, including a URL the check cannot parse.
pub async fn wait_for_availability(
    check: &dyn AvailabilityCheck,
    url: &str,
    policy: &ProbePolicy,
) -> HealthResult<Reachable> {
    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts = attempts.saturating_add(1);

        let last_error = match tokio::time::timeout(policy.attempt_timeout, check.check(url)).await
        {
            Ok(Ok(())) => {
                let waited_ms = start.elapsed().as_millis() as u64;
                info!(url, attempts, waited_ms, "endpoint reachable");
                return Ok(Reachable {
                    url: url.to_string(),
                    attempts,
                    waited_ms,
                    reached_at: Utc::now(),
                });
            }
            Ok(Err(e @ HealthError::InvalidUrl { .. })) => {
                if attempts == 1 {
                    warn!(url, error = %e, "endpoint url does not parse; retrying anyway");
                }
                e.to_string()
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!(
                "attempt timed out after {}ms",
                policy.attempt_timeout.as_millis()
            ),
        };

        if policy.exhausted(attempts) {
            warn!(url, attempts, error = %last_error, "giving up on endpoint");
            return Err(HealthError::Unreachable {
                url: url.to_string(),
                attempts,
                last_error,
            });
        }

        debug!(url, attempts, error = %last_error, "endpoint not reachable yet");
        tokio::time::sleep(policy.interval).await;
    }
}
