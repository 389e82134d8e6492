//! Deploy configuration

use launch_health::ProbePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for one deploy run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Delay between status polls
    pub poll_interval: Duration,

    /// Upper bound on each status-wait loop; `None` polls until the rack
    /// reports `running`
    pub poll_deadline: Option<Duration>,

    /// Upper bound on the whole deploy
    pub deploy_deadline: Option<Duration>,

    /// How endpoints are waited on once the release is running
    pub availability: AvailabilityPolicy,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            poll_deadline: None,
            deploy_deadline: None,
            availability: AvailabilityPolicy::default(),
        }
    }
}

impl DeployConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_poll_deadline(mut self, deadline: Duration) -> Self {
        self.poll_deadline = Some(deadline);
        self
    }

    pub fn with_deploy_deadline(mut self, deadline: Duration) -> Self {
        self.deploy_deadline = Some(deadline);
        self
    }

    pub fn with_availability(mut self, availability: AvailabilityPolicy) -> Self {
        self.availability = availability;
        self
    }
}

/// What to do once endpoints have been probed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityPolicy {
    /// Retry policy applied to each endpoint
    pub probe: ProbePolicy,

    /// Fail the deploy if any endpoint ends up unreachable.
    ///
    /// Only matters with a bounded probe policy; an unbounded one never
    /// reports an endpoint as unreachable.
    pub require_all: bool,
}

impl Default for AvailabilityPolicy {
    fn default() -> Self {
        Self {
            probe: ProbePolicy::default(),
            require_all: true,
        }
    }
}

impl AvailabilityPolicy {
    /// Give each endpoint `attempts` tries and report, rather than fail on,
    /// endpoints that never answer.
    pub fn best_effort(attempts: u32) -> Self {
        Self {
            probe: ProbePolicy::bounded(attempts),
            require_all: false,
        }
    }
}
