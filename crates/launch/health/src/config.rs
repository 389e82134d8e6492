//! Probe configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long and how often to wait for an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbePolicy {
    /// Delay between failed attempts.
    pub interval: Duration,

    /// Upper bound on a single attempt.
    pub attempt_timeout: Duration,

    /// Give up after this many failed attempts; `None` waits forever.
    pub max_attempts: Option<u32>,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(5),
            max_attempts: None,
        }
    }
}

impl ProbePolicy {
    /// Policy that gives up after `max_attempts` failures.
    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts.max(1)),
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Has `attempts` used up the allowance?
    pub fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}
