//! Concurrent probing of every endpoint of an application.

use std::sync::Arc;

use futures::future::join_all;
use launch_types::Endpoint;
use tracing::info;

use crate::checks::{AvailabilityCheck, HttpCheck};
use crate::config::ProbePolicy;
use crate::error::HealthResult;
use crate::wait::{wait_for_availability, Reachable};

/// Result of waiting on one endpoint.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub endpoint: Endpoint,
    pub result: HealthResult<Reachable>,
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        self.result.is_ok()
    }
}

/// Waits on endpoints with a shared check and policy.
#[derive(Clone)]
pub struct Prober {
    check: Arc<dyn AvailabilityCheck>,
    policy: ProbePolicy,
}

impl Prober {
    pub fn new(check: Arc<dyn AvailabilityCheck>, policy: ProbePolicy) -> Self {
        Self { check, policy }
    }

    /// Prober using plain HTTP checks.
    pub fn http(policy: ProbePolicy) -> Self {
        Self::new(Arc::new(HttpCheck::new()), policy)
    }

    /// Wait on a single endpoint.
    pub async fn probe(&self, endpoint: Endpoint) -> ProbeOutcome {
        let result = wait_for_availability(self.check.as_ref(), &endpoint.url, &self.policy).await;
        ProbeOutcome { endpoint, result }
    }

    /// Wait on every endpoint concurrently and return once all have finished.
    ///
    /// Outcomes are returned in the order of `endpoints`. With an unbounded
    /// policy this only returns once every endpoint has answered.
    pub async fn probe_all(&self, endpoints: Vec<Endpoint>) -> Vec<ProbeOutcome> {
        info!(count = endpoints.len(), "waiting for endpoints");
        join_all(endpoints.into_iter().map(|e| self.probe(e))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HealthError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Each URL fails a configured number of times before answering.
    struct ScriptedCheck {
        failures: HashMap<String, u32>,
        calls: std::sync::Mutex<HashMap<String, u32>>,
        total: AtomicU32,
    }

    impl ScriptedCheck {
        fn new(failures: &[(&str, u32)]) -> Self {
            Self {
                failures: failures
                    .iter()
                    .map(|(u, n)| (u.to_string(), *n))
                    .collect(),
                calls: std::sync::Mutex::new(HashMap::new()),
                total: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl AvailabilityCheck for ScriptedCheck {
        async fn check(&self, url: &str) -> HealthResult<()> {
            self.total.fetch_add(1, Ordering::SeqCst);
            let call = {
                let mut calls = self.calls.lock().unwrap();
                let entry = calls.entry(url.to_string()).or_insert(0);
                *entry += 1;
                *entry
            };
            if call <= self.failures.get(url).copied().unwrap_or(0) {
                Err(HealthError::CheckFailed {
                    url: url.to_string(),
                    reason: "refused".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_all_joins_every_endpoint() {
        let check = Arc::new(ScriptedCheck::new(&[("http://lb:80", 2), ("http://lb:443", 5)]));
        let prober = Prober::new(check.clone(), ProbePolicy::default());

        let outcomes = prober
            .probe_all(vec![
                Endpoint::new("web", "http://lb:80"),
                Endpoint::new("api", "http://lb:443"),
            ])
            .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(ProbeOutcome::is_reachable));
        assert_eq!(outcomes[0].endpoint.name, "web");
        assert_eq!(outcomes[1].endpoint.name, "api");
        assert_eq!(check.total.load(Ordering::SeqCst), 3 + 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_all_reports_unreachable_with_bounded_policy() {
        let check = Arc::new(ScriptedCheck::new(&[("http://lb:81", u32::MAX)]));
        let prober = Prober::new(check, ProbePolicy::bounded(2));

        let outcomes = prober
            .probe_all(vec![
                Endpoint::new("web", "http://lb:80"),
                Endpoint::new("admin", "http://lb:81"),
            ])
            .await;

        assert!(outcomes[0].is_reachable());
        assert!(matches!(
            outcomes[1].result,
            Err(HealthError::Unreachable { attempts: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_probe_all_without_endpoints() {
        let prober = Prober::http(ProbePolicy::default());
        assert!(prober.probe_all(Vec::new()).await.is_empty());
    }
}
