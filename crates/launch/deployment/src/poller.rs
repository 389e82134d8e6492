//! Fixed-interval polling with an optional deadline

use std::future::Future;
use std::time::Duration;

use launch_client::AppsApi;
use launch_types::{AppName, AppStatus};
use thiserror::Error;
use tracing::debug;

use crate::error::{DeployError, DeployPhase, Result};
use crate::observer::{DeployEvent, DeployObserver};

/// A polling loop ran past its deadline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timed out after {after:?} waiting for {operation}")]
pub struct PollTimeout {
    pub operation: String,
    pub after: Duration,
}

/// Repeats a check on a fixed interval until it yields a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPoller {
    interval: Duration,
    deadline: Option<Duration>,
}

impl StatusPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Call `attempt` until it returns `Ok(Some(_))`.
    ///
    /// `Ok(None)` means "not yet" and is followed by one interval of sleep.
    /// Errors end the loop immediately. When the deadline passes the loop is
    /// abandoned with a [`PollTimeout`].
    pub async fn poll_until<T, E, F, Fut>(
        &self,
        operation: &str,
        mut attempt: F,
    ) -> std::result::Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<Option<T>, E>>,
        E: From<PollTimeout>,
    {
        let interval = self.interval;
        let poll = async {
            loop {
                match attempt().await {
                    Ok(Some(value)) => return Ok(value),
                    Ok(None) => tokio::time::sleep(interval).await,
                    Err(e) => return Err(e),
                }
            }
        };

        match self.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, poll).await {
                Ok(result) => result,
                Err(_) => Err(PollTimeout {
                    operation: operation.to_string(),
                    after: deadline,
                }
                .into()),
            },
            None => poll.await,
        }
    }

    /// Poll the application status until the rack reports `running`.
    ///
    /// A `failed` status ends the wait with [`DeployError::AppFailed`]; any
    /// request error is returned as-is without retrying.
    pub async fn wait_for_running(
        &self,
        api: &AppsApi,
        app: &AppName,
        phase: DeployPhase,
        observer: &dyn DeployObserver,
    ) -> Result<()> {
        self.poll_until(&format!("{} of {}", phase, app), move || async move {
            let status = match api.app_status(app).await {
                Ok(status) => status,
                Err(e) => return Err(DeployError::from(e)),
            };
            debug!(app = %app, status = %status, phase = %phase, "polled app status");
            observer.on_event(&DeployEvent::StatusObserved {
                app: app.clone(),
                status,
                phase,
            });

            match status {
                AppStatus::Running => Ok(Some(())),
                AppStatus::Failed => Err(DeployError::AppFailed {
                    app: app.clone(),
                    phase,
                }),
                _ => Ok(None),
            }
        })
        .await
    }
}
