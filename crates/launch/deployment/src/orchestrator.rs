//! Deploy orchestrator
//!
//! Phases run strictly in order on one task. Only the final availability
//! phase fans out, one probe per endpoint, and joins on all of them.

use std::path::Path;
use std::sync::Arc;

use launch_client::{AppsApi, ControlPlane};
use launch_health::{AvailabilityCheck, ProbeOutcome, Prober};
use launch_types::{AppName, Application, DeployRunId, Endpoint, ReleaseId};
use serde::Serialize;
use tracing::{debug, info, info_span, instrument, Instrument};

use crate::builder::ReleaseBuilder;
use crate::config::DeployConfig;
use crate::endpoints::extract_endpoints;
use crate::error::{DeployError, DeployPhase, Result};
use crate::observer::{DeployEvent, DeployObserver, TracingObserver};
use crate::poller::StatusPoller;

/// Availability of one endpoint at the end of a deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointReport {
    pub endpoint: Endpoint,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ProbeOutcome> for EndpointReport {
    fn from(outcome: ProbeOutcome) -> Self {
        Self {
            reachable: outcome.is_reachable(),
            error: outcome.result.err().map(|e| e.to_string()),
            endpoint: outcome.endpoint,
        }
    }
}

/// Outcome of a successful deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub app: AppName,

    /// Release the rack reports as active after promotion
    pub release: ReleaseId,

    /// Release produced by this run's build
    pub built_release: ReleaseId,

    pub endpoints: Vec<EndpointReport>,
}

impl DeployReport {
    /// One `"<name>: <url>"` line per reachable endpoint.
    pub fn summary_lines(&self) -> Vec<String> {
        self.endpoints
            .iter()
            .filter(|e| e.reachable)
            .map(|e| e.endpoint.to_string())
            .collect()
    }

    pub fn unreachable(&self) -> impl Iterator<Item = &EndpointReport> {
        self.endpoints.iter().filter(|e| !e.reachable)
    }
}

/// Drives deploys against one rack
pub struct Orchestrator {
    api: AppsApi,
    builder: Arc<dyn ReleaseBuilder>,
    prober: Prober,
    observer: Arc<dyn DeployObserver>,
    config: DeployConfig,
}

impl Orchestrator {
    pub fn builder(
        plane: Arc<dyn ControlPlane>,
        release_builder: Arc<dyn ReleaseBuilder>,
    ) -> OrchestratorBuilder {
        OrchestratorBuilder::new(plane, release_builder)
    }

    /// Deploy `source_dir` as `app` and wait for every endpoint.
    ///
    /// Returns the first failing phase's error. Nothing is rolled back: an
    /// app created here stays in place when a later phase fails.
    pub async fn deploy(&self, source_dir: &Path, app: &AppName) -> Result<DeployReport> {
        let run = DeployRunId::generate();
        let span = info_span!("deploy", run = %run, app = %app);
        let work = self.run(source_dir, app).instrument(span);

        match self.config.deploy_deadline {
            Some(deadline) => tokio::time::timeout(deadline, work)
                .await
                .unwrap_or_else(|_| {
                    Err(DeployError::Timeout {
                        operation: format!("deploy of {}", app),
                    })
                }),
            None => work.await,
        }
    }

    async fn run(&self, source_dir: &Path, app: &AppName) -> Result<DeployReport> {
        self.ensure_app(app).await?;

        let built_release = self.build(source_dir, app).await?;
        self.promote(app, &built_release).await?;

        self.poller()
            .wait_for_running(
                &self.api,
                app,
                DeployPhase::WaitForRunning,
                self.observer.as_ref(),
            )
            .await?;

        let descriptor = self.fetch_descriptor(app).await?;
        let release = descriptor
            .active_release()
            .unwrap_or_else(|| built_release.clone());
        self.observer.on_event(&DeployEvent::Released {
            release: release.clone(),
        });

        let endpoints = extract_endpoints(&descriptor.outputs);
        let endpoints = self.wait_for_endpoints(endpoints).await?;

        info!(release = %release, endpoints = endpoints.len(), "deploy complete");

        Ok(DeployReport {
            app: app.clone(),
            release,
            built_release,
            endpoints,
        })
    }

    fn poller(&self) -> StatusPoller {
        StatusPoller::new(self.config.poll_interval).with_deadline(self.config.poll_deadline)
    }

    #[instrument(skip(self))]
    async fn ensure_app(&self, app: &AppName) -> Result<()> {
        if let Some(existing) = self.api.get_app(app).await? {
            debug!(status = %existing.status, "app exists");
            return Ok(());
        }

        self.observer
            .on_event(&DeployEvent::CreatingApp { app: app.clone() });
        self.api.create_app(app).await?;

        self.poller()
            .wait_for_running(
                &self.api,
                app,
                DeployPhase::EnsureApp,
                self.observer.as_ref(),
            )
            .await?;

        self.observer
            .on_event(&DeployEvent::AppCreated { app: app.clone() });
        Ok(())
    }

    #[instrument(skip(self))]
    async fn build(&self, source_dir: &Path, app: &AppName) -> Result<ReleaseId> {
        self.observer.on_event(&DeployEvent::Building {
            app: app.clone(),
            source_dir: source_dir.to_path_buf(),
        });

        let release = self.builder.build(source_dir, app).await?;

        self.observer.on_event(&DeployEvent::Built {
            release: release.clone(),
        });
        Ok(release)
    }

    #[instrument(skip(self))]
    async fn promote(&self, app: &AppName, release: &ReleaseId) -> Result<()> {
        self.observer.on_event(&DeployEvent::Promoting {
            release: release.clone(),
        });
        self.api.promote_release(app, release).await?;
        Ok(())
    }

    async fn fetch_descriptor(&self, app: &AppName) -> Result<Application> {
        self.api
            .get_app(app)
            .await?
            .ok_or_else(|| DeployError::AppNotFound(app.clone()))
    }

    async fn wait_for_endpoints(&self, endpoints: Vec<Endpoint>) -> Result<Vec<EndpointReport>> {
        self.observer.on_event(&DeployEvent::WaitingForEndpoints {
            endpoints: endpoints.clone(),
        });

        let outcomes = self.prober.probe_all(endpoints).await;

        for outcome in &outcomes {
            let event = match &outcome.result {
                Ok(reachable) => DeployEvent::EndpointReachable {
                    endpoint: outcome.endpoint.clone(),
                    attempts: reachable.attempts,
                },
                Err(e) => DeployEvent::EndpointUnreachable {
                    endpoint: outcome.endpoint.clone(),
                    error: e.to_string(),
                },
            };
            self.observer.on_event(&event);
        }

        let reports: Vec<EndpointReport> = outcomes.into_iter().map(EndpointReport::from).collect();

        if self.config.availability.require_all {
            let unreachable: Vec<String> = reports
                .iter()
                .filter(|r| !r.reachable)
                .map(|r| r.endpoint.to_string())
                .collect();
            if !unreachable.is_empty() {
                return Err(DeployError::Unavailable {
                    endpoints: unreachable,
                });
            }
        }

        Ok(reports)
    }
}

/// Builder for [`Orchestrator`]
pub struct OrchestratorBuilder {
    plane: Arc<dyn ControlPlane>,
    release_builder: Arc<dyn ReleaseBuilder>,
    check: Option<Arc<dyn AvailabilityCheck>>,
    observer: Option<Arc<dyn DeployObserver>>,
    config: DeployConfig,
}

impl OrchestratorBuilder {
    pub fn new(plane: Arc<dyn ControlPlane>, release_builder: Arc<dyn ReleaseBuilder>) -> Self {
        Self {
            plane,
            release_builder,
            check: None,
            observer: None,
            config: DeployConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DeployConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the HTTP reachability check.
    pub fn with_check(mut self, check: Arc<dyn AvailabilityCheck>) -> Self {
        self.check = Some(check);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn DeployObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Orchestrator {
        let policy = self.config.availability.probe.clone();
        let prober = match self.check {
            Some(check) => Prober::new(check, policy),
            None => Prober::http(policy),
        };
        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(TracingObserver) as Arc<dyn DeployObserver>);

        Orchestrator {
            api: AppsApi::new(self.plane),
            builder: self.release_builder,
            prober,
            observer,
            config: self.config,
        }
    }
}
