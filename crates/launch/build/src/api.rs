//! Builds on the rack's build service

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use launch_client::{AppsApi, ControlPlane};
use launch_deployment::{BuildError, ReleaseBuilder, StatusPoller};
use launch_types::{AppName, Build, BuildStatus, ReleaseId};
use tracing::{debug, info, instrument};

use crate::package::package_source;

/// Default delay between build status polls.
pub const DEFAULT_BUILD_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Uploads the source directory and waits for the rack to build it
#[derive(Clone)]
pub struct ApiReleaseBuilder {
    api: AppsApi,
    poller: StatusPoller,
}

impl ApiReleaseBuilder {
    pub fn new(plane: Arc<dyn ControlPlane>) -> Self {
        Self {
            api: AppsApi::new(plane),
            poller: StatusPoller::new(DEFAULT_BUILD_POLL_INTERVAL),
        }
    }

    pub fn with_poller(mut self, poller: StatusPoller) -> Self {
        self.poller = poller;
        self
    }

    async fn wait_for_build(&self, app: &AppName, build: Build) -> Result<Build, BuildError> {
        if build.status.is_finished() {
            return Ok(build);
        }

        let api = &self.api;
        let id = &build.id;
        self.poller
            .poll_until(&format!("build {} of {}", id, app), move || async move {
                let current = match api.get_build(app, id).await {
                    Ok(current) => current,
                    Err(e) => return Err(BuildError::from(e)),
                };
                debug!(build = %current.id, status = %current.status, "polled build");
                Ok(current.status.is_finished().then_some(current))
            })
            .await
    }
}

#[async_trait]
impl ReleaseBuilder for ApiReleaseBuilder {
    #[instrument(skip(self))]
    async fn build(&self, source_dir: &Path, app: &AppName) -> Result<ReleaseId, BuildError> {
        let archive = package_source(source_dir).await?;
        info!(bytes = archive.len(), "uploading source");

        let build = self.api.create_build(app, archive).await?;
        info!(build = %build.id, "build started");

        let build = self.wait_for_build(app, build).await?;
        settle(build)
    }
}

/// Release of a finished build, or why there is none.
fn settle(build: Build) -> Result<ReleaseId, BuildError> {
    match build.status {
        BuildStatus::Complete => build.release.ok_or_else(|| BuildError::MissingRelease {
            build: build.id.to_string(),
        }),
        status => Err(BuildError::Failed {
            build: build.id.to_string(),
            reason: build.reason.unwrap_or_else(|| status.to_string()),
        }),
    }
}
