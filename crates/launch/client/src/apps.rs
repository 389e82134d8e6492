//! Typed application, release and build calls

use crate::error::{ClientError, ClientResult};
use crate::plane::ControlPlane;
use launch_types::{parse_status, AppName, AppStatus, Application, Build, BuildId, ReleaseId};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Multipart field carrying the source archive of a build.
pub const SOURCE_FIELD: &str = "source";

/// Typed facade over a [`ControlPlane`]
#[derive(Clone)]
pub struct AppsApi {
    plane: Arc<dyn ControlPlane>,
}

impl AppsApi {
    pub fn new(plane: Arc<dyn ControlPlane>) -> Self {
        Self { plane }
    }

    // ========== Apps ==========

    /// Fetch an application descriptor; `None` when the rack has no such app.
    pub async fn get_app(&self, app: &AppName) -> ClientResult<Option<Application>> {
        let path = format!("/apps/{}", app);
        match self.plane.get(&path).await {
            Ok(payload) => decode(&path, &payload).map(Some),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Ask the rack to create an application.
    ///
    /// Only the request outcome matters; whatever body the rack answers
    /// with is ignored.
    pub async fn create_app(&self, app: &AppName) -> ClientResult<()> {
        self.plane
            .post_form("/apps", &[("name", app.as_str())])
            .await?;
        debug!(app = %app, "app create requested");
        Ok(())
    }

    /// Current status of an application.
    pub async fn app_status(&self, app: &AppName) -> ClientResult<AppStatus> {
        let payload = self.plane.get(&format!("/apps/{}/status", app)).await?;
        Ok(parse_status(&payload)?)
    }

    // ========== Releases ==========

    /// Make `release` the active release of `app`.
    pub async fn promote_release(&self, app: &AppName, release: &ReleaseId) -> ClientResult<()> {
        self.plane
            .post(&format!("/apps/{}/releases/{}/promote", app, release))
            .await?;
        Ok(())
    }

    // ========== Builds ==========

    /// Upload a gzipped source tarball and start a build.
    pub async fn create_build(&self, app: &AppName, archive: Vec<u8>) -> ClientResult<Build> {
        let path = format!("/apps/{}/builds", app);
        let payload = self
            .plane
            .upload(&path, SOURCE_FIELD, "source.tgz", archive)
            .await?;
        decode(&path, &payload)
    }

    /// Fetch the current state of a build.
    pub async fn get_build(&self, app: &AppName, build: &BuildId) -> ClientResult<Build> {
        let path = format!("/apps/{}/builds/{}", app, build);
        let payload = self.plane.get(&path).await?;
        decode(&path, &payload)
    }
}

fn decode<T: DeserializeOwned>(path: &str, payload: &[u8]) -> ClientResult<T> {
    serde_json::from_slice(payload).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}
