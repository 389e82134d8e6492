//! ApiReleaseBuilder against a scripted build service.

use std::collections::VecDeque;
use std::fs;
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use flate2::read::GzDecoder;
use launch_build::ApiReleaseBuilder;
use launch_client::{ClientError, ClientResult, ControlPlane};
use launch_deployment::{BuildError, ReleaseBuilder, StatusPoller};
use launch_types::{AppName, ReleaseId};
use serde_json::json;
use tempfile::TempDir;

#[derive(Default)]
struct BuildService {
    uploads: Mutex<Vec<(String, String, String, Vec<u8>)>>,
    polls: Mutex<Vec<String>>,
    created: Mutex<Option<serde_json::Value>>,
    progress: Mutex<VecDeque<serde_json::Value>>,
}

impl BuildService {
    fn new(created: serde_json::Value, progress: Vec<serde_json::Value>) -> Self {
        Self {
            created: Mutex::new(Some(created)),
            progress: Mutex::new(progress.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ControlPlane for BuildService {
    async fn get(&self, path: &str) -> ClientResult<Vec<u8>> {
        self.polls.lock().unwrap().push(path.to_string());
        match self.progress.lock().unwrap().pop_front() {
            Some(build) => Ok(serde_json::to_vec(&build).unwrap()),
            None => Err(ClientError::NotFound(path.to_string())),
        }
    }

    async fn post(&self, path: &str) -> ClientResult<Vec<u8>> {
        Err(ClientError::NotFound(path.to_string()))
    }

    async fn post_form(&self, path: &str, _form: &[(&str, &str)]) -> ClientResult<Vec<u8>> {
        Err(ClientError::NotFound(path.to_string()))
    }

    async fn upload(
        &self,
        path: &str,
        field: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> ClientResult<Vec<u8>> {
        self.uploads.lock().unwrap().push((
            path.to_string(),
            field.to_string(),
            file_name.to_string(),
            contents,
        ));
        match self.created.lock().unwrap().take() {
            Some(build) => Ok(serde_json::to_vec(&build).unwrap()),
            None => Err(ClientError::Api {
                status: 500,
                message: "upload rejected".into(),
            }),
        }
    }
}

fn source() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Procfile"), "web: ./server\n").unwrap();
    fs::create_dir_all(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    dir
}

fn builder(service: &Arc<BuildService>) -> ApiReleaseBuilder {
    ApiReleaseBuilder::new(service.clone()).with_poller(StatusPoller::new(Duration::from_secs(2)))
}

fn web() -> AppName {
    AppName::new("web").unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_build_polls_until_complete() {
    let service = Arc::new(BuildService::new(
        json!({ "id": "B1", "status": "created" }),
        vec![
            json!({ "id": "B1", "status": "building" }),
            json!({ "id": "B1", "status": "running" }),
            json!({ "id": "B1", "status": "complete", "release": "R1" }),
        ],
    ));
    let dir = source();

    let start = tokio::time::Instant::now();
    let release = builder(&service).build(dir.path(), &web()).await.unwrap();

    assert_eq!(release, ReleaseId::new("R1"));
    assert_eq!(
        *service.polls.lock().unwrap(),
        vec!["/apps/web/builds/B1"; 3]
    );
    assert_eq!(start.elapsed(), Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_upload_carries_source_tarball() {
    let service = Arc::new(BuildService::new(
        json!({ "id": "B2", "status": "complete", "release": "R2" }),
        vec![],
    ));
    let dir = source();

    let release = builder(&service).build(dir.path(), &web()).await.unwrap();
    assert_eq!(release, ReleaseId::new("R2"));
    assert!(service.polls.lock().unwrap().is_empty());

    let uploads = service.uploads.lock().unwrap();
    let (path, field, file_name, archive) = &uploads[0];
    assert_eq!(path, "/apps/web/builds");
    assert_eq!(field, "source");
    assert_eq!(file_name, "source.tgz");

    let mut archive = tar::Archive::new(GzDecoder::new(archive.as_slice()));
    let mut names = Vec::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        let name = entry.path().unwrap().to_string_lossy().to_string();
        if name == "Procfile" {
            let mut contents = String::new();
            entry.read_to_string(&mut contents).unwrap();
            assert_eq!(contents, "web: ./server\n");
        }
        names.push(name);
    }
    assert_eq!(names, vec!["Procfile"]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_build_reports_reason() {
    let service = Arc::new(BuildService::new(
        json!({ "id": "B3", "status": "running" }),
        vec![json!({ "id": "B3", "status": "failed", "reason": "no Procfile" })],
    ));
    let dir = source();

    let err = builder(&service)
        .build(dir.path(), &web())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Build B3 failed: no Procfile");
}

#[tokio::test(start_paused = true)]
async fn test_upload_error_is_passed_through() {
    let service = Arc::new(BuildService::default());
    let dir = source();

    let err = builder(&service)
        .build(dir.path(), &web())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BuildError::Client(ClientError::Api { status: 500, .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_build_poll_deadline() {
    let service = Arc::new(BuildService::new(
        json!({ "id": "B4", "status": "running" }),
        vec![json!({ "id": "B4", "status": "running" }); 32],
    ));
    let dir = source();

    let err = ApiReleaseBuilder::new(service.clone())
        .with_poller(
            StatusPoller::new(Duration::from_secs(1)).with_deadline(Some(Duration::from_secs(5))),
        )
        .build(dir.path(), &web())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Timeout waiting for build B4 of web");
}

#[tokio::test]
async fn test_missing_source_dir() {
    let service = Arc::new(BuildService::default());
    let dir = TempDir::new().unwrap();

    let err = builder(&service)
        .build(&dir.path().join("missing"), &web())
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::Package { .. }));
    assert!(service.uploads.lock().unwrap().is_empty());
}
