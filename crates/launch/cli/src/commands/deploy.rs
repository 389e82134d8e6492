//! `launch deploy`

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use launch_build::ApiReleaseBuilder;
use launch_client::config::DEFAULT_HOST;
use launch_client::{ClientConfig, ControlPlane, HttpControlPlane};
use launch_deployment::{AvailabilityPolicy, DeployConfig, Orchestrator, StatusPoller};
use launch_health::ProbePolicy;
use launch_types::AppName;
use tracing::debug;

use crate::config::LaunchConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressObserver;

/// Arguments of `launch deploy`
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Source directory to deploy
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// App name (defaults to the directory name)
    #[arg(short, long)]
    pub app: Option<String>,
}

/// Values given on the command line; each one wins over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub host: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
    pub poll_timeout_secs: Option<u64>,
    pub probe_attempts: Option<u32>,
    pub best_effort: bool,
}

/// Connection and timing settings after merging flags over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub password: Option<String>,
    pub poll_interval: Duration,
    pub poll_deadline: Option<Duration>,
    pub deadline: Option<Duration>,
    pub probe_attempts: Option<u32>,
    pub require_all: bool,
}

impl Settings {
    pub fn resolve(config: &LaunchConfig, overrides: Overrides) -> Self {
        let defaults = DeployConfig::default();
        let best_effort = overrides.best_effort || config.best_effort.unwrap_or(false);
        Self {
            host: overrides
                .host
                .or_else(|| config.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            password: overrides.password.or_else(|| config.password.clone()),
            poll_interval: config
                .poll_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            poll_deadline: overrides
                .poll_timeout_secs
                .or(config.poll_timeout_secs)
                .map(Duration::from_secs),
            deadline: overrides
                .timeout_secs
                .or(config.timeout_secs)
                .map(Duration::from_secs),
            probe_attempts: overrides.probe_attempts.or(config.probe_attempts),
            require_all: !best_effort,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.host.clone());
        match &self.password {
            Some(password) => config.with_password(password.clone()),
            None => config,
        }
    }

    pub fn deploy_config(&self) -> DeployConfig {
        let mut config = DeployConfig::default().with_poll_interval(self.poll_interval);
        if let Some(deadline) = self.poll_deadline {
            config = config.with_poll_deadline(deadline);
        }
        if let Some(deadline) = self.deadline {
            config = config.with_deploy_deadline(deadline);
        }
        // Unbounded waits never give up on an endpoint, so best effort
        // only changes anything once attempts are capped.
        if let Some(attempts) = self.probe_attempts {
            config = config.with_availability(if self.require_all {
                AvailabilityPolicy {
                    probe: ProbePolicy::bounded(attempts),
                    require_all: true,
                }
            } else {
                AvailabilityPolicy::best_effort(attempts)
            });
        }
        config
    }
}

/// Canonical source directory and the app it deploys to.
pub fn resolve_target(dir: &Path, app: Option<&str>) -> CliResult<(PathBuf, AppName)> {
    let dir = std::fs::canonicalize(dir)
        .map_err(|e| CliError::InvalidInput(format!("{}: {}", dir.display(), e)))?;
    if !dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let app = match app {
        Some(name) => AppName::new(name)?,
        None => AppName::infer_from_dir(&dir)?,
    };
    Ok((dir, app))
}

/// Run a deploy and print its endpoints.
pub async fn execute(args: DeployArgs, settings: &Settings) -> CliResult<()> {
    let (dir, app) = resolve_target(&args.dir, args.app.as_deref())?;
    debug!(dir = %dir.display(), app = %app, host = %settings.host, "deploying");

    let plane: Arc<dyn ControlPlane> =
        Arc::new(HttpControlPlane::new(&settings.client_config())?);
    let builder = ApiReleaseBuilder::new(plane.clone())
        .with_poller(StatusPoller::new(settings.poll_interval));

    let observer = Arc::new(ProgressObserver::new());
    let orchestrator = Orchestrator::builder(plane, Arc::new(builder))
        .with_config(settings.deploy_config())
        .with_observer(observer.clone())
        .build();

    let result = orchestrator.deploy(&dir, &app).await;
    observer.finish();

    let report = result?;
    for line in report.summary_lines() {
        println!("{}", line);
    }
    Ok(())
}
