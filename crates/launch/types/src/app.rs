//! Application descriptor and lifecycle status
//!
//! The rack owns the application; these types are the local, point-in-time
//! view a client gets back from `GET /apps/{name}` and
//! `GET /apps/{name}/status`.

use crate::error::{TypesError, TypesResult};
use crate::ids::ReleaseId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Output key holding the host name of the application's load balancer.
pub const BALANCER_HOST_OUTPUT: &str = "BalancerHost";

/// Parameter key holding the currently active release.
pub const RELEASE_PARAMETER: &str = "Release";

/// Lifecycle status of an application as reported by the rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AppStatus {
    /// The application does not exist yet
    #[default]
    Absent,

    /// The application stack is being created
    Creating,

    /// The application is up and its outputs are valid
    Running,

    /// A release is being rolled out
    Updating,

    /// The application stack is being torn down
    Deleting,

    /// The last stack operation failed
    Failed,
}

impl AppStatus {
    /// Wire token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Absent => "absent",
            AppStatus::Creating => "creating",
            AppStatus::Running => "running",
            AppStatus::Updating => "updating",
            AppStatus::Deleting => "deleting",
            AppStatus::Failed => "failed",
        }
    }

    /// Is the application ready to serve its outputs?
    pub fn is_running(&self) -> bool {
        matches!(self, AppStatus::Running)
    }

    /// Will the application never reach `Running` without operator action?
    pub fn is_failed(&self) -> bool {
        matches!(self, AppStatus::Failed)
    }
}

impl FromStr for AppStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "absent" => Ok(AppStatus::Absent),
            "creating" => Ok(AppStatus::Creating),
            "running" => Ok(AppStatus::Running),
            "updating" => Ok(AppStatus::Updating),
            "deleting" => Ok(AppStatus::Deleting),
            "failed" => Ok(AppStatus::Failed),
            other => Err(TypesError::UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for AppStatus {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AppStatus> for String {
    fn from(status: AppStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application descriptor returned by the rack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Unique application name
    pub name: String,

    /// Status at the time the descriptor was fetched
    #[serde(default)]
    pub status: AppStatus,

    /// Stack parameters, including the active `Release` once promoted
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    /// Stack outputs; only meaningful while `status` is `Running`
    #[serde(default)]
    pub outputs: BTreeMap<String, String>,

    /// Free-form tags attached to the stack
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Application {
    /// Release currently promoted on this application, if any.
    pub fn active_release(&self) -> Option<ReleaseId> {
        self.parameters
            .get(RELEASE_PARAMETER)
            .filter(|r| !r.is_empty())
            .map(ReleaseId::new)
    }

    /// Load balancer host, present only for apps with public ports.
    pub fn balancer_host(&self) -> Option<&str> {
        self.outputs.get(BALANCER_HOST_OUTPUT).map(String::as_str)
    }
}

/// Parse a plain-text status payload such as `running\n`.
pub fn parse_status(payload: &[u8]) -> TypesResult<AppStatus> {
    String::from_utf8_lossy(payload).parse()
}
