//! Build records
//!
//! A build turns an uploaded source archive into a release. The rack reports
//! progress through `GET /apps/{name}/builds/{id}`.

use crate::error::TypesError;
use crate::ids::{BuildId, ReleaseId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Progress of a build on the rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildStatus {
    Created,
    Running,
    Complete,
    Failed,
    Error,
    Timeout,
}

impl BuildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Created => "created",
            BuildStatus::Running => "running",
            BuildStatus::Complete => "complete",
            BuildStatus::Failed => "failed",
            BuildStatus::Error => "error",
            BuildStatus::Timeout => "timeout",
        }
    }

    /// Has the build stopped, successfully or not?
    pub fn is_finished(&self) -> bool {
        !matches!(self, BuildStatus::Created | BuildStatus::Running)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Complete)
    }
}

impl FromStr for BuildStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "created" => Ok(BuildStatus::Created),
            // older racks report "building" for in-flight builds
            "running" | "building" => Ok(BuildStatus::Running),
            "complete" => Ok(BuildStatus::Complete),
            "failed" => Ok(BuildStatus::Failed),
            "error" => Ok(BuildStatus::Error),
            "timeout" => Ok(BuildStatus::Timeout),
            other => Err(TypesError::UnknownBuildStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for BuildStatus {
    type Error = TypesError;

    // `Self::Error` would be ambiguous with the `Error` variant.
    fn try_from(value: String) -> Result<Self, TypesError> {
        value.parse()
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build record returned by the rack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: BuildId,

    pub status: BuildStatus,

    /// Release produced by the build; set once the build completes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseId>,

    /// Failure reason reported by the rack
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_completed_build() {
        let build: Build =
            serde_json::from_slice(br#"{"id": "BXYZ", "status": "complete", "release": "RXYZ"}"#)
                .unwrap();
        assert_eq!(build.id, BuildId::new("BXYZ"));
        assert!(build.status.is_finished());
        assert!(build.status.is_success());
        assert_eq!(build.release, Some(ReleaseId::new("RXYZ")));
    }

    #[test]
    fn test_status_from_owned_string() {
        assert_eq!(
            BuildStatus::try_from("error".to_string()).unwrap(),
            BuildStatus::Error
        );
        assert!(BuildStatus::try_from("queued".to_string()).is_err());
    }

    #[test]
    fn test_legacy_building_token() {
        assert_eq!("building".parse::<BuildStatus>().unwrap(), BuildStatus::Running);
        assert!(!BuildStatus::Running.is_finished());
    }

    #[test]
    fn test_failed_build_is_finished_but_not_success() {
        for status in [BuildStatus::Failed, BuildStatus::Error, BuildStatus::Timeout] {
            assert!(status.is_finished());
            assert!(!status.is_success());
        }
    }

    #[test]
    fn test_unknown_build_status() {
        assert_eq!(
            "queued".parse::<BuildStatus>().unwrap_err(),
            TypesError::UnknownBuildStatus("queued".to_string())
        );
    }
}
