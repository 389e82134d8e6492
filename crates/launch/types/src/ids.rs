//! Strongly-typed identifiers for launch entities
//!
//! Identifiers handed out by the rack are opaque strings; they are wrapped in
//! newtypes so a release id can never be passed where a build id is expected.

use crate::error::{TypesError, TypesResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

/// Name of an application on the rack
///
/// Names are lowercase ASCII alphanumerics separated by single dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppName(String);

impl AppName {
    /// Validate and wrap an application name.
    pub fn new(name: impl Into<String>) -> TypesResult<Self> {
        let name = name.into();
        let invalid = |reason: &str| TypesError::InvalidAppName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid(
                "only lowercase letters, digits and '-' are allowed",
            ));
        }
        if name.starts_with('-') || name.ends_with('-') {
            return Err(invalid("name must not start or end with '-'"));
        }

        Ok(Self(name))
    }

    /// Derive an application name from the last component of a directory.
    ///
    /// The directory should already be canonical so that `.` resolves to a
    /// real name.
    pub fn infer_from_dir(dir: &Path) -> TypesResult<Self> {
        let base = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut name = String::with_capacity(base.len());
        for c in base.chars() {
            if c.is_ascii_alphanumeric() {
                name.push(c.to_ascii_lowercase());
            } else if !name.ends_with('-') {
                name.push('-');
            }
        }

        let trimmed = name.trim_matches('-');
        if trimmed.is_empty() {
            return Err(TypesError::InvalidAppName {
                name: base,
                reason: format!("cannot infer an app name from {}", dir.display()),
            });
        }

        Self::new(trimmed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AppName {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AppName> for String {
    fn from(name: AppName) -> Self {
        name.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an immutable release produced by a build
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseId(String);

impl ReleaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a build running on the rack
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(String);

impl BuildId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local identifier for one deploy run, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeployRunId(Uuid);

impl DeployRunId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DeployRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_app_name_accepts_valid_names() {
        assert_eq!(AppName::new("web").unwrap().as_str(), "web");
        assert_eq!(AppName::new("my-app-2").unwrap().as_str(), "my-app-2");
    }

    #[test]
    fn test_app_name_rejects_invalid_names() {
        assert!(AppName::new("").is_err());
        assert!(AppName::new("MyApp").is_err());
        assert!(AppName::new("my_app").is_err());
        assert!(AppName::new("-app").is_err());
        assert!(AppName::new("app-").is_err());
    }

    #[test]
    fn test_infer_from_dir() {
        let name = AppName::infer_from_dir(&PathBuf::from("/home/dev/My_Cool.App")).unwrap();
        assert_eq!(name.as_str(), "my-cool-app");

        let name = AppName::infer_from_dir(&PathBuf::from("/srv/httpd")).unwrap();
        assert_eq!(name.as_str(), "httpd");
    }

    #[test]
    fn test_infer_from_dir_without_usable_name() {
        assert!(AppName::infer_from_dir(&PathBuf::from("/")).is_err());
        assert!(AppName::infer_from_dir(&PathBuf::from("/tmp/___")).is_err());
    }

    #[test]
    fn test_app_name_serde_validates() {
        let ok: AppName = serde_json::from_str("\"billing\"").unwrap();
        assert_eq!(ok.as_str(), "billing");
        assert!(serde_json::from_str::<AppName>("\"Billing\"").is_err());
    }

    #[test]
    fn test_deploy_run_id_generation() {
        let id1 = DeployRunId::generate();
        let id2 = DeployRunId::generate();
        assert_ne!(id1, id2);
        assert!(id1.to_string().starts_with("run:"));
    }
}
