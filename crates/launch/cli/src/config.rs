//! CLI configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of `<config_dir>/launch/config.toml`
///
/// Every field is optional; command-line flags and environment variables
/// take precedence over the file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LaunchConfig {
    /// Rack address
    pub host: Option<String>,

    /// Rack password
    pub password: Option<String>,

    /// Delay between status polls in milliseconds
    pub poll_interval_ms: Option<u64>,

    /// Upper bound on each status wait in seconds
    pub poll_timeout_secs: Option<u64>,

    /// Upper bound on a whole deploy in seconds
    pub timeout_secs: Option<u64>,

    /// Attempts per endpoint before giving up
    pub probe_attempts: Option<u32>,

    /// Report endpoints that never answer instead of failing the deploy
    pub best_effort: Option<bool>,
}

impl LaunchConfig {
    /// Load configuration from file
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_config_path() {
                Some(p) => p,
                None => return Ok(LaunchConfig::default()),
            },
        };

        if !config_path.exists() {
            return Ok(LaunchConfig::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        toml::from_str(&contents)
            .map_err(|e| CliError::Config(format!("{}: {}", config_path.display(), e)))
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("launch").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_config() {
        let config = LaunchConfig::load(Some(Path::new("/nonexistent/launch.toml"))).unwrap();
        assert_eq!(config, LaunchConfig::default());
    }

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "host = \"rack.example.com\"\npassword = \"secret\"\npoll_interval_ms = 250\nprobe_attempts = 10\n",
        )
        .unwrap();

        let config = LaunchConfig::load(Some(&path)).unwrap();

        assert_eq!(config.host.as_deref(), Some("rack.example.com"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.poll_interval_ms, Some(250));
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.probe_attempts, Some(10));
        assert_eq!(config.best_effort, None);
    }

    #[test]
    fn test_load_wait_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "poll_timeout_secs = 300\nbest_effort = true\n").unwrap();

        let config = LaunchConfig::load(Some(&path)).unwrap();

        assert_eq!(config.poll_timeout_secs, Some(300));
        assert_eq!(config.best_effort, Some(true));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "hots = \"typo\"\n").unwrap();

        let err = LaunchConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
