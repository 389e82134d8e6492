//! Client configuration

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default rack endpoint when nothing is configured.
pub const DEFAULT_HOST: &str = "http://localhost:5443";

/// Basic-auth user name sent with every request.
pub const AUTH_USER: &str = "launch";

/// Connection settings for the control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Rack host; a bare host name is assumed to speak https
    pub host: String,

    /// Rack password, sent as basic auth
    pub password: Option<String>,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            password: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resolve the configured host into a base URL.
    pub fn base_url(&self) -> ClientResult<Url> {
        let raw = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("https://{}", self.host)
        };

        let url = Url::parse(&raw)
            .map_err(|e| ClientError::Config(format!("invalid host {:?}: {}", self.host, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::Config(format!(
                "unsupported scheme {:?} in host {:?}",
                other, self.host
            ))),
        }
    }
}
