//! HTTP reachability check.
//!
//! An endpoint counts as reachable once its load balancer answers at all,
//! whatever the status code.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::AvailabilityCheck;
use crate::error::{HealthError, HealthResult};

/// Reachability check issuing a plain `GET`.
#[derive(Clone)]
pub struct HttpCheck {
    client: Client,
}

impl HttpCheck {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilityCheck for HttpCheck {
    #[instrument(skip(self), fields(check = "http"))]
    async fn check(&self, url: &str) -> HealthResult<()> {
        let parsed = Url::parse(url).map_err(|e| HealthError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| HealthError::CheckFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        debug!(status = response.status().as_u16(), "endpoint answered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_any_answer_is_reachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        HttpCheck::new().check(&server.uri()).await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused_fails_attempt() {
        let err = HttpCheck::new()
            .check("http://127.0.0.1:1")
            .await
            .unwrap_err();
        assert!(matches!(err, HealthError::CheckFailed { .. }));
    }

    #[tokio::test]
    async fn test_malformed_url_fails_attempt() {
        let err = HttpCheck::new()
            .check("http://10.0.0.1:10.0.0.1")
            .await
            .unwrap_err();
        assert!(matches!(err, HealthError::InvalidUrl { .. }));
    }
}
