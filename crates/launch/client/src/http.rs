//! reqwest-backed control plane

use crate::config::{ClientConfig, AUTH_USER};
use crate::error::{ClientError, ClientResult};
use crate::plane::ControlPlane;
use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, StatusCode};
use tracing::debug;

/// Client version sent to the rack in the `Version` header.
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for communicating with the rack
pub struct HttpControlPlane {
    client: Client,
    base_url: String,
    password: Option<String>,
}

impl HttpControlPlane {
    /// Create a new client from connection settings
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            password: config.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Version", CLIENT_VERSION);
        match &self.password {
            Some(password) => request.basic_auth(AUTH_USER, Some(password)),
            None => request,
        }
    }

    async fn send(&self, method: &str, path: &str, request: RequestBuilder) -> ClientResult<Vec<u8>> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        debug!(method, path, status = status.as_u16(), "control plane response");

        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(path.to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: message.trim().to_string(),
            })
        }
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn get(&self, path: &str) -> ClientResult<Vec<u8>> {
        let request = self.client.get(self.url(path));
        self.send("GET", path, request).await
    }

    async fn post(&self, path: &str) -> ClientResult<Vec<u8>> {
        let request = self.client.post(self.url(path));
        self.send("POST", path, request).await
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> ClientResult<Vec<u8>> {
        let request = self.client.post(self.url(path)).form(form);
        self.send("POST", path, request).await
    }

    async fn upload(
        &self,
        path: &str,
        field: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> ClientResult<Vec<u8>> {
        let part = multipart::Part::bytes(contents).file_name(file_name.to_string());
        let form = multipart::Form::new().part(field.to_string(), part);
        let request = self.client.post(self.url(path)).multipart(form);
        self.send("POST", path, request).await
    }
}
