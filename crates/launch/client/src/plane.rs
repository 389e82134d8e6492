//! Raw control-plane transport

use crate::error::ClientResult;
use async_trait::async_trait;

/// Request/response contract with the rack
///
/// Implementations return the raw response payload for any 2xx answer and
/// an error for everything else. A 404 must surface as
/// [`ClientError::NotFound`](crate::ClientError::NotFound) so callers can
/// tell a missing resource from a failed request.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// `GET {path}`
    async fn get(&self, path: &str) -> ClientResult<Vec<u8>>;

    /// `POST {path}` with an empty body
    async fn post(&self, path: &str) -> ClientResult<Vec<u8>>;

    /// `POST {path}` with an url-encoded form body
    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> ClientResult<Vec<u8>>;

    /// `POST {path}` with a multipart body carrying one file field
    async fn upload(
        &self,
        path: &str,
        field: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> ClientResult<Vec<u8>>;
}
