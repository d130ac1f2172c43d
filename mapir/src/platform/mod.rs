//! HTTP transport used to execute [`ApiRequest`]s.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::MapirError;
use crate::request::ApiRequest;

pub mod native;

/// Default transport implementation for the current platform.
pub type DefaultTransport = native::ReqwestTransport;

/// Raw response of the server.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Returns true if the status code is `2xx`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Asynchronous HTTP transport.
///
/// Dropping the future returned by [`HttpTransport::execute`] must abort the request. This is how
/// the client cancels operations that are not needed anymore.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the response. Any status code is considered a successful
    /// execution; only network failures and timeouts return [`MapirError::Transport`].
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, MapirError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, MapirError> {
        (**self).execute(request).await
    }
}
