use async_trait::async_trait;
use log::{debug, trace};

use crate::error::MapirError;
use crate::platform::{HttpTransport, RawResponse};
use crate::request::ApiRequest;

/// Transport sending requests with [`reqwest`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a new transport with its own connection pool.
    pub fn new() -> Result<Self, MapirError> {
        let http_client = reqwest::Client::builder().https_only(true).build()?;
        Ok(Self { http_client })
    }

    /// Creates a transport using the given client.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, MapirError> {
        let ApiRequest {
            method,
            url,
            headers,
            timeout,
        } = request;

        trace!("Sending {method} {url}");
        let response = self
            .http_client
            .request(method, url.clone())
            .headers(headers)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!("Received {status} from {url}, {} bytes", body.len());

        Ok(RawResponse { status, body })
    }
}
