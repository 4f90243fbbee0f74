//! HTTP transport for Graph API requests.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::DriveConfig;
use crate::error::Result;

/// A response from the remote service.
///
/// Headers come from reqwest's `HeaderMap`, which looks names up
/// case-insensitively (needed for `Retry-After`).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The `Retry-After` delay, if the response carries one.
    pub fn retry_after(&self) -> Option<Duration> {
        self.headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

/// Generic request/response capability the adapter is built on.
///
/// The production implementation is [`GraphTransport`]; tests inject a
/// scripted transport through the same seam.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a single HTTP request and return the full response.
    async fn request(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Result<HttpResponse>;
}

/// reqwest-backed transport with bearer authentication.
#[derive(Debug)]
pub struct GraphTransport {
    client: Client,
    access_token: String,
}

impl GraphTransport {
    /// Build a transport from the adapter configuration.
    pub fn new(config: &DriveConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            access_token: config.access_token.clone(),
        })
    }
}

#[async_trait]
impl Transport for GraphTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Result<HttpResponse> {
        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.access_token)
            .headers(headers);

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
