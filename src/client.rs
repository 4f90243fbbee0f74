//! Drive client: configuration, transport and path resolution wired together.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

use crate::config::DriveConfig;
use crate::error::Result;
use crate::http::{GraphTransport, HttpResponse, Transport};
use crate::path::PathResolver;

/// Base URL for the Graph drive API.
const GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0/me/drive";

/// Client-side adapter exposing a OneDrive drive through a filesystem-like
/// API.
///
/// The client holds no mutable state: every call resolves paths and session
/// state freshly, so independent calls may run concurrently from separate
/// tasks.
#[derive(Clone)]
pub struct DriveClient {
    transport: Arc<dyn Transport>,
    resolver: PathResolver,
    config: DriveConfig,
}

// Manual impl: the transport is a trait object without a Debug bound.
impl fmt::Debug for DriveClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveClient")
            .field("resolver", &self.resolver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DriveClient {
    /// Create a client backed by the default reqwest transport.
    ///
    /// Validates the configuration (chunk alignment, root identifier)
    /// before anything touches the network.
    pub fn new(config: DriveConfig) -> Result<Self> {
        let transport = Arc::new(GraphTransport::new(&config)?);
        Self::with_transport(config, transport)
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: DriveConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let resolver = PathResolver::new(&config.root, config.addressing);
        Ok(Self {
            transport,
            resolver,
            config,
        })
    }

    /// The path resolver for this client's root and addressing mode.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Absolute URL for a drive reference.
    pub(crate) fn endpoint(&self, reference: &str) -> String {
        format!("{}{}", GRAPH_BASE, reference)
    }

    pub(crate) async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.transport
            .request(Method::GET, url, HeaderMap::new(), None)
            .await
    }

    pub(crate) async fn delete_request(&self, url: &str) -> Result<HttpResponse> {
        self.transport
            .request(Method::DELETE, url, HeaderMap::new(), None)
            .await
    }

    pub(crate) async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        self.send_json(Method::POST, url, body).await
    }

    pub(crate) async fn patch_json(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        self.send_json(Method::PATCH, url, body).await
    }

    pub(crate) async fn put_bytes(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<HttpResponse> {
        self.transport
            .request(Method::PUT, url, headers, Some(body))
            .await
    }

    async fn send_json(&self, method: Method, url: &str, body: &Value) -> Result<HttpResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let body = Bytes::from(serde_json::to_vec(body)?);
        self.transport.request(method, url, headers, Some(body)).await
    }
}
