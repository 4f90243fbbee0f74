//! Scripted transport for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};

use crate::error::Result;
use crate::http::{HttpResponse, Transport};

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    /// Header value as a string, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Transport that replays scripted responses in order and records every
/// request it sees.
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Queue a response with the given status and body.
    pub fn push(&self, status: u16, body: &str) {
        self.push_with_headers(status, &[], body);
    }

    /// Queue a response with extra headers.
    pub fn push_with_headers(&self, status: u16, headers: &[(&str, &str)], body: &str) {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        self.responses.lock().unwrap().push_back(HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: map,
            body: Bytes::from(body.to_string()),
        });
    }

    /// All requests issued so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            url: url.to_string(),
            headers,
            body,
        });
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for {} {}", method, url));
        Ok(response)
    }
}

/// JSON descriptor for a file item.
pub(crate) fn file_item_json(name: &str, size: u64) -> String {
    format!(
        r#"{{"id":"id-{name}","name":"{name}","size":{size},
            "lastModifiedDateTime":"2024-05-01T12:00:00Z",
            "file":{{"mimeType":"application/octet-stream"}}}}"#
    )
}

/// JSON descriptor for a folder item.
pub(crate) fn folder_item_json(name: &str) -> String {
    format!(
        r#"{{"id":"id-{name}","name":"{name}","size":0,
            "lastModifiedDateTime":"2024-05-01T12:00:00Z",
            "folder":{{"childCount":0}}}}"#
    )
}

/// JSON children page wrapping the given item descriptors.
pub(crate) fn children_page_json(items: &[String], next_link: Option<&str>) -> String {
    let value = items.join(",");
    match next_link {
        Some(link) => format!(r#"{{"value":[{value}],"@odata.nextLink":"{link}"}}"#),
        None => format!(r#"{{"value":[{value}]}}"#),
    }
}
