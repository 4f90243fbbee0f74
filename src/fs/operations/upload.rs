//! Upload operations: single-shot and chunked resumable uploads.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_RANGE};
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::client::DriveClient;
use crate::config::SIMPLE_UPLOAD_LIMIT;
use crate::error::{DriveError, Result};
use crate::fs::item::DriveItem;
use crate::path::PathResolver;

/// Retry ceiling per chunk; shared by rate-limit and server-error retries.
const MAX_CHUNK_RETRIES: u32 = 10;

/// Wait applied on 429 responses without a Retry-After header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// An in-progress resumable upload.
///
/// Owned exclusively by the upload call that created it; never shared and
/// never persisted. An expired session cannot be resumed, only rebuilt.
struct UploadSession {
    upload_url: String,
    total: u64,
    offset: u64,
    chunk_size: u64,
}

impl DriveClient {
    /// Upload a file's contents to a logical path.
    ///
    /// Payloads up to 4 MiB go through a single `PUT`; larger payloads use a
    /// resumable upload session with chunked transfer and bounded retries.
    /// Missing parent folders of the destination are created first.
    pub async fn upload(&self, path: &str, contents: &[u8]) -> Result<DriveItem> {
        if contents.len() as u64 <= SIMPLE_UPLOAD_LIMIT {
            self.upload_small(path, contents).await
        } else {
            self.upload_chunked(path, contents).await
        }
    }

    /// Single-request upload of a small payload.
    async fn upload_small(&self, path: &str, contents: &[u8]) -> Result<DriveItem> {
        let url = self.endpoint(&self.resolver().content_reference(path));
        debug!(path, bytes = contents.len(), "single-shot upload");

        let response = self
            .put_bytes(&url, HeaderMap::new(), Bytes::copy_from_slice(contents))
            .await?;
        if !response.is_success() {
            return Err(DriveError::Upload {
                path: path.to_string(),
                status: response.status.as_u16(),
            });
        }
        response.json()
    }

    /// Chunked upload through a resumable session.
    async fn upload_chunked(&self, path: &str, contents: &[u8]) -> Result<DriveItem> {
        let (parent, _) = PathResolver::split_parent(path);
        self.ensure_directory_exists(&parent).await?;

        let session = self
            .create_upload_session(path, contents.len() as u64)
            .await?;
        self.drive_session(path, session, contents).await
    }

    /// Request a fresh upload session for a destination path.
    async fn create_upload_session(&self, path: &str, total: u64) -> Result<UploadSession> {
        let url = self.endpoint(&self.resolver().upload_session_reference(path));
        let response = self.post_json(&url, &json!({})).await?;
        if !response.is_success() {
            return Err(DriveError::Upload {
                path: path.to_string(),
                status: response.status.as_u16(),
            });
        }

        let body: Value = response.json()?;
        let upload_url = body
            .get("uploadUrl")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                DriveError::Metadata(format!(
                    "upload session response for '{}' has no uploadUrl",
                    path
                ))
            })?
            .to_string();

        debug!(path, total, "upload session created");
        Ok(UploadSession {
            upload_url,
            total,
            offset: 0,
            chunk_size: self.config().chunk_size,
        })
    }

    /// Push chunks through a session until it completes or fails.
    ///
    /// Retries are an explicit bounded loop. Neither a rate limit nor a
    /// server error advances the offset, since the chunk was not
    /// acknowledged; the attempt counter resets when a chunk is accepted.
    async fn drive_session(
        &self,
        path: &str,
        mut session: UploadSession,
        contents: &[u8],
    ) -> Result<DriveItem> {
        let mut attempt: u32 = 0;

        // The payload is non-empty here, so the last chunk always exists
        // and the final-chunk arm is the loop's exit.
        loop {
            let end = (session.offset + session.chunk_size).min(session.total);
            let chunk = &contents[session.offset as usize..end as usize];
            let last = end == session.total;

            let range = format!("bytes {}-{}/{}", session.offset, end - 1, session.total);
            let mut headers = HeaderMap::new();
            headers.insert(
                CONTENT_RANGE,
                HeaderValue::from_str(&range).map_err(|e| {
                    DriveError::Metadata(format!("invalid Content-Range '{}': {}", range, e))
                })?,
            );
            headers.insert(CONTENT_LENGTH, HeaderValue::from(chunk.len() as u64));

            let response = self
                .put_bytes(&session.upload_url, headers, Bytes::copy_from_slice(chunk))
                .await?;
            let status = response.status.as_u16();

            if status == 404 {
                // The session is gone; the caller must start over.
                warn!(path, offset = session.offset, "upload session expired");
                return Err(DriveError::SessionExpired {
                    path: path.to_string(),
                });
            }

            if status == 429 {
                if attempt >= MAX_CHUNK_RETRIES {
                    return Err(DriveError::UploadFailed {
                        path: path.to_string(),
                        attempts: attempt,
                        status,
                    });
                }
                let wait = response.retry_after().unwrap_or(DEFAULT_RETRY_AFTER);
                warn!(
                    path,
                    offset = session.offset,
                    wait_secs = wait.as_secs(),
                    "rate limited"
                );
                sleep(wait).await;
                attempt += 1;
                continue;
            }

            if status >= 500 {
                if attempt >= MAX_CHUNK_RETRIES {
                    return Err(DriveError::UploadFailed {
                        path: path.to_string(),
                        attempts: attempt,
                        status,
                    });
                }
                let wait = Duration::from_secs(1u64 << attempt);
                warn!(
                    path,
                    offset = session.offset,
                    status,
                    wait_secs = wait.as_secs(),
                    "server error, backing off"
                );
                sleep(wait).await;
                attempt += 1;
                continue;
            }

            if last {
                return match status {
                    409 => Err(DriveError::Conflict {
                        path: path.to_string(),
                    }),
                    200 | 201 => {
                        debug!(path, total = session.total, "upload completed");
                        response.json()
                    }
                    _ => Err(DriveError::Upload {
                        path: path.to_string(),
                        status,
                    }),
                };
            }

            if status != 202 {
                return Err(DriveError::Upload {
                    path: path.to_string(),
                    status,
                });
            }

            session.offset = end;
            attempt = 0;
        }
    }
}
