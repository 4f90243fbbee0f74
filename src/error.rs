//! Error types for the graphdrive library.

use thiserror::Error;

/// Main error type for graphdrive operations.
#[derive(Error, Debug)]
pub enum DriveError {
    /// Invalid configuration, detected before any network activity.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upload session URL returned 404: the session has expired and the
    /// whole upload must be restarted with a fresh session.
    #[error("Upload session expired for '{path}'")]
    SessionExpired { path: String },

    /// A chunk kept failing with server errors until the retry ceiling was hit.
    #[error("Upload of '{path}' failed after {attempts} retries (last status {status})")]
    UploadFailed {
        path: String,
        attempts: u32,
        status: u16,
    },

    /// Name collision at the destination, reported on the final chunk.
    #[error("Name conflict at '{path}'")]
    Conflict { path: String },

    /// Unexpected status during an upload.
    #[error("Upload of '{path}' failed with HTTP {status}")]
    Upload { path: String, status: u16 },

    /// A single-request operation (delete, move, copy, ...) failed.
    #[error("{op} failed for '{path}' with HTTP {status}")]
    Operation {
        op: &'static str,
        path: String,
        status: u16,
    },

    /// Malformed item descriptor from the remote service.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// A directory listing could not be completed; partial results are discarded.
    #[error("Listing of '{path}' failed with HTTP {status}")]
    Listing { path: String, status: u16 },

    /// Network request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for graphdrive operations.
pub type Result<T> = std::result::Result<T, DriveError>;
