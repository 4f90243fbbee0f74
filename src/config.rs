//! Adapter configuration.

use std::time::Duration;

use crate::error::{DriveError, Result};
use crate::path::Addressing;

/// Chunk boundaries must fall on multiples of this many bytes, per the
/// Graph upload-session contract.
pub const CHUNK_ALIGNMENT: u64 = 320 * 1024;

/// Payloads up to this size go through the single-request upload endpoint.
pub const SIMPLE_UPLOAD_LIMIT: u64 = 4 * 1024 * 1024;

/// Default chunk size: 10 alignment units (3 200 KiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 10 * CHUNK_ALIGNMENT;

/// Configuration for a [`DriveClient`](crate::DriveClient).
///
/// Every component receives its settings through this value at construction;
/// there is no process-wide state.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// OAuth bearer token for the Graph API. Token acquisition and refresh
    /// are the caller's responsibility.
    pub access_token: String,
    /// Drive-root identifier all logical paths are relative to, e.g. "root".
    pub root: String,
    /// Remote namespace selector: by-path or by-id item addressing.
    pub addressing: Addressing,
    /// Chunk size for resumable uploads, in bytes. Must be a positive
    /// multiple of [`CHUNK_ALIGNMENT`].
    pub chunk_size: u64,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl DriveConfig {
    /// Create a configuration with default chunk size and timeout.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            root: "root".to_string(),
            addressing: Addressing::ByPath,
            chunk_size: DEFAULT_CHUNK_SIZE,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Validate the configuration.
    ///
    /// Fails with [`DriveError::Configuration`] before any network activity
    /// if the chunk size is not a positive multiple of the alignment unit.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.chunk_size % CHUNK_ALIGNMENT != 0 {
            return Err(DriveError::Configuration(format!(
                "chunk_size must be a positive multiple of {} bytes, got {}",
                CHUNK_ALIGNMENT, self.chunk_size
            )));
        }
        if self.root.is_empty() {
            return Err(DriveError::Configuration(
                "root identifier must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DriveConfig::new("token");
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size % CHUNK_ALIGNMENT, 0);
    }

    #[test]
    fn test_aligned_chunk_sizes_accepted() {
        for multiple in [1, 2, 10, 32] {
            let mut config = DriveConfig::new("token");
            config.chunk_size = multiple * CHUNK_ALIGNMENT;
            assert!(config.validate().is_ok(), "multiple {}", multiple);
        }
    }

    #[test]
    fn test_unaligned_chunk_sizes_rejected() {
        for size in [1, CHUNK_ALIGNMENT - 1, CHUNK_ALIGNMENT + 1, 1024 * 1024] {
            let mut config = DriveConfig::new("token");
            config.chunk_size = size;
            let err = config.validate().unwrap_err();
            assert!(matches!(err, DriveError::Configuration(_)), "size {}", size);
        }
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let mut config = DriveConfig::new("token");
        config.chunk_size = 0;
        assert!(matches!(
            config.validate(),
            Err(DriveError::Configuration(_))
        ));
    }

    #[test]
    fn test_empty_root_rejected() {
        let mut config = DriveConfig::new("token");
        config.root = String::new();
        assert!(matches!(
            config.validate(),
            Err(DriveError::Configuration(_))
        ));
    }
}
