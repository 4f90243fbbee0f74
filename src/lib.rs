//! # graphdrive
//!
//! Rust client adapter for OneDrive (Microsoft Graph) exposing a uniform,
//! filesystem-like API.
//!
//! ## Features
//!
//! - **Filesystem Operations**:
//!   - List folder contents (with recursive, breadth-first listing).
//!   - Create directories, including full missing-ancestor chains.
//!   - Move, copy and delete files and folders.
//!   - Normalized metadata (`metadata`) and existence checks.
//! - **File Transfers**:
//!   - Single-request upload for small payloads (up to 4 MiB).
//!   - Chunked, resumable upload sessions for large payloads, with
//!     rate-limit handling and bounded retries of transient server errors.
//!   - Content download.
//! - **Addressing**:
//!   - By-path (`/root:/a/b`) or by-id item addressing, relative to a
//!     configurable drive root.
//!
//! The adapter is stateless: every call resolves paths freshly and an upload
//! session lives only inside the call that created it. Token acquisition and
//! refresh are the caller's responsibility.
//!
//! ## Example: Basic Usage
//!
//! ```no_run
//! use graphdrive::{DriveClient, DriveConfig};
//!
//! # async fn example() -> graphdrive::Result<()> {
//! let client = DriveClient::new(DriveConfig::new("ACCESS_TOKEN"))?;
//!
//! // List everything under the drive root
//! for entry in client.list_contents("", true).await? {
//!     println!("{} ({} bytes)", entry.path, entry.size);
//! }
//!
//! // Upload; payloads over 4 MiB automatically use a resumable session
//! let data = std::fs::read("local_file.bin").expect("read local file");
//! client.upload("backups/file.bin", &data).await?;
//!
//! // Download it back
//! let contents = client.download("backups/file.bin").await?;
//! # let _ = contents;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fs;
pub mod http;
pub mod path;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export commonly used types
pub use client::DriveClient;
pub use config::{DriveConfig, CHUNK_ALIGNMENT, DEFAULT_CHUNK_SIZE, SIMPLE_UPLOAD_LIMIT};
pub use error::{DriveError, Result};
pub use fs::{Attributes, DriveItem, ItemKind};
pub use http::{HttpResponse, Transport};
pub use path::{Addressing, PathResolver};
