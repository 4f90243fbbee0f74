//! Metadata and content retrieval.

use bytes::Bytes;

use crate::client::DriveClient;
use crate::error::{DriveError, Result};
use crate::fs::item::{Attributes, DriveItem};
use crate::path;

impl DriveClient {
    /// Fetch the raw descriptor of an item, distinguishing "not found" from
    /// real failures so callers don't have to catch errors for existence
    /// checks.
    pub(crate) async fn try_metadata(&self, path: &str) -> Result<Option<DriveItem>> {
        let url = self.endpoint(&self.resolver().resolve(path));
        let response = self.get(&url).await?;
        if response.status.as_u16() == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(DriveError::Operation {
                op: "metadata",
                path: path.to_string(),
                status: response.status.as_u16(),
            });
        }
        Ok(Some(response.json()?))
    }

    /// Normalized attributes of a file or folder.
    pub async fn metadata(&self, path: &str) -> Result<Attributes> {
        let item = self.try_metadata(path).await?.ok_or_else(|| {
            DriveError::Operation {
                op: "metadata",
                path: path.to_string(),
                status: 404,
            }
        })?;
        Attributes::from_item(item, path::normalize(path))
    }

    /// Download a file's contents.
    pub async fn download(&self, path: &str) -> Result<Bytes> {
        let url = self.endpoint(&self.resolver().content_reference(path));
        let response = self.get(&url).await?;
        if !response.is_success() {
            return Err(DriveError::Operation {
                op: "download",
                path: path.to_string(),
                status: response.status.as_u16(),
            });
        }
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::DriveClient;
    use crate::config::DriveConfig;
    use crate::error::DriveError;
    use crate::fs::item::ItemKind;
    use crate::test_util::{file_item_json, MockTransport};
    use std::sync::Arc;

    fn client(transport: Arc<MockTransport>) -> DriveClient {
        DriveClient::with_transport(DriveConfig::new("token"), transport).unwrap()
    }

    #[tokio::test]
    async fn test_metadata_maps_item() {
        let transport = MockTransport::new();
        transport.push(200, &file_item_json("a.txt", 42));

        let client = client(transport.clone());
        let attrs = client.metadata("/docs//a.txt").await.unwrap();
        assert_eq!(attrs.path, "docs/a.txt");
        assert_eq!(attrs.size, 42);
        assert_eq!(attrs.kind, ItemKind::File);

        let requests = transport.requests();
        assert!(requests[0].url.ends_with("/root:/docs/a.txt"));
    }

    #[tokio::test]
    async fn test_metadata_not_found() {
        let transport = MockTransport::new();
        transport.push(404, "");

        let client = client(transport.clone());
        let err = client.metadata("missing.txt").await.unwrap_err();
        assert!(matches!(
            err,
            DriveError::Operation {
                op: "metadata",
                status: 404,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_download() {
        let transport = MockTransport::new();
        transport.push(200, "file contents");

        let client = client(transport.clone());
        let body = client.download("a.txt").await.unwrap();
        assert_eq!(&body[..], b"file contents");

        let requests = transport.requests();
        assert!(requests[0].url.ends_with("/root:/a.txt:/content"));
    }

    #[tokio::test]
    async fn test_download_failure_surfaces_status() {
        let transport = MockTransport::new();
        transport.push(403, "");

        let client = client(transport.clone());
        let err = client.download("a.txt").await.unwrap_err();
        assert!(matches!(
            err,
            DriveError::Operation {
                op: "download",
                status: 403,
                ..
            }
        ));
    }
}
