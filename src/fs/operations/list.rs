//! Directory listing with pagination and recursive descent.

use std::collections::VecDeque;

use serde::Deserialize;
use tracing::debug;

use crate::client::DriveClient;
use crate::error::{DriveError, Result};
use crate::fs::item::{Attributes, DriveItem};
use crate::path;

/// One page of a children collection.
#[derive(Debug, Deserialize)]
struct ChildrenPage {
    value: Vec<DriveItem>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

impl DriveClient {
    /// List the contents of a folder.
    ///
    /// With `recursive` set, discovered subfolders are visited breadth-first
    /// in a deterministic order; a folder and its children all appear in the
    /// result. Each call re-issues the remote queries; nothing is cached.
    ///
    /// Any page fetch or mapping failure aborts the whole listing and the
    /// partial results are discarded: a truncated recursive listing would be
    /// indistinguishable from a complete one.
    pub async fn list_contents(&self, path: &str, recursive: bool) -> Result<Vec<Attributes>> {
        let mut results = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(path::normalize(path));

        while let Some(dir) = queue.pop_front() {
            let items = self.list_children(&dir).await?;
            debug!(dir = %dir, items = items.len(), "listed folder page set");

            for item in items {
                let name = item.name.clone().ok_or_else(|| {
                    DriveError::Metadata(format!("unnamed item under '{}'", dir))
                })?;
                let child_path = if dir.is_empty() {
                    name
                } else {
                    format!("{}/{}", dir, name)
                };

                let is_folder = item.is_folder();
                results.push(Attributes::from_item(item, child_path.clone())?);

                if recursive && is_folder {
                    queue.push_back(child_path);
                }
            }
        }

        Ok(results)
    }

    /// Fetch every page of a folder's children collection.
    async fn list_children(&self, dir: &str) -> Result<Vec<DriveItem>> {
        let mut url = self.endpoint(&self.resolver().children_reference(dir));
        let mut items = Vec::new();

        loop {
            let response = self.get(&url).await?;
            if !response.is_success() {
                return Err(DriveError::Listing {
                    path: dir.to_string(),
                    status: response.status.as_u16(),
                });
            }

            let page: ChildrenPage = response.json()?;
            items.extend(page.value);

            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::DriveClient;
    use crate::config::DriveConfig;
    use crate::error::DriveError;
    use crate::test_util::{children_page_json, file_item_json, folder_item_json, MockTransport};
    use std::sync::Arc;

    fn client(transport: Arc<MockTransport>) -> DriveClient {
        DriveClient::with_transport(DriveConfig::new("token"), transport).unwrap()
    }

    #[tokio::test]
    async fn test_flat_listing() {
        let transport = MockTransport::new();
        transport.push(
            200,
            &children_page_json(
                &[file_item_json("a.txt", 10), folder_item_json("docs")],
                None,
            ),
        );

        let client = client(transport.clone());
        let entries = client.list_contents("", false).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "a.txt");
        assert_eq!(entries[1].path, "docs");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.ends_with("/root/children"));
    }

    #[tokio::test]
    async fn test_pagination_follows_next_link() {
        let transport = MockTransport::new();
        transport.push(
            200,
            &children_page_json(
                &[file_item_json("a.txt", 1)],
                Some("https://graph.microsoft.com/v1.0/me/drive/root/children?$skiptoken=x"),
            ),
        );
        transport.push(200, &children_page_json(&[file_item_json("b.txt", 2)], None));

        let client = client(transport.clone());
        let entries = client.list_contents("", false).await.unwrap();

        assert_eq!(entries.len(), 2);
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].url.contains("skiptoken"));
    }

    #[tokio::test]
    async fn test_recursive_listing_reconstructs_paths() {
        // Root holds one file and one folder; the folder holds two files.
        let transport = MockTransport::new();
        transport.push(
            200,
            &children_page_json(
                &[file_item_json("top.txt", 1), folder_item_json("docs")],
                None,
            ),
        );
        transport.push(
            200,
            &children_page_json(
                &[file_item_json("one.txt", 2), file_item_json("two.txt", 3)],
                None,
            ),
        );

        let client = client(transport.clone());
        let entries = client.list_contents("", true).await.unwrap();

        let mut paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, ["docs", "docs/one.txt", "docs/two.txt", "top.txt"]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].url.ends_with("/root:/docs:/children"));
    }

    #[tokio::test]
    async fn test_breadth_first_traversal_is_deterministic() {
        let transport = MockTransport::new();
        // Root: folders a and b. a: folder a/c. b, c: empty.
        transport.push(
            200,
            &children_page_json(&[folder_item_json("a"), folder_item_json("b")], None),
        );
        transport.push(200, &children_page_json(&[folder_item_json("c")], None));
        transport.push(200, &children_page_json(&[], None));
        transport.push(200, &children_page_json(&[], None));

        let client = client(transport.clone());
        let entries = client.list_contents("", true).await.unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["a", "b", "a/c"]);

        let listed: Vec<_> = transport
            .requests()
            .iter()
            .map(|r| r.url.clone())
            .collect();
        assert!(listed[1].contains(":/a:"));
        assert!(listed[2].contains(":/b:"));
        assert!(listed[3].contains(":/a/c:"));
    }

    #[tokio::test]
    async fn test_page_failure_aborts_listing() {
        let transport = MockTransport::new();
        transport.push(
            200,
            &children_page_json(&[folder_item_json("docs")], None),
        );
        transport.push(503, "");

        let client = client(transport.clone());
        let err = client.list_contents("", true).await.unwrap_err();
        assert!(matches!(
            err,
            DriveError::Listing { status: 503, .. }
        ));
    }
}
