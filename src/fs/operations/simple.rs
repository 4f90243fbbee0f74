//! Single-request operations: delete, move, copy, directory creation and
//! existence checks.

use serde_json::json;
use tracing::debug;

use crate::client::DriveClient;
use crate::error::{DriveError, Result};
use crate::fs::item::DriveItem;
use crate::path::{self, PathResolver};

impl DriveClient {
    /// Delete a file or folder.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.endpoint(&self.resolver().resolve(path));
        let response = self.delete_request(&url).await?;
        if !response.is_success() {
            return Err(DriveError::Operation {
                op: "delete",
                path: path.to_string(),
                status: response.status.as_u16(),
            });
        }
        Ok(())
    }

    /// Delete a directory and everything under it.
    pub async fn delete_directory(&self, path: &str) -> Result<()> {
        self.delete(path).await
    }

    /// Create a single directory under an existing parent.
    pub async fn create_directory(&self, path: &str) -> Result<DriveItem> {
        let (parent, name) = PathResolver::split_parent(path);
        if name.is_empty() {
            return Err(DriveError::Configuration(
                "cannot create the drive root".to_string(),
            ));
        }

        let url = self.endpoint(&self.resolver().children_reference(&parent));
        let body = json!({ "name": name, "folder": {} });
        let response = self.post_json(&url, &body).await?;
        if !response.is_success() {
            return Err(DriveError::Operation {
                op: "createDirectory",
                path: path.to_string(),
                status: response.status.as_u16(),
            });
        }
        debug!(path, "directory created");
        response.json()
    }

    /// Make sure every ancestor of `path` exists, creating missing folders
    /// from root to leaf. The remote rejects out-of-order creation with a
    /// "parent not found" error.
    ///
    /// Idempotent: a fully existing chain issues no creation calls.
    pub async fn ensure_directory_exists(&self, path: &str) -> Result<()> {
        let path = path::normalize(path);
        if path.is_empty() {
            return Ok(());
        }

        let mut prefix = String::new();
        for segment in path.split('/') {
            if prefix.is_empty() {
                prefix.push_str(segment);
            } else {
                prefix = format!("{}/{}", prefix, segment);
            }
            match self.try_metadata(&prefix).await? {
                Some(item) if item.is_folder() => continue,
                Some(_) => {
                    // A file occupies the ancestor's name.
                    return Err(DriveError::Conflict { path: prefix });
                }
                None => {
                    self.create_directory(&prefix).await?;
                }
            }
        }
        Ok(())
    }

    /// Move an item to a new logical path, creating missing destination
    /// ancestors first.
    pub async fn move_item(&self, source: &str, destination: &str) -> Result<()> {
        let (dest_parent, dest_name) = PathResolver::split_parent(destination);
        self.ensure_directory_exists(&dest_parent).await?;
        let parent_id = self.folder_id(&dest_parent).await?;

        let url = self.endpoint(&self.resolver().resolve(source));
        let body = json!({ "parentReference": { "id": parent_id }, "name": dest_name });
        let response = self.patch_json(&url, &body).await?;
        if !response.is_success() {
            return Err(DriveError::Operation {
                op: "move",
                path: source.to_string(),
                status: response.status.as_u16(),
            });
        }
        Ok(())
    }

    /// Server-side copy of an item, creating missing destination ancestors
    /// first. The remote performs the copy asynchronously and acknowledges
    /// with 202.
    pub async fn copy(&self, source: &str, destination: &str) -> Result<()> {
        let (dest_parent, dest_name) = PathResolver::split_parent(destination);
        self.ensure_directory_exists(&dest_parent).await?;
        let parent_id = self.folder_id(&dest_parent).await?;

        let url = self.endpoint(&self.resolver().copy_reference(source));
        let body = json!({ "parentReference": { "id": parent_id }, "name": dest_name });
        let response = self.post_json(&url, &body).await?;
        if !response.is_success() {
            return Err(DriveError::Operation {
                op: "copy",
                path: source.to_string(),
                status: response.status.as_u16(),
            });
        }
        Ok(())
    }

    /// Check whether a file exists at `path`.
    ///
    /// Any underlying error narrows to `false`; existence checks never
    /// propagate failures.
    pub async fn file_exists(&self, path: &str) -> bool {
        matches!(self.try_metadata(path).await, Ok(Some(item)) if item.is_file())
    }

    /// Check whether a directory exists at `path`. Errors narrow to `false`.
    pub async fn directory_exists(&self, path: &str) -> bool {
        matches!(self.try_metadata(path).await, Ok(Some(item)) if item.is_folder())
    }

    /// Item id of a folder, for id-addressed parent references.
    async fn folder_id(&self, path: &str) -> Result<String> {
        let item = self.try_metadata(path).await?.ok_or_else(|| {
            DriveError::Operation {
                op: "resolveParent",
                path: path.to_string(),
                status: 404,
            }
        })?;
        item.id
            .ok_or_else(|| DriveError::Metadata(format!("folder '{}' has no id", path)))
    }
}
