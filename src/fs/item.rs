//! Drive-item descriptors and normalized attribute records.

use serde::Deserialize;

use crate::error::{DriveError, Result};

/// Raw drive-item descriptor as reported by the Graph API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub size: u64,
    pub last_modified_date_time: Option<String>,
    pub file: Option<FileFacet>,
    pub folder: Option<FolderFacet>,
    pub web_url: Option<String>,
    pub parent_reference: Option<ParentReference>,
}

/// File facet, present on file items only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacet {
    pub mime_type: Option<String>,
}

/// Folder facet, present on folder items only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFacet {
    pub child_count: Option<i64>,
}

/// Parent pointer of an item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    pub id: Option<String>,
    pub path: Option<String>,
}

impl DriveItem {
    /// Check if this item is a file.
    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }

    /// Check if this item is a folder.
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }
}

/// Item kind in the normalized attribute record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Directory,
}

/// Normalized view of a remote item. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Attributes {
    /// Logical path, relative to the configured root.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Modification time, seconds since the Unix epoch.
    pub modified: i64,
    /// File or directory.
    pub kind: ItemKind,
    /// Mime type; populated for files only.
    pub mime_type: Option<String>,
    /// The raw descriptor, for consumers that need fields beyond the
    /// normalized set.
    pub item: DriveItem,
}

impl Attributes {
    /// Map a raw descriptor to a normalized record.
    ///
    /// Fails closed: a descriptor carrying neither the file nor the folder
    /// facet, or an unparsable modification time, is an error, never a
    /// silent default to "file".
    pub fn from_item(item: DriveItem, path: String) -> Result<Self> {
        let kind = if item.folder.is_some() {
            ItemKind::Directory
        } else if item.file.is_some() {
            ItemKind::File
        } else {
            return Err(DriveError::Metadata(format!(
                "item '{}' is neither file nor folder",
                path
            )));
        };

        let raw_time = item.last_modified_date_time.as_deref().ok_or_else(|| {
            DriveError::Metadata(format!("item '{}' has no modification time", path))
        })?;
        let modified = chrono::DateTime::parse_from_rfc3339(raw_time)
            .map_err(|e| {
                DriveError::Metadata(format!(
                    "item '{}' has unparsable modification time '{}': {}",
                    path, raw_time, e
                ))
            })?
            .timestamp();

        let mime_type = match kind {
            ItemKind::File => item.file.as_ref().and_then(|f| f.mime_type.clone()),
            ItemKind::Directory => None,
        };

        Ok(Self {
            path,
            size: item.size,
            modified,
            kind,
            mime_type,
            item,
        })
    }

    /// Check if this record describes a file.
    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    /// Check if this record describes a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == ItemKind::Directory
    }
}
