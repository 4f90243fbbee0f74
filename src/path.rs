//! Logical-path to drive-reference translation.
//!
//! A logical path is slash-separated and relative to the configured drive
//! root; after normalization it never starts with a separator, and the empty
//! string denotes the root itself. References are recomputed per operation
//! and never persisted.

/// Item addressing mode of the remote namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Colon-delimited path addressing (`/root:/a/b:/children`).
    ByPath,
    /// Plain id-segment addressing (`/items/ID/children`).
    ById,
}

impl Addressing {
    /// Parse the `directory_type` configuration value.
    pub fn from_directory_type(value: &str) -> Self {
        match value {
            "id" => Addressing::ById,
            _ => Addressing::ByPath,
        }
    }
}

/// Translates logical paths into drive-item references and back.
#[derive(Debug, Clone)]
pub struct PathResolver {
    prefix: String,
    addressing: Addressing,
}

/// Normalize a logical path: collapse duplicate separators and strip the
/// leading/trailing ones. The root normalizes to the empty string.
pub fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

impl PathResolver {
    /// Create a resolver for the given drive-root identifier.
    pub fn new(root: &str, addressing: Addressing) -> Self {
        Self {
            prefix: format!("/{}", root.trim_matches('/')),
            addressing,
        }
    }

    /// Reference for the drive root itself.
    pub fn root_reference(&self) -> &str {
        &self.prefix
    }

    /// Resolve a logical path to an addressable item reference.
    ///
    /// The root path resolves to the drive-root reference; anything else is
    /// the root prefix joined with the path using the mode-specific
    /// delimiter.
    pub fn resolve(&self, path: &str) -> String {
        let path = normalize(path);
        if path.is_empty() {
            return self.prefix.clone();
        }
        match self.addressing {
            Addressing::ByPath => format!("{}:/{}", self.prefix, path),
            Addressing::ById => format!("{}/{}", self.prefix, path),
        }
    }

    /// Reference of the `/children` collection of a folder.
    pub fn children_reference(&self, path: &str) -> String {
        self.action_reference(path, "children")
    }

    /// Reference of the raw content endpoint of an item.
    pub fn content_reference(&self, path: &str) -> String {
        self.action_reference(path, "content")
    }

    /// Reference of the resumable upload-session endpoint of an item.
    pub fn upload_session_reference(&self, path: &str) -> String {
        self.action_reference(path, "createUploadSession")
    }

    /// Reference of the server-side copy endpoint of an item.
    pub fn copy_reference(&self, path: &str) -> String {
        self.action_reference(path, "copy")
    }

    /// Item reference with an action segment appended. At the root the
    /// action attaches directly to the root reference, without the by-path
    /// colon wrapping.
    fn action_reference(&self, path: &str, action: &str) -> String {
        let path = normalize(path);
        if path.is_empty() {
            return format!("{}/{}", self.prefix, action);
        }
        match self.addressing {
            Addressing::ByPath => format!("{}:/{}:/{}", self.prefix, path, action),
            Addressing::ById => format!("{}/{}/{}", self.prefix, path, action),
        }
    }

    /// Rebuild a logical path from a remote-reported parent path and an item
    /// name. Exact inverse of [`resolve`](Self::resolve) for items that
    /// exist.
    ///
    /// Graph reports parent paths like `/drive/root:/docs`; everything up to
    /// and including the drive-root marker is stripped.
    pub fn unresolve(&self, remote_parent_path: &str, item_name: &str) -> String {
        let relative = match remote_parent_path.split_once(':') {
            Some((_, rest)) => rest,
            None => remote_parent_path
                .strip_prefix(self.prefix.as_str())
                .unwrap_or(""),
        };
        let relative = relative.trim_matches('/');
        if relative.is_empty() {
            item_name.to_string()
        } else {
            format!("{}/{}", relative, item_name)
        }
    }

    /// Split a logical path into its parent path and final name.
    ///
    /// A top-level item has the root (empty path) as its parent, never an
    /// invalid reference.
    pub fn split_parent(path: &str) -> (String, String) {
        let path = normalize(path);
        match path.rsplit_once('/') {
            Some((parent, name)) => (parent.to_string(), name.to_string()),
            None => (String::new(), path),
        }
    }
}
