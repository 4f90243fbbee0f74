//! Filesystem operations module.

pub(crate) mod item;
mod operations;

pub use item::{Attributes, DriveItem, FileFacet, FolderFacet, ItemKind, ParentReference};
