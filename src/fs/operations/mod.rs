//! Filesystem operations split into focused modules.

mod list;
mod metadata;
mod simple;
mod upload;
