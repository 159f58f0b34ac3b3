//! Filesystem port.

use async_trait::async_trait;
use std::path::Path;

/// Filesystem queries used by the plain environment wrapper.
///
/// Deliberately tiny: resolution only ever needs existence checks, and a
/// small surface keeps test doubles trivial.
#[async_trait]
pub trait FileSystemPort: Send + Sync {
    /// Whether anything exists at the path.
    async fn exists(&self, path: &Path) -> bool;

    /// Whether the path names a regular file.
    async fn is_file(&self, path: &Path) -> bool;
}
