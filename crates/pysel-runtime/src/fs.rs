//! Filesystem adapter.

use async_trait::async_trait;
use std::path::Path;

use pysel_core::ports::FileSystemPort;

/// Filesystem port over `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Create a new filesystem adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystemPort for TokioFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    async fn is_file(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_queries() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("python");
        std::fs::write(&file, "").unwrap();

        let fs = TokioFileSystem::new();
        assert!(fs.exists(&file).await);
        assert!(fs.is_file(&file).await);
        assert!(fs.exists(temp.path()).await);
        assert!(!fs.is_file(temp.path()).await);
        assert!(!fs.exists(&temp.path().join("missing")).await);
    }
}
