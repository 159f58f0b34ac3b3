//! Microsoft-Store interpreter detection.

use async_trait::async_trait;
use std::path::Path;

use pysel_core::ports::{LocatorError, StoreLocatorPort};

/// Detects store-distributed interpreters by their install location.
///
/// Store installs surface through per-user `WindowsApps` aliases; the path
/// component is the reliable marker. On other platforms this is always a
/// miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStoreLocator;

impl DefaultStoreLocator {
    /// Create a new store locator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StoreLocatorPort for DefaultStoreLocator {
    async fn is_store_interpreter(&self, interpreter: &Path) -> Result<bool, LocatorError> {
        Ok(interpreter.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|name| name.eq_ignore_ascii_case("WindowsApps"))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_windows_apps_component_matches() {
        let locator = DefaultStoreLocator::new();
        assert!(
            locator
                .is_store_interpreter(Path::new(
                    "C:/Users/dev/AppData/Local/Microsoft/WindowsApps/python.exe"
                ))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_regular_paths_miss() {
        let locator = DefaultStoreLocator::new();
        assert!(
            !locator
                .is_store_interpreter(Path::new("/usr/bin/python3"))
                .await
                .unwrap()
        );
        assert!(
            !locator
                .is_store_interpreter(Path::new("C:/Python312/python.exe"))
                .await
                .unwrap()
        );
    }
}
