//! Best-effort interpreter auto-selection.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use pysel_core::domain::Resource;
use pysel_core::ports::{AutoSelectionPort, ConfigError, InterpreterPathPort};

use crate::system::find_on_path;

/// Auto-selector that scans project-local virtualenvs and `PATH`.
///
/// Selection order:
/// 1. `.venv` then `venv` under the resource folder
/// 2. `python3` then `python` on `PATH`
///
/// The winner is recorded through the interpreter-path port; finding nothing
/// is not an error, the scope simply stays unset.
pub struct PathScanAutoSelector {
    interpreter_paths: Arc<dyn InterpreterPathPort>,
}

impl PathScanAutoSelector {
    /// Create a selector recording choices through the given port.
    pub fn new(interpreter_paths: Arc<dyn InterpreterPathPort>) -> Self {
        Self { interpreter_paths }
    }

    fn venv_interpreter(folder: &Path) -> Option<PathBuf> {
        for venv_name in [".venv", "venv"] {
            let venv = folder.join(venv_name);
            let unix = venv.join("bin").join("python");
            if unix.is_file() {
                return Some(unix);
            }
            let windows = venv.join("Scripts").join("python.exe");
            if windows.is_file() {
                return Some(windows);
            }
        }
        None
    }

    fn pick(resource: Option<&Resource>) -> Option<PathBuf> {
        if let Some(resource) = resource {
            if let Some(python) = Self::venv_interpreter(resource.path()) {
                debug!(interpreter = %python.display(), "found project-local virtualenv");
                return Some(python);
            }
        }
        find_on_path("python3").or_else(|| find_on_path("python"))
    }
}

#[async_trait]
impl AutoSelectionPort for PathScanAutoSelector {
    async fn auto_select_interpreter(
        &self,
        resource: Option<&Resource>,
    ) -> Result<(), ConfigError> {
        let Some(python) = Self::pick(resource) else {
            debug!("no interpreter candidate found during auto-selection");
            return Ok(());
        };

        info!(interpreter = %python.display(), "auto-selected interpreter");
        self.interpreter_paths
            .update(resource, &python.to_string_lossy())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct RecordingPaths(Mutex<Option<String>>);

    #[async_trait]
    impl InterpreterPathPort for RecordingPaths {
        async fn get(&self, _resource: Option<&Resource>) -> Result<String, ConfigError> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| "python".to_string()))
        }

        async fn update(&self, _resource: Option<&Resource>, path: &str) -> Result<(), ConfigError> {
            *self.0.lock().unwrap() = Some(path.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_project_venv_wins() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join(".venv").join("bin");
        fs::create_dir_all(&bin).unwrap();
        let python = bin.join("python");
        fs::write(&python, "").unwrap();

        let recorded = Arc::new(RecordingPaths(Mutex::new(None)));
        let selector = PathScanAutoSelector::new(recorded.clone());
        let resource = Resource::new(temp.path());
        selector
            .auto_select_interpreter(Some(&resource))
            .await
            .unwrap();

        assert_eq!(
            recorded.0.lock().unwrap().as_deref(),
            Some(python.to_string_lossy().as_ref())
        );
    }

    #[test]
    fn test_venv_discovery_prefers_dot_venv() {
        let temp = TempDir::new().unwrap();
        for name in [".venv", "venv"] {
            let bin = temp.path().join(name).join("bin");
            fs::create_dir_all(&bin).unwrap();
            fs::write(bin.join("python"), "").unwrap();
        }

        let found = PathScanAutoSelector::venv_interpreter(temp.path()).unwrap();
        assert!(found.starts_with(temp.path().join(".venv")));
    }

    #[test]
    fn test_no_venv_found() {
        let temp = TempDir::new().unwrap();
        assert!(PathScanAutoSelector::venv_interpreter(temp.path()).is_none());
    }
}
