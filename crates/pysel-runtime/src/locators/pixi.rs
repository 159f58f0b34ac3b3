//! Pixi environment recognition.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use pysel_core::domain::PixiEnvironment;
use pysel_core::ports::{LocatorError, PixiLocatorPort};

use super::interpreter_prefix;
use crate::system::find_on_path;

/// Recognizes pixi environments from their on-disk layout.
///
/// Pixi materializes environments under `<project>/.pixi/envs/<name>` with
/// the manifest (`pixi.toml`) at the project root. Detection is gated on a
/// `pixi` executable being present at all.
#[derive(Debug, Clone, Default)]
pub struct DefaultPixiLocator {
    pixi_override: Option<PathBuf>,
}

impl DefaultPixiLocator {
    /// Create a locator that finds `pixi` on `PATH`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixi_override: None,
        }
    }

    /// Use a specific `pixi` executable instead of searching `PATH`.
    #[must_use]
    pub fn with_pixi_executable(pixi: impl Into<PathBuf>) -> Self {
        Self {
            pixi_override: Some(pixi.into()),
        }
    }

    fn pixi_executable(&self) -> Option<PathBuf> {
        self.pixi_override
            .clone()
            .or_else(|| find_on_path("pixi"))
    }
}

#[async_trait]
impl PixiLocatorPort for DefaultPixiLocator {
    async fn is_pixi_installed(&self) -> bool {
        self.pixi_executable().is_some()
    }

    async fn environment_from_interpreter(
        &self,
        interpreter: &Path,
    ) -> Result<Option<PixiEnvironment>, LocatorError> {
        let Some(pixi_executable) = self.pixi_executable() else {
            return Ok(None);
        };
        let Some(prefix) = interpreter_prefix(interpreter) else {
            return Ok(None);
        };

        // Expect <project>/.pixi/envs/<name>
        let Some(envs_dir) = prefix.parent() else {
            return Ok(None);
        };
        let Some(pixi_dir) = envs_dir.parent() else {
            return Ok(None);
        };
        if envs_dir.file_name().is_none_or(|n| n != "envs")
            || pixi_dir.file_name().is_none_or(|n| n != ".pixi")
        {
            return Ok(None);
        }
        let Some(project_root) = pixi_dir.parent() else {
            return Ok(None);
        };

        let manifest = project_root.join("pixi.toml");
        let has_manifest = tokio::fs::metadata(&manifest)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !has_manifest {
            return Ok(None);
        }

        let Some(name) = prefix.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };

        debug!(manifest = %manifest.display(), env = name, "recognized pixi environment");
        Ok(Some(PixiEnvironment {
            pixi_executable,
            manifest,
            name: name.to_string(),
            prefix,
            interpreter: interpreter.to_path_buf(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_project(temp: &TempDir, env_name: &str) -> (PathBuf, PathBuf) {
        let root = temp.path().join("proj");
        let prefix = root.join(".pixi").join("envs").join(env_name);
        fs::create_dir_all(prefix.join("bin")).unwrap();
        fs::write(root.join("pixi.toml"), "[project]\nname = \"proj\"\n").unwrap();
        let python = prefix.join("bin").join("python");
        fs::write(&python, "").unwrap();
        let pixi = temp.path().join("pixi");
        fs::write(&pixi, "").unwrap();
        (python, pixi)
    }

    #[tokio::test]
    async fn test_recognizes_pixi_layout() {
        let temp = TempDir::new().unwrap();
        let (python, pixi) = fake_project(&temp, "default");

        let locator = DefaultPixiLocator::with_pixi_executable(&pixi);
        assert!(locator.is_pixi_installed().await);

        let env = locator
            .environment_from_interpreter(&python)
            .await
            .unwrap()
            .expect("should recognize pixi layout");
        assert_eq!(env.name, "default");
        assert_eq!(env.manifest, temp.path().join("proj").join("pixi.toml"));
        assert_eq!(env.pixi_executable, pixi);
    }

    #[tokio::test]
    async fn test_missing_manifest_is_a_soft_miss() {
        let temp = TempDir::new().unwrap();
        let (python, pixi) = fake_project(&temp, "default");
        fs::remove_file(temp.path().join("proj").join("pixi.toml")).unwrap();

        let locator = DefaultPixiLocator::with_pixi_executable(&pixi);
        let result = locator.environment_from_interpreter(&python).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_interpreter_outside_pixi_tree() {
        let temp = TempDir::new().unwrap();
        let (_, pixi) = fake_project(&temp, "default");
        fs::create_dir_all(temp.path().join("bin")).unwrap();
        let python = temp.path().join("bin").join("python");
        fs::write(&python, "").unwrap();

        let locator = DefaultPixiLocator::with_pixi_executable(&pixi);
        let result = locator.environment_from_interpreter(&python).await.unwrap();
        assert!(result.is_none());
    }
}
