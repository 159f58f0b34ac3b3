//! Conda environment recognition.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use pysel_core::domain::CondaEnvironment;
use pysel_core::ports::{CondaLocatorPort, LocatorError};

use super::interpreter_prefix;
use crate::system::find_on_path;

/// Recognizes conda environments from their on-disk layout.
///
/// A prefix belongs to conda when it contains a `conda-meta` directory.
/// Named environments live under an `envs/` parent; base installs and
/// `--prefix` environments report no name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCondaLocator;

impl DefaultCondaLocator {
    /// Create a new conda locator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CondaLocatorPort for DefaultCondaLocator {
    async fn conda_environment(
        &self,
        interpreter: &Path,
    ) -> Result<Option<CondaEnvironment>, LocatorError> {
        let Some(prefix) = interpreter_prefix(interpreter) else {
            return Ok(None);
        };

        let meta = prefix.join("conda-meta");
        let is_conda = tokio::fs::metadata(&meta)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_conda {
            return Ok(None);
        }

        let name = prefix
            .parent()
            .filter(|parent| parent.file_name().is_some_and(|n| n == "envs"))
            .and_then(|_| prefix.file_name())
            .and_then(|n| n.to_str())
            .map(String::from);

        debug!(prefix = %prefix.display(), ?name, "recognized conda environment");
        Ok(Some(CondaEnvironment {
            name,
            interpreter: interpreter.to_path_buf(),
            conda_executable: find_on_path("conda"),
            prefix,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fake_env(root: &Path, rel: &str) -> PathBuf {
        let prefix = root.join(rel);
        fs::create_dir_all(prefix.join("conda-meta")).unwrap();
        fs::create_dir_all(prefix.join("bin")).unwrap();
        let python = prefix.join("bin").join("python");
        fs::write(&python, "").unwrap();
        python
    }

    #[tokio::test]
    async fn test_named_env_under_envs_dir() {
        let temp = TempDir::new().unwrap();
        let python = fake_env(temp.path(), "miniconda3/envs/science");

        let env = DefaultCondaLocator::new()
            .conda_environment(&python)
            .await
            .unwrap()
            .expect("should recognize conda layout");
        assert_eq!(env.name.as_deref(), Some("science"));
        assert_eq!(env.prefix, temp.path().join("miniconda3/envs/science"));
        assert_eq!(env.interpreter, python);
    }

    #[tokio::test]
    async fn test_base_install_has_no_name() {
        let temp = TempDir::new().unwrap();
        let python = fake_env(temp.path(), "miniconda3");

        let env = DefaultCondaLocator::new()
            .conda_environment(&python)
            .await
            .unwrap()
            .expect("should recognize conda layout");
        assert_eq!(env.name, None);
    }

    #[tokio::test]
    async fn test_plain_interpreter_is_a_soft_miss() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("bin")).unwrap();
        let python = temp.path().join("bin").join("python");
        fs::write(&python, "").unwrap();

        let result = DefaultCondaLocator::new()
            .conda_environment(&python)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
