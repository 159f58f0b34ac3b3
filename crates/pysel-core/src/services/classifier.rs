//! Priority-ordered environment classification.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{PlainEnvironment, PythonEnvironment, StoreEnvironment};
use crate::ports::{CondaLocatorPort, PixiLocatorPort, ResolveError, StoreLocatorPort};

/// Classifies a resolved interpreter path as exactly one environment kind.
///
/// Checks run in the fixed order Pixi, Conda, Microsoft Store, with the
/// plain wrapper as universal fallback, and the first positive match wins.
/// The order matters: a conda-style prefix inside a pixi project would also
/// satisfy the weaker checks, so the more specific managed options probe
/// first.
pub struct EnvironmentClassifier {
    pixi: Arc<dyn PixiLocatorPort>,
    conda: Arc<dyn CondaLocatorPort>,
    store: Arc<dyn StoreLocatorPort>,
}

impl EnvironmentClassifier {
    /// Create a classifier over the three locator collaborators.
    pub fn new(
        pixi: Arc<dyn PixiLocatorPort>,
        conda: Arc<dyn CondaLocatorPort>,
        store: Arc<dyn StoreLocatorPort>,
    ) -> Self {
        Self { pixi, conda, store }
    }

    /// Classify an interpreter path, running the full check chain.
    pub async fn classify(&self, interpreter: &Path) -> Result<PythonEnvironment, ResolveError> {
        self.classify_inner(interpreter, true).await
    }

    /// Classify for an already-activated interpreter.
    ///
    /// An activated shell implies a standard interpreter binding, so the
    /// Microsoft-Store check is skipped here.
    pub async fn classify_activated(
        &self,
        interpreter: &Path,
    ) -> Result<PythonEnvironment, ResolveError> {
        self.classify_inner(interpreter, false).await
    }

    async fn classify_inner(
        &self,
        interpreter: &Path,
        check_store: bool,
    ) -> Result<PythonEnvironment, ResolveError> {
        if self.pixi.is_pixi_installed().await {
            if let Some(env) = self.pixi.environment_from_interpreter(interpreter).await? {
                debug!(interpreter = %interpreter.display(), env = %env.name, "classified as pixi environment");
                return Ok(PythonEnvironment::Pixi(env));
            }
        }

        if let Some(env) = self.conda.conda_environment(interpreter).await? {
            debug!(interpreter = %interpreter.display(), prefix = %env.prefix.display(), "classified as conda environment");
            return Ok(PythonEnvironment::Conda(env));
        }

        if check_store && self.store.is_store_interpreter(interpreter).await? {
            debug!(interpreter = %interpreter.display(), "classified as store interpreter");
            return Ok(PythonEnvironment::MicrosoftStore(StoreEnvironment {
                interpreter: interpreter.to_path_buf(),
            }));
        }

        debug!(interpreter = %interpreter.display(), "classified as plain interpreter");
        Ok(PythonEnvironment::Plain(PlainEnvironment::new(interpreter)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::domain::{CondaEnvironment, PixiEnvironment};
    use crate::ports::LocatorError;
    use crate::ports::locators::{
        MockCondaLocatorPort, MockPixiLocatorPort, MockStoreLocatorPort,
    };

    fn pixi_env() -> PixiEnvironment {
        PixiEnvironment {
            pixi_executable: PathBuf::from("/usr/local/bin/pixi"),
            manifest: PathBuf::from("/work/proj/pixi.toml"),
            name: "default".to_string(),
            prefix: PathBuf::from("/work/proj/.pixi/envs/default"),
            interpreter: PathBuf::from("/work/proj/.pixi/envs/default/bin/python"),
        }
    }

    fn conda_env() -> CondaEnvironment {
        CondaEnvironment {
            prefix: PathBuf::from("/opt/conda/envs/science"),
            name: Some("science".to_string()),
            interpreter: PathBuf::from("/opt/conda/envs/science/bin/python"),
            conda_executable: None,
        }
    }

    fn classifier(
        pixi: MockPixiLocatorPort,
        conda: MockCondaLocatorPort,
        store: MockStoreLocatorPort,
    ) -> EnvironmentClassifier {
        EnvironmentClassifier::new(Arc::new(pixi), Arc::new(conda), Arc::new(store))
    }

    #[tokio::test]
    async fn test_pixi_wins_over_conda() {
        let mut pixi = MockPixiLocatorPort::new();
        pixi.expect_is_pixi_installed().return_const(true);
        pixi.expect_environment_from_interpreter()
            .returning(|_| Ok(Some(pixi_env())));

        // Conda would also match, but must never be consulted
        let mut conda = MockCondaLocatorPort::new();
        conda.expect_conda_environment().never();
        let mut store = MockStoreLocatorPort::new();
        store.expect_is_store_interpreter().never();

        let result = classifier(pixi, conda, store)
            .classify(Path::new("/work/proj/.pixi/envs/default/bin/python"))
            .await
            .unwrap();
        assert!(matches!(result, PythonEnvironment::Pixi(_)));
    }

    #[tokio::test]
    async fn test_conda_checked_when_pixi_missing() {
        let mut pixi = MockPixiLocatorPort::new();
        pixi.expect_is_pixi_installed().return_const(false);
        pixi.expect_environment_from_interpreter().never();

        let mut conda = MockCondaLocatorPort::new();
        conda
            .expect_conda_environment()
            .returning(|_| Ok(Some(conda_env())));
        let store = MockStoreLocatorPort::new();

        let result = classifier(pixi, conda, store)
            .classify(Path::new("/opt/conda/envs/science/bin/python"))
            .await
            .unwrap();
        assert!(matches!(result, PythonEnvironment::Conda(_)));
    }

    #[tokio::test]
    async fn test_no_match_falls_back_to_plain() {
        let mut pixi = MockPixiLocatorPort::new();
        pixi.expect_is_pixi_installed().return_const(true);
        pixi.expect_environment_from_interpreter()
            .returning(|_| Ok(None));
        let mut conda = MockCondaLocatorPort::new();
        conda.expect_conda_environment().returning(|_| Ok(None));
        let mut store = MockStoreLocatorPort::new();
        store.expect_is_store_interpreter().returning(|_| Ok(false));

        let result = classifier(pixi, conda, store)
            .classify(Path::new("/usr/bin/python3"))
            .await
            .unwrap();
        assert!(matches!(result, PythonEnvironment::Plain(_)));
        assert_eq!(result.executable_path(), Path::new("/usr/bin/python3"));
    }

    #[tokio::test]
    async fn test_store_match() {
        let mut pixi = MockPixiLocatorPort::new();
        pixi.expect_is_pixi_installed().return_const(false);
        let mut conda = MockCondaLocatorPort::new();
        conda.expect_conda_environment().returning(|_| Ok(None));
        let mut store = MockStoreLocatorPort::new();
        store.expect_is_store_interpreter().returning(|_| Ok(true));

        let result = classifier(pixi, conda, store)
            .classify(Path::new(
                "C:/Users/dev/AppData/Local/Microsoft/WindowsApps/python.exe",
            ))
            .await
            .unwrap();
        assert!(matches!(result, PythonEnvironment::MicrosoftStore(_)));
    }

    #[tokio::test]
    async fn test_activated_classification_skips_store() {
        let mut pixi = MockPixiLocatorPort::new();
        pixi.expect_is_pixi_installed().return_const(false);
        let mut conda = MockCondaLocatorPort::new();
        conda.expect_conda_environment().returning(|_| Ok(None));
        let mut store = MockStoreLocatorPort::new();
        // Would match, but the activated path must not ask
        store.expect_is_store_interpreter().never();

        let result = classifier(pixi, conda, store)
            .classify_activated(Path::new(
                "C:/Users/dev/AppData/Local/Microsoft/WindowsApps/python.exe",
            ))
            .await
            .unwrap();
        assert!(matches!(result, PythonEnvironment::Plain(_)));
    }

    #[tokio::test]
    async fn test_locator_fault_propagates() {
        let mut pixi = MockPixiLocatorPort::new();
        pixi.expect_is_pixi_installed().return_const(false);
        let mut conda = MockCondaLocatorPort::new();
        conda
            .expect_conda_environment()
            .returning(|_| Err(LocatorError::Probe("conda info failed".to_string())));
        let store = MockStoreLocatorPort::new();

        let result = classifier(pixi, conda, store)
            .classify(Path::new("/usr/bin/python3"))
            .await;
        assert!(matches!(result, Err(ResolveError::Locator(_))));
    }
}
