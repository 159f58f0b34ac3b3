//! Interpreter settings storage.
//!
//! Two implementations of the configuration ports: a JSON file under the
//! user's config directory for real use, and an in-memory store for tests
//! and embedders that manage settings themselves.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

use pysel_core::domain::{DEFAULT_INTERPRETER, Resource};
use pysel_core::ports::{
    ConfigError, ConfigurationPort, InterpreterPathPort, InterpreterSettings,
};

/// Serialized settings shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredSettings {
    /// Global interpreter path, when one has been selected.
    python_path: Option<String>,
    /// Per-resource interpreter paths, keyed by folder path.
    resources: HashMap<String, String>,
}

impl StoredSettings {
    fn lookup(&self, resource: Option<&Resource>) -> String {
        resource
            .and_then(|r| self.resources.get(&r.path().display().to_string()))
            .or(self.python_path.as_ref())
            .cloned()
            .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string())
    }

    fn set(&mut self, resource: Option<&Resource>, path: &str) {
        match resource {
            Some(r) => {
                self.resources
                    .insert(r.path().display().to_string(), path.to_string());
            }
            None => self.python_path = Some(path.to_string()),
        }
    }
}

/// Settings store persisted as a JSON file.
pub struct JsonFileConfiguration {
    file: PathBuf,
    state: RwLock<StoredSettings>,
}

impl JsonFileConfiguration {
    /// Default settings location under the user config directory.
    #[must_use]
    pub fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pysel").join("settings.json"))
    }

    /// Load settings from the file, starting empty when it does not exist.
    pub async fn load(file: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let file = file.into();
        let state = match tokio::fs::read_to_string(&file).await {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|e| ConfigError::Load(e.to_string()))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredSettings::default(),
            Err(e) => return Err(ConfigError::Load(e.to_string())),
        };
        debug!(file = %file.display(), "loaded interpreter settings");
        Ok(Self {
            file,
            state: RwLock::new(state),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    async fn persist(&self, state: &StoredSettings) -> Result<(), ConfigError> {
        if let Some(parent) = self.file.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::Store(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| ConfigError::Store(e.to_string()))?;
        tokio::fs::write(&self.file, raw)
            .await
            .map_err(|e| ConfigError::Store(e.to_string()))
    }
}

#[async_trait]
impl ConfigurationPort for JsonFileConfiguration {
    async fn settings(
        &self,
        resource: Option<&Resource>,
    ) -> Result<InterpreterSettings, ConfigError> {
        let state = self.state.read().await;
        Ok(InterpreterSettings::new(state.lookup(resource)))
    }
}

#[async_trait]
impl InterpreterPathPort for JsonFileConfiguration {
    async fn get(&self, resource: Option<&Resource>) -> Result<String, ConfigError> {
        let state = self.state.read().await;
        Ok(state.lookup(resource))
    }

    async fn update(&self, resource: Option<&Resource>, path: &str) -> Result<(), ConfigError> {
        let mut state = self.state.write().await;
        state.set(resource, path);
        self.persist(&state).await
    }
}

/// In-memory settings store.
#[derive(Default)]
pub struct StaticConfiguration {
    state: RwLock<StoredSettings>,
}

impl StaticConfiguration {
    /// Create an empty store (everything unset).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a global interpreter already selected.
    #[must_use]
    pub fn with_python_path(path: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(StoredSettings {
                python_path: Some(path.into()),
                resources: HashMap::new(),
            }),
        }
    }
}

#[async_trait]
impl ConfigurationPort for StaticConfiguration {
    async fn settings(
        &self,
        resource: Option<&Resource>,
    ) -> Result<InterpreterSettings, ConfigError> {
        let state = self.state.read().await;
        Ok(InterpreterSettings::new(state.lookup(resource)))
    }
}

#[async_trait]
impl InterpreterPathPort for StaticConfiguration {
    async fn get(&self, resource: Option<&Resource>) -> Result<String, ConfigError> {
        let state = self.state.read().await;
        Ok(state.lookup(resource))
    }

    async fn update(&self, resource: Option<&Resource>, path: &str) -> Result<(), ConfigError> {
        let mut state = self.state.write().await;
        state.set(resource, path);
        Ok(())
    }
}
