//! Configuration and interpreter-path ports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::domain::{DEFAULT_INTERPRETER, Resource};

/// Effective interpreter settings for a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterSettings {
    /// Configured interpreter path, or the placeholder when unset.
    pub python_path: String,
}

impl InterpreterSettings {
    /// Settings naming a concrete interpreter.
    pub fn new(python_path: impl Into<String>) -> Self {
        Self {
            python_path: python_path.into(),
        }
    }

    /// Whether the settings still hold the unset placeholder.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.python_path.is_empty() || self.python_path == DEFAULT_INTERPRETER
    }
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        Self {
            python_path: DEFAULT_INTERPRETER.to_string(),
        }
    }
}

/// Configuration lookups scoped by resource.
#[async_trait]
pub trait ConfigurationPort: Send + Sync {
    /// Effective settings for the given scope (global when `None`).
    async fn settings(&self, resource: Option<&Resource>)
    -> Result<InterpreterSettings, ConfigError>;
}

/// The stored per-resource interpreter path.
///
/// Reads return the placeholder when nothing has been selected yet; writes
/// are how auto-selection records its choice.
#[async_trait]
pub trait InterpreterPathPort: Send + Sync {
    /// Stored path for the scope, or the placeholder when unset.
    async fn get(&self, resource: Option<&Resource>) -> Result<String, ConfigError>;

    /// Record a selected interpreter for the scope.
    async fn update(&self, resource: Option<&Resource>, path: &str) -> Result<(), ConfigError>;
}
