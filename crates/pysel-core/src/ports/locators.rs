//! Environment locator ports.
//!
//! Each locator answers one question about a resolved interpreter path.
//! "Not mine" is `Ok(None)`/`Ok(false)` so classification can fall through;
//! errors are reserved for genuine probe faults and stop classification.

use async_trait::async_trait;
use std::path::Path;

use super::LocatorError;
use crate::domain::{CondaEnvironment, PixiEnvironment};

/// Maps interpreter paths to Conda environments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CondaLocatorPort: Send + Sync {
    /// The Conda environment owning the interpreter, if any.
    async fn conda_environment(
        &self,
        interpreter: &Path,
    ) -> Result<Option<CondaEnvironment>, LocatorError>;
}

/// Detects Pixi installations and maps interpreters to Pixi environments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PixiLocatorPort: Send + Sync {
    /// Whether a Pixi installation is detectable at all.
    ///
    /// Gates the per-interpreter lookup so hosts without Pixi skip it
    /// entirely.
    async fn is_pixi_installed(&self) -> bool;

    /// The Pixi environment owning the interpreter, if any.
    async fn environment_from_interpreter(
        &self,
        interpreter: &Path,
    ) -> Result<Option<PixiEnvironment>, LocatorError>;
}

/// Detects Microsoft-Store-distributed interpreters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreLocatorPort: Send + Sync {
    /// Whether the path identifies a store-distributed interpreter.
    async fn is_store_interpreter(&self, interpreter: &Path) -> Result<bool, LocatorError>;
}
