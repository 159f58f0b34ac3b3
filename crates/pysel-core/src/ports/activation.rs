//! Environment-activation port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

use super::ActivationError;
use crate::domain::Resource;

/// Lookup of shell-activation side effects for an interpreter.
///
/// Implementations capture the environment variables a shell activation of
/// the interpreter would produce. How they do that (activation scripts,
/// caches, probes) is their business.
#[async_trait]
pub trait EnvironmentActivationPort: Send + Sync {
    /// Activated variables for the interpreter, or `None` when activation
    /// yields nothing meaningful.
    ///
    /// With `allow_fetch_errors` set, operational faults surface as errors;
    /// otherwise implementations should swallow them and return `None`.
    async fn activated_variables(
        &self,
        resource: Option<&Resource>,
        interpreter: &Path,
        allow_fetch_errors: bool,
    ) -> Result<Option<HashMap<String, String>>, ActivationError>;
}

/// An activation port that never finds variables.
///
/// Hosts without a shell-activation probe wire this in; resolution then
/// always degrades to the standard path, which is the correct behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopActivation;

impl NoopActivation {
    /// Create a new no-op activation port.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnvironmentActivationPort for NoopActivation {
    async fn activated_variables(
        &self,
        _resource: Option<&Resource>,
        _interpreter: &Path,
        _allow_fetch_errors: bool,
    ) -> Result<Option<HashMap<String, String>>, ActivationError> {
        Ok(None)
    }
}
