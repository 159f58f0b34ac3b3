//! Auto-selection and launch-context ports.

use async_trait::async_trait;

use super::ConfigError;
use crate::domain::Resource;

/// Interpreter auto-selection.
///
/// Implementations pick a best-guess interpreter for the scope and record it
/// through [`super::InterpreterPathPort`]. The call may take arbitrarily
/// long; the path resolver bounds it with a timeout and drops the future on
/// expiry, so implementations must tolerate cancellation at any await point.
#[async_trait]
pub trait AutoSelectionPort: Send + Sync {
    /// Select and store an interpreter for the scope.
    async fn auto_select_interpreter(&self, resource: Option<&Resource>)
    -> Result<(), ConfigError>;
}

/// Launch-context hook invoked before resolution consults configuration.
///
/// Gives embedding hosts a chance to auto-activate an environment for the
/// scope. A no-op everywhere that concept does not apply.
#[async_trait]
pub trait LaunchContextPort: Send + Sync {
    /// Run launch-time auto-activation for the scope, if applicable.
    async fn auto_activate(&self, resource: Option<&Resource>);
}

/// A no-op launch context for hosts without activation hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLaunchContext;

impl NoopLaunchContext {
    /// Create a new no-op launch context.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LaunchContextPort for NoopLaunchContext {
    async fn auto_activate(&self, _resource: Option<&Resource>) {}
}
