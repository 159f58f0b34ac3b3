//! Process-spawning ports.
//!
//! The process service is the one collaborator every classified environment
//! ends up talking to. It expresses intent (run this program, observe its
//! output) and hides all child-process plumbing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Disposable, ProcessError};
use crate::domain::{OutputStream, ProcessOutput, Resource};

/// Per-call execution options.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Working directory for the child, when it matters.
    pub cwd: Option<PathBuf>,
    /// Extra environment variables layered over the service's environment.
    pub env: Option<HashMap<String, String>>,
}

/// A bound process-spawning service.
///
/// Services created for activated environments carry the captured activation
/// variables as their base environment; [`Disposable`] is a supertrait so
/// such services can be handed to a [`super::DisposalRegistry`].
#[async_trait]
pub trait ProcessServicePort: Disposable {
    /// Run a program to completion and collect its output.
    async fn exec(
        &self,
        program: &Path,
        args: &[String],
        options: ExecOptions,
    ) -> Result<ProcessOutput, ProcessError>;

    /// Run a program and observe its output as a line stream.
    ///
    /// The child is released when the returned stream is dropped.
    async fn exec_observable(
        &self,
        program: &Path,
        args: &[String],
        options: ExecOptions,
    ) -> Result<OutputStream, ProcessError>;
}

/// Factory for process services.
#[async_trait]
pub trait ProcessServiceFactoryPort: Send + Sync {
    /// Create a service using the host's own environment.
    async fn create(
        &self,
        resource: Option<&Resource>,
    ) -> Result<Arc<dyn ProcessServicePort>, ProcessError>;

    /// Create a service whose base environment is the given variable map.
    async fn create_with_env(
        &self,
        resource: Option<&Resource>,
        vars: HashMap<String, String>,
    ) -> Result<Arc<dyn ProcessServicePort>, ProcessError>;
}
