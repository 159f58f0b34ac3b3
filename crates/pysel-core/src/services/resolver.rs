//! The top-level environment resolver facade.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::classifier::EnvironmentClassifier;
use super::handle::ExecutionHandle;
use super::path_resolver::PathResolver;
use crate::domain::{DEFAULT_INTERPRETER, ExecutionRequest};
use crate::events::TelemetryEvent;
use crate::ports::{Collaborators, Disposable, ResolveError};

/// Resolves requests into bound execution handles.
///
/// This is the composition facade over the collaborator ports: path
/// resolution, classification, and binding happen here in a one-way flow.
/// Constructed once at a composition root and shared.
pub struct EnvironmentResolver {
    collaborators: Collaborators,
    path_resolver: PathResolver,
    classifier: EnvironmentClassifier,
}

impl EnvironmentResolver {
    /// Create a resolver over the given collaborators.
    pub fn new(collaborators: Collaborators) -> Self {
        let path_resolver = PathResolver::new(
            collaborators.config.clone(),
            collaborators.interpreter_paths.clone(),
            collaborators.auto_selection.clone(),
            collaborators.launch_context.clone(),
            collaborators.telemetry.clone(),
        );
        let classifier = EnvironmentClassifier::new(
            collaborators.pixi_locator.clone(),
            collaborators.conda_locator.clone(),
            collaborators.store_locator.clone(),
        );
        Self {
            collaborators,
            path_resolver,
            classifier,
        }
    }

    /// Override the auto-selection bound (mainly for tests and embedders
    /// with their own deadlines).
    #[must_use]
    pub fn with_auto_selection_timeout(mut self, bound: Duration) -> Self {
        self.path_resolver = self.path_resolver.with_timeout(bound);
        self
    }

    /// Resolve, classify, and bind an execution handle for the request.
    ///
    /// Never fails merely because no interpreter could be determined: the
    /// plain wrapper is the universal fallback. Only collaborator faults
    /// surface as errors.
    pub async fn create_environment(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionHandle, ResolveError> {
        let resolved = self.path_resolver.resolve(request).await?;
        let process = self
            .collaborators
            .process_factory
            .create(request.resource.as_ref())
            .await?;

        let interpreter = PathBuf::from(&resolved);
        let environment = self.classifier.classify(&interpreter).await?;
        debug!(kind = environment.kind_name(), interpreter = %interpreter.display(), "environment bound");
        self.collaborators
            .telemetry
            .emit(TelemetryEvent::EnvironmentResolved {
                kind: environment.kind_name().to_string(),
            });

        Ok(ExecutionHandle::new(
            environment,
            process,
            self.collaborators.fs.clone(),
        ))
    }

    /// Resolve using pre-captured shell-activation variables.
    ///
    /// When the lookup yields nothing meaningful this degrades to
    /// [`Self::create_environment`] with only the interpreter path set.
    /// Otherwise a fresh process service seeded with the variables is built,
    /// registered for disposal with the owning scope, and classification
    /// runs with the store check skipped.
    pub async fn create_activated_environment(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionHandle, ResolveError> {
        let resource = request.resource.as_ref();
        let interpreter = match request.python_path.as_deref() {
            Some(path) if !path.is_empty() && path != DEFAULT_INTERPRETER => path.to_string(),
            _ => self.collaborators.config.settings(resource).await?.python_path,
        };

        let vars = match self
            .collaborators
            .activation
            .activated_variables(resource, Path::new(&interpreter), false)
            .await
        {
            Ok(vars) => {
                self.collaborators
                    .telemetry
                    .emit(TelemetryEvent::ActivatedVariablesLookup {
                        has_env_vars: vars.as_ref().is_some_and(|v| !v.is_empty()),
                        failed: false,
                    });
                vars
            }
            Err(error) => {
                warn!(%error, "activated-variables lookup failed, using standard resolution");
                self.collaborators
                    .telemetry
                    .emit(TelemetryEvent::ActivatedVariablesLookup {
                        has_env_vars: false,
                        failed: true,
                    });
                None
            }
        };

        let Some(vars) = vars.filter(|v| !v.is_empty()) else {
            let degraded = ExecutionRequest {
                resource: request.resource.clone(),
                python_path: Some(interpreter),
            };
            return self.create_environment(&degraded).await;
        };

        let process = self
            .collaborators
            .process_factory
            .create_with_env(resource, vars)
            .await?;
        self.collaborators
            .disposal
            .register(process.clone() as Arc<dyn Disposable>);

        let environment = self
            .classifier
            .classify_activated(Path::new(&interpreter))
            .await?;
        debug!(kind = environment.kind_name(), %interpreter, "activated environment bound");
        self.collaborators
            .telemetry
            .emit(TelemetryEvent::EnvironmentResolved {
                kind: environment.kind_name().to_string(),
            });

        Ok(ExecutionHandle::new(
            environment,
            process,
            self.collaborators.fs.clone(),
        ))
    }
}
