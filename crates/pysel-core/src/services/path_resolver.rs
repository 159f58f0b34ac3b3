//! Effective interpreter path resolution.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::{DEFAULT_INTERPRETER, ExecutionRequest};
use crate::events::TelemetryEvent;
use crate::ports::{
    AutoSelectionPort, ConfigurationPort, InterpreterPathPort, LaunchContextPort, ResolveError,
    TelemetryPort,
};

/// Bound on the wait for interpreter auto-selection.
///
/// Auto-selection normally finishes quickly; the bound only matters when a
/// consumer misuses the API before selection infrastructure is ready, and in
/// that case resolution degrades to whatever configuration holds rather than
/// blocking the request.
pub const AUTO_SELECTION_TIMEOUT: Duration = Duration::from_secs(50);

/// Resolves a request to an effective interpreter path.
///
/// Requests that already name a concrete interpreter short-circuit without
/// touching any collaborator. Everything else consults configuration, with a
/// bounded auto-selection step when nothing is configured yet.
pub struct PathResolver {
    config: Arc<dyn ConfigurationPort>,
    interpreter_paths: Arc<dyn InterpreterPathPort>,
    auto_selection: Arc<dyn AutoSelectionPort>,
    launch_context: Arc<dyn LaunchContextPort>,
    telemetry: Arc<dyn TelemetryPort>,
    auto_selection_timeout: Duration,
}

impl PathResolver {
    /// Create a resolver with the default auto-selection bound.
    pub fn new(
        config: Arc<dyn ConfigurationPort>,
        interpreter_paths: Arc<dyn InterpreterPathPort>,
        auto_selection: Arc<dyn AutoSelectionPort>,
        launch_context: Arc<dyn LaunchContextPort>,
        telemetry: Arc<dyn TelemetryPort>,
    ) -> Self {
        Self {
            config,
            interpreter_paths,
            auto_selection,
            launch_context,
            telemetry,
            auto_selection_timeout: AUTO_SELECTION_TIMEOUT,
        }
    }

    /// Override the auto-selection bound.
    #[must_use]
    pub const fn with_timeout(mut self, bound: Duration) -> Self {
        self.auto_selection_timeout = bound;
        self
    }

    /// Resolve the effective interpreter path for a request.
    ///
    /// The bounded wait never fails the request: on timeout a diagnostic is
    /// logged and resolution proceeds with whatever configuration holds. The
    /// losing auto-selection future is dropped; late completion is ignored.
    pub async fn resolve(&self, request: &ExecutionRequest) -> Result<String, ResolveError> {
        if request.has_concrete_path() {
            // Fast path: honor the caller's choice, no side effects
            return Ok(request.python_path.clone().unwrap_or_default());
        }

        let resource = request.resource.as_ref();
        self.launch_context.auto_activate(resource).await;

        let stored = self.interpreter_paths.get(resource).await?;
        if stored.is_empty() || stored == DEFAULT_INTERPRETER {
            debug!(scope = ?resource.map(ToString::to_string), "no interpreter selected yet, auto-selecting");
            match timeout(
                self.auto_selection_timeout,
                self.auto_selection.auto_select_interpreter(resource),
            )
            .await
            {
                Ok(outcome) => outcome?,
                Err(_elapsed) => {
                    let waited_secs = self.auto_selection_timeout.as_secs();
                    warn!(
                        waited_secs,
                        "interpreter auto-selection timed out, continuing with configured value"
                    );
                    self.telemetry
                        .emit(TelemetryEvent::AutoSelectionTimedOut { waited_secs });
                }
            }
        }

        let settings = self.config.settings(resource).await?;
        Ok(settings.python_path)
    }
}
