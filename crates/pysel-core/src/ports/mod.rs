//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces the resolution core expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem implementation details in signatures
//! - A collaborator that finds nothing returns `Ok(None)`/`Ok(false)`,
//!   never an error; errors mean a genuine operational fault
//! - Telemetry is fire-and-forget and never awaited for correctness

pub mod activation;
pub mod config;
pub mod disposal;
pub mod fs;
pub mod locators;
pub mod process;
pub mod selection;
pub mod telemetry;

use std::sync::Arc;
use thiserror::Error;

pub use activation::{EnvironmentActivationPort, NoopActivation};
pub use config::{ConfigurationPort, InterpreterPathPort, InterpreterSettings};
pub use disposal::{Disposable, DisposalRegistry};
pub use fs::FileSystemPort;
pub use locators::{CondaLocatorPort, PixiLocatorPort, StoreLocatorPort};
pub use process::{ExecOptions, ProcessServiceFactoryPort, ProcessServicePort};
pub use selection::{AutoSelectionPort, LaunchContextPort, NoopLaunchContext};
pub use telemetry::{NoopTelemetry, TelemetryPort};

/// Errors from configuration and interpreter-path collaborators.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Settings could not be read from the backing store.
    #[error("Failed to load settings: {0}")]
    Load(String),

    /// Settings could not be written to the backing store.
    #[error("Failed to persist settings: {0}")]
    Store(String),
}

/// Errors from the process-spawning collaborator.
#[derive(Debug, Clone, Error)]
pub enum ProcessError {
    /// The program could not be spawned.
    #[error("Failed to spawn {program}: {reason}")]
    SpawnFailed {
        /// Program that failed to start.
        program: String,
        /// Underlying OS error text.
        reason: String,
    },

    /// Process output could not be collected.
    #[error("Failed to read process output: {0}")]
    Output(String),

    /// The service was disposed and can no longer spawn.
    #[error("Process service has been disposed")]
    Disposed,
}

/// Errors from environment locator collaborators.
///
/// A locator that simply finds no match returns `Ok(None)`; this error is
/// reserved for operational faults while probing.
#[derive(Debug, Clone, Error)]
pub enum LocatorError {
    /// The probe itself failed (I/O fault, malformed tool output).
    #[error("Environment probe failed: {0}")]
    Probe(String),
}

/// Errors from the environment-activation collaborator.
#[derive(Debug, Clone, Error)]
pub enum ActivationError {
    /// Activated variables could not be fetched.
    #[error("Failed to fetch activated environment variables: {0}")]
    Fetch(String),
}

/// Canonical error type for resolution operations.
///
/// Collaborator faults propagate through this unmodified; the resolver adds
/// no retry logic of its own.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Configuration collaborator failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Process collaborator failed.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Locator collaborator failed.
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// Activation collaborator failed.
    #[error(transparent)]
    Activation(#[from] ActivationError),

    /// An interpreter probe produced output that could not be parsed.
    #[error("Interpreter probe returned malformed output: {0}")]
    MalformedProbeOutput(String),
}

/// Container for all collaborator trait objects.
///
/// This struct provides a consistent way to wire collaborators at a
/// composition root without coupling services to concrete implementations.
#[derive(Clone)]
pub struct Collaborators {
    /// Configuration lookups (effective interpreter settings).
    pub config: Arc<dyn ConfigurationPort>,
    /// Stored per-resource interpreter path.
    pub interpreter_paths: Arc<dyn InterpreterPathPort>,
    /// Interpreter auto-selection.
    pub auto_selection: Arc<dyn AutoSelectionPort>,
    /// Launch-context auto-activation hook.
    pub launch_context: Arc<dyn LaunchContextPort>,
    /// Process-service construction.
    pub process_factory: Arc<dyn ProcessServiceFactoryPort>,
    /// Conda environment lookup.
    pub conda_locator: Arc<dyn CondaLocatorPort>,
    /// Pixi environment lookup.
    pub pixi_locator: Arc<dyn PixiLocatorPort>,
    /// Microsoft-Store interpreter detection.
    pub store_locator: Arc<dyn StoreLocatorPort>,
    /// Activated-variables lookup.
    pub activation: Arc<dyn EnvironmentActivationPort>,
    /// Filesystem queries.
    pub fs: Arc<dyn FileSystemPort>,
    /// Telemetry sink.
    pub telemetry: Arc<dyn TelemetryPort>,
    /// Registry for scoped resources created during resolution.
    pub disposal: Arc<DisposalRegistry>,
}
