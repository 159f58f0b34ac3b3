//! Core domain types, ports, and services for Python interpreter resolution.
//!
//! This crate is pure composition logic: given a requested interpreter path
//! (or nothing), it resolves an effective path, classifies the environment
//! that owns it (Pixi, Conda, Microsoft Store, or a plain interpreter), and
//! binds the result into a uniform execution handle.
//!
//! All infrastructure (process spawning, filesystem, configuration storage,
//! environment locators) is reached through the traits in [`ports`];
//! implementations live in adapter crates such as `pysel-runtime`.

pub mod domain;
pub mod events;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    CondaEnvironment, DEFAULT_INTERPRETER, ExecutionInfo, ExecutionRequest, InterpreterInfo,
    OutputLine, OutputSource, OutputStream, PixiEnvironment, PlainEnvironment, ProcessOutput,
    PythonEnvironment, Resource, StoreEnvironment,
};
pub use events::TelemetryEvent;
pub use ports::{
    ActivationError, AutoSelectionPort, Collaborators, CondaLocatorPort, ConfigError,
    ConfigurationPort, Disposable, DisposalRegistry, EnvironmentActivationPort, ExecOptions,
    FileSystemPort, InterpreterPathPort, InterpreterSettings, LaunchContextPort, LocatorError,
    NoopActivation, NoopLaunchContext, NoopTelemetry, PixiLocatorPort, ProcessError,
    ProcessServiceFactoryPort, ProcessServicePort, ResolveError, StoreLocatorPort, TelemetryPort,
};
pub use services::{
    AUTO_SELECTION_TIMEOUT, EnvironmentClassifier, EnvironmentResolver, ExecutionHandle,
    PathResolver,
};

// Silence unused dev-dependency warnings in non-test builds
#[cfg(test)]
use tokio_test as _;
