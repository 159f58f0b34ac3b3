//! Resolution services - the orchestration layer.
//!
//! Services here compose ports into the one-way flow
//! requested path -> resolved path -> classified environment -> bound handle.
//! They are pure orchestrators and never touch the OS directly.

mod classifier;
mod handle;
mod path_resolver;
mod resolver;

pub use classifier::EnvironmentClassifier;
pub use handle::ExecutionHandle;
pub use path_resolver::{AUTO_SELECTION_TIMEOUT, PathResolver};
pub use resolver::EnvironmentResolver;
