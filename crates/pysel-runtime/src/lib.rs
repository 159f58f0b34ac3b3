//! Process runtime and OS-level adapters for pysel.
//!
//! Everything in this crate implements a port from `pysel-core` against the
//! real OS: tokio child processes, the filesystem, PATH scans, and the
//! on-disk layouts of Pixi and Conda installations.

pub mod config;
pub mod fs;
pub mod locators;
pub mod process;
pub mod select;
mod system;

// Re-export the adapter set a composition root typically needs
pub use config::{JsonFileConfiguration, StaticConfiguration};
pub use fs::TokioFileSystem;
pub use locators::{DefaultCondaLocator, DefaultPixiLocator, DefaultStoreLocator};
pub use process::{TokioProcessFactory, TokioProcessService};
pub use select::PathScanAutoSelector;
pub use system::find_on_path;

// Silence unused dev-dependency warnings in non-test builds
#[cfg(test)]
use tokio_test as _;
