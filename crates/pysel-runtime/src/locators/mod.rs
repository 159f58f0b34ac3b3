//! Environment locators.
//!
//! Each locator recognizes one installation layout from an interpreter path.
//! They only look at the filesystem; nothing here spawns the tools they
//! detect.

mod conda;
mod pixi;
mod store;

pub use conda::DefaultCondaLocator;
pub use pixi::DefaultPixiLocator;
pub use store::DefaultStoreLocator;

use std::path::{Path, PathBuf};

/// The environment prefix an interpreter lives in.
///
/// Unix interpreters sit in `<prefix>/bin/`, Windows ones in
/// `<prefix>/Scripts/` or directly in the prefix.
pub(crate) fn interpreter_prefix(interpreter: &Path) -> Option<PathBuf> {
    let parent = interpreter.parent()?;
    let dir_name = parent.file_name()?.to_str()?;
    if dir_name.eq_ignore_ascii_case("bin") || dir_name.eq_ignore_ascii_case("scripts") {
        parent.parent().map(Path::to_path_buf)
    } else {
        Some(parent.to_path_buf())
    }
}
