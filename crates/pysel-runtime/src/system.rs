//! PATH lookup helper shared by locators and the auto-selector.

use std::path::{Path, PathBuf};

/// Find an executable by name on `PATH`.
///
/// On Windows the `.exe` extension is also tried.
#[must_use]
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths).find_map(|dir| candidate_in(&dir, name))
}

fn candidate_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let direct = dir.join(name);
    if direct.is_file() {
        return Some(direct);
    }

    #[cfg(windows)]
    {
        let with_ext = dir.join(format!("{name}.exe"));
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_candidate_in_finds_file() {
        let temp = TempDir::new().unwrap();
        let exe = temp.path().join("sometool");
        fs::write(&exe, "").unwrap();

        assert_eq!(candidate_in(temp.path(), "sometool"), Some(exe));
        assert_eq!(candidate_in(temp.path(), "missing"), None);
    }
}
