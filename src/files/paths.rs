//! Path helpers for recording side files.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Append a raw suffix to a path without touching its existing extension.
fn with_suffix(path: &Path, suffix: impl AsRef<OsStr>) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Get the diff file path for a recording.
///
/// The diff path is the recording path with `extension` appended, so
/// `test_data/session` becomes `test_data/session.diff`.
pub fn diff_path_for(recording: &Path, extension: &str) -> PathBuf {
    with_suffix(recording, extension)
}

/// Get the scratch path used while atomically rewriting `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    with_suffix(path, ".tmp")
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
