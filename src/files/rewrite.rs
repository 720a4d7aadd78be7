//! Append, truncate and atomic rewrite operations.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use super::paths::temp_path_for;

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Truncate `path` to zero length, creating it (and its directory) if needed.
pub fn truncate(path: &Path) -> io::Result<()> {
    ensure_parent(path)?;
    fs::File::create(path).map(|_| ())
}

/// Append `text` verbatim to `path`, creating it if needed.
pub fn append(path: &Path, text: &str) -> io::Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}

/// Replace the contents of `path` using a temp file and rename.
///
/// Readers never observe a half-written file; on rename failure the temp file
/// is removed and the original is left untouched.
pub fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, contents)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
