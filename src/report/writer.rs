//! Atomic file output.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::OutputError;

/// Write `content` to `path` via a temp file in the same directory, so a
/// failed run never leaves a half-written file behind.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), OutputError> {
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => PathBuf::from("."),
        Some(p) => p.to_path_buf(),
        None => return Err(OutputError::InvalidPath(path.to_path_buf())),
    };

    let mut tmp = NamedTempFile::new_in(&parent).map_err(|source| OutputError::TempFile {
        path: path.to_path_buf(),
        source,
    })?;

    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|source| OutputError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

    tmp.persist(path).map_err(|e| OutputError::WriteFailed {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}
