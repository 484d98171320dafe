//! Error types for prdigest modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from git operations.
///
/// Only the fatal cases surface here. Individual query failures are
/// degraded to empty output by [`crate::git::runner::query`].
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH. Install git or set PRDIGEST_GIT")]
    NotInstalled,

    #[error("Not a git repository (or any of the parent directories): {0}")]
    NotARepository(String),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with code {code}: {stderr}")]
    NonZeroExit {
        operation: String,
        code: i32,
        stderr: String,
    },
}

/// Errors from writing rendered output.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Output path {0} has no parent directory")]
    InvalidPath(PathBuf),

    #[error("Failed to create temporary file next to {path}: {source}")]
    TempFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize summary: {0}")]
    Serialize(#[source] serde_json::Error),
}
