//! Invoking the git executable.
//!
//! All git access shells out through `std::process::Command`, inheriting the
//! user's git config. The [`GitRunner`] trait exists so analysis code can be
//! driven by canned output in tests.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Trait for executing git commands.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
pub trait GitRunner {
    /// Run git with the given arguments and return its stdout.
    fn run(&self, args: &[String]) -> Result<String, GitError>;
}

/// Default runner that calls the real git binary.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
    workdir: Option<PathBuf>,
}

impl SystemGit {
    /// Locate git, preferring an explicit override over a PATH lookup.
    pub fn locate(program_override: Option<PathBuf>) -> Result<Self, GitError> {
        let program = match program_override {
            Some(path) => path,
            None => which::which("git").map_err(|_| GitError::NotInstalled)?,
        };
        Ok(Self {
            program,
            workdir: None,
        })
    }

    /// Run every command inside `dir` instead of the process working directory.
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.workdir = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[String]) -> Result<String, GitError> {
        let operation = args.first().cloned().unwrap_or_default();

        let mut command = Command::new(&self.program);
        command.args(args);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| GitError::SpawnFailed {
            operation: operation.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::NonZeroExit {
                operation,
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Run git, turning any failure into an empty string.
///
/// Callers treat an empty result as "no data" rather than an error.
pub fn query(git: &dyn GitRunner, args: &[&str]) -> String {
    let owned: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    match git.run(&owned) {
        Ok(stdout) => stdout,
        Err(e) => {
            debug!("git {} returned no data: {}", args.join(" "), e);
            String::new()
        }
    }
}

/// Run git and report only whether it succeeded.
pub fn succeeds(git: &dyn GitRunner, args: &[&str]) -> bool {
    let owned: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    git.run(&owned).is_ok()
}
