//! Repository facts: work tree check, branch names, base resolution.

use std::path::PathBuf;

use colored::Colorize;
use tracing::{debug, warn};

use crate::error::GitError;

use super::runner::{GitRunner, query, succeeds};

/// Branches tried, in order, when the requested base does not exist.
pub const FALLBACK_BASES: &[&str] = &["main", "master", "develop", "origin/main", "origin/master"];

/// Outcome of resolving the base branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseBranch {
    /// What the user asked for.
    pub requested: String,
    /// What the diff is actually taken against.
    pub resolved: String,
}

impl BaseBranch {
    /// Merge-base diff range (`base...HEAD`).
    pub fn diff_range(&self) -> String {
        format!("{}...HEAD", self.resolved)
    }

    /// Commits on HEAD not on base (`base..HEAD`).
    pub fn log_range(&self) -> String {
        format!("{}..HEAD", self.resolved)
    }
}

/// Fail unless the runner's working directory is inside a git work tree.
///
/// This is the one git failure that aborts the run.
pub fn ensure_work_tree(git: &dyn GitRunner) -> Result<(), GitError> {
    let args = ["rev-parse".to_string(), "--is-inside-work-tree".to_string()];
    match git.run(&args) {
        Ok(out) if out.trim() == "true" => Ok(()),
        Ok(out) => Err(GitError::NotARepository(format!(
            "git reports is-inside-work-tree = {}",
            out.trim()
        ))),
        Err(GitError::NonZeroExit { stderr, .. }) => Err(GitError::NotARepository(stderr)),
        Err(e) => Err(e),
    }
}

/// Name of the checked-out branch, or empty when HEAD is detached or unknown.
pub fn current_branch(git: &dyn GitRunner) -> String {
    let name = query(git, &["rev-parse", "--abbrev-ref", "HEAD"]);
    let name = name.trim();
    if name == "HEAD" {
        String::new()
    } else {
        name.to_string()
    }
}

/// The invoking user's configured name, or empty.
pub fn current_user(git: &dyn GitRunner) -> String {
    query(git, &["config", "user.name"]).trim().to_string()
}

/// Top-level directory of the work tree, if git can tell.
pub fn toplevel(git: &dyn GitRunner) -> Option<PathBuf> {
    let out = query(git, &["rev-parse", "--show-toplevel"]);
    let out = out.trim();
    (!out.is_empty()).then(|| PathBuf::from(out))
}

/// Whether `reference` names an existing commit.
pub fn ref_exists(git: &dyn GitRunner, reference: &str) -> bool {
    let spec = format!("{}^{{commit}}", reference);
    succeeds(git, &["rev-parse", "--verify", "--quiet", &spec])
}

/// Resolve the requested base branch, falling back through [`FALLBACK_BASES`].
///
/// When nothing resolves, the base becomes `HEAD`: the diff is then empty
/// and the run ends with the "no changes" warning instead of failing.
pub fn resolve_base(git: &dyn GitRunner, requested: &str) -> BaseBranch {
    if ref_exists(git, requested) {
        debug!("Base branch '{}' resolved", requested);
        return BaseBranch {
            requested: requested.to_string(),
            resolved: requested.to_string(),
        };
    }

    let warning = format!("⚠ Base branch '{}' not found, trying fallbacks", requested);
    eprintln!("{}", warning.yellow());

    for candidate in FALLBACK_BASES.iter().filter(|c| **c != requested) {
        if ref_exists(git, candidate) {
            warn!("Using fallback base branch '{}'", candidate);
            return BaseBranch {
                requested: requested.to_string(),
                resolved: candidate.to_string(),
            };
        }
    }

    eprintln!("{}", "⚠ No base branch found, comparing against HEAD".yellow());
    BaseBranch {
        requested: requested.to_string(),
        resolved: "HEAD".to_string(),
    }
}
