//! Run configuration: CLI flags merged with environment overrides.

use std::env;
use std::path::PathBuf;

use tracing::warn;

/// Base branch used when neither the CLI nor the environment names one.
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Environment variable overriding the default base branch.
pub const BASE_ENV_VAR: &str = "PRDIGEST_BASE";

/// Environment variable overriding the git executable.
pub const GIT_ENV_VAR: &str = "PRDIGEST_GIT";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "PRDIGEST_LOG";

/// How the summary is shown on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Terminal,
    Markdown,
    Json,
}

/// Resolved configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_branch: String,
    pub display: DisplayMode,
    pub use_template: bool,
    pub detect_breaking: bool,
    pub suggest_reviewers: bool,
    pub output: Option<PathBuf>,
    pub git_program: Option<PathBuf>,
}

/// Pick the base branch: explicit argument, then `PRDIGEST_BASE`, then `main`.
pub fn resolve_base_branch(explicit: Option<&str>) -> String {
    if let Some(branch) = explicit.map(str::trim).filter(|b| !b.is_empty()) {
        return branch.to_string();
    }

    match env::var(BASE_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        Ok(_) => {
            warn!(
                "Empty {} value, using default base branch '{}'",
                BASE_ENV_VAR, DEFAULT_BASE_BRANCH
            );
            DEFAULT_BASE_BRANCH.to_string()
        }
        Err(_) => DEFAULT_BASE_BRANCH.to_string(),
    }
}

/// Read the git executable override from `PRDIGEST_GIT`.
///
/// Empty values are ignored so `PRDIGEST_GIT=` behaves like unset.
pub fn git_program_override() -> Option<PathBuf> {
    match env::var(GIT_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => Some(PathBuf::from(v.trim())),
        _ => None,
    }
}

/// Tracing filter directive: `debug` when verbose, else `PRDIGEST_LOG`, else `warn`.
pub fn log_filter(verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    match env::var(LOG_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => "warn".to_string(),
    }
}
