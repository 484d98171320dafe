//! prdigest - A CLI tool that summarizes the changes between the current branch
//! and a base branch.
//!
//! # Overview
//!
//! prdigest shells out to git for the name-status, shortstat, diff and log
//! of the branch, categorizes the changed files, and renders a pull-request
//! style summary as a colored terminal report, Markdown, or JSON. Optional
//! heuristics flag likely breaking changes and suggest reviewers from recent
//! file history.

pub mod analysis;
pub mod config;
pub mod error;
pub mod git;
pub mod report;

// Re-export commonly used types
pub use analysis::{AnalyzerOptions, ChangeAnalyzer, ChangeSummary, FileCategory};
pub use config::{Config, DisplayMode};
pub use error::{GitError, OutputError};
pub use git::{BaseBranch, DiffStats, FileChange, FileStatus, GitRunner, SystemGit};
