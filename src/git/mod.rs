//! Git access through the git command line.

pub mod commits;
pub mod diff;
pub mod repo;
pub mod runner;

pub use commits::{CommitMarkers, ParsedCommit, parse_commit_message};
pub use diff::{DiffStats, FileChange, FileStatus};
pub use repo::{BaseBranch, ensure_work_tree, resolve_base};
pub use runner::{GitRunner, SystemGit};
