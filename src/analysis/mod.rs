//! Change analysis: categories, prose, breaking changes, reviewers.
//!
//! [`ChangeAnalyzer`] turns git's textual output into a [`ChangeSummary`].
//! Every git query degrades to "no data" on failure, so analysis never
//! fails; it just produces emptier summaries.

pub mod breaking;
pub mod category;
pub mod prose;
pub mod reviewers;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::git::runner::GitRunner;
use crate::git::{BaseBranch, DiffStats, FileChange, commits, diff, repo};

pub use breaking::detect_breaking_changes;
pub use category::{FileCategory, categorize};
pub use prose::{derive_title, summarize};
pub use reviewers::{rank_reviewers, suggest_reviewers};

/// Which optional analyses to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzerOptions {
    pub detect_breaking: bool,
    pub suggest_reviewers: bool,
}

/// Everything known about the branch's changes. Built once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub title: String,
    pub summary: String,
    pub base_branch: String,
    pub current_branch: String,
    pub files: Vec<FileChange>,
    pub stats: DiffStats,
    pub breaking_changes: Vec<String>,
    pub suggested_reviewers: Vec<String>,
}

impl ChangeSummary {
    pub fn has_changes(&self) -> bool {
        !self.files.is_empty()
    }

    /// Files grouped by category in summary order, `Other` last.
    pub fn files_by_category(&self) -> Vec<(FileCategory, Vec<&FileChange>)> {
        FileCategory::SUMMARIZED
            .iter()
            .chain(std::iter::once(&FileCategory::Other))
            .filter_map(|category| {
                let files: Vec<&FileChange> =
                    self.files.iter().filter(|f| f.category == *category).collect();
                (!files.is_empty()).then_some((*category, files))
            })
            .collect()
    }
}

/// Derives a [`ChangeSummary`] from git output.
pub struct ChangeAnalyzer<'a> {
    git: &'a dyn GitRunner,
    options: AnalyzerOptions,
}

impl<'a> ChangeAnalyzer<'a> {
    pub fn new(git: &'a dyn GitRunner, options: AnalyzerOptions) -> Self {
        Self { git, options }
    }

    /// Analyze HEAD against `base`.
    ///
    /// Breaking-change and reviewer analysis are skipped when there are no
    /// changed files.
    pub fn analyze(&self, base: &BaseBranch) -> ChangeSummary {
        let files = diff::changed_files(self.git, base);
        let stats = diff::diff_stats(self.git, base);
        let commits = commits::fetch_commits(self.git, base);
        let current_branch = repo::current_branch(self.git);

        info!(
            "{} changed files, {} commits against {}",
            files.len(),
            commits.len(),
            base.resolved
        );

        let title = derive_title(&current_branch, &commits);
        let summary = summarize(&files, &stats);

        let breaking_changes = if self.options.detect_breaking && !files.is_empty() {
            let diff_text = diff::full_diff(self.git, base);
            debug!("Scanning {} bytes of diff for breaking changes", diff_text.len());
            detect_breaking_changes(&diff_text, &commits, &files)
        } else {
            Vec::new()
        };

        let suggested_reviewers = if self.options.suggest_reviewers && !files.is_empty() {
            let me = repo::current_user(self.git);
            suggest_reviewers(self.git, &files, &me)
        } else {
            Vec::new()
        };

        ChangeSummary {
            title,
            summary,
            base_branch: base.resolved.clone(),
            current_branch,
            files,
            stats,
            breaking_changes,
            suggested_reviewers,
        }
    }
}
