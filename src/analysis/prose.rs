//! Prose summary and title generation.

use std::collections::HashMap;

use crate::git::{DiffStats, FileChange, ParsedCommit};

use super::category::FileCategory;

/// Title used when nothing better can be derived.
pub const FALLBACK_TITLE: &str = "Changes";

/// Sentence used when no summarized category has any files.
pub const FALLBACK_PROSE: &str = "This PR contains miscellaneous changes.";

/// Count changed files per category.
pub fn count_by_category(files: &[FileChange]) -> HashMap<FileCategory, usize> {
    let mut counts = HashMap::new();
    for file in files {
        *counts.entry(file.category).or_insert(0) += 1;
    }
    counts
}

/// Build the prose summary: one clause per non-empty category, then the
/// aggregate stats suffix.
pub fn summarize(files: &[FileChange], stats: &DiffStats) -> String {
    let counts = count_by_category(files);

    let clauses: Vec<String> = FileCategory::SUMMARIZED
        .iter()
        .filter_map(|category| {
            let count = counts.get(category).copied().unwrap_or(0);
            (count > 0).then(|| format!("{} {} {}", count, category.noun(), plural(count, "file", "files")))
        })
        .collect();

    let lead = if clauses.is_empty() {
        FALLBACK_PROSE.to_string()
    } else {
        format!("This PR updates {}.", clauses.join(", "))
    };

    format!("{}{}", lead, stats_suffix(stats))
}

/// ` (+A -D across N files)`
pub fn stats_suffix(stats: &DiffStats) -> String {
    format!(
        " (+{} -{} across {} {})",
        stats.additions,
        stats.deletions,
        stats.files_changed,
        plural(stats.files_changed, "file", "files")
    )
}

/// Derive a PR title.
///
/// A single commit lends its subject; otherwise the branch name is
/// humanized (`feature/add-login` becomes `Add login`).
pub fn derive_title(branch: &str, commits: &[ParsedCommit]) -> String {
    if let [only] = commits {
        let description = only.description().trim();
        if !description.is_empty() {
            return capitalize(description);
        }
    }

    let branch = branch.trim();
    if branch.is_empty() || matches!(branch, "HEAD" | "main" | "master") {
        return FALLBACK_TITLE.to_string();
    }

    let last = branch.rsplit('/').next().unwrap_or(branch);
    let words: Vec<&str> = last
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        capitalize(&words.join(" "))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub(crate) fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
