//! Reviewer suggestions from recent file history.

use std::collections::HashMap;

use tracing::debug;

use crate::git::FileChange;
use crate::git::runner::{GitRunner, query};

/// Authors inspected per file.
pub const AUTHORS_PER_FILE: usize = 5;

/// Maximum number of suggested reviewers.
pub const MAX_REVIEWERS: usize = 3;

/// Suggest up to [`MAX_REVIEWERS`] people who recently touched the changed files.
///
/// Queries the last [`AUTHORS_PER_FILE`] authors of every file, so this costs
/// one git invocation per changed file.
pub fn suggest_reviewers(git: &dyn GitRunner, files: &[FileChange], current_user: &str) -> Vec<String> {
    let limit = format!("-n{}", AUTHORS_PER_FILE);
    let histories = files.iter().map(|file| {
        let pathspec = top_pathspec(&file.path);
        let output = query(git, &["log", &limit, "--format=%an", "--", &pathspec]);
        output
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect::<Vec<_>>()
    });

    let reviewers = rank_reviewers(histories, current_user);
    debug!("Suggested reviewers: {:?}", reviewers);
    reviewers
}

/// Diff paths are relative to the work tree root, while plain pathspecs are
/// relative to the working directory. Anchor them at the root and match
/// them literally.
pub fn top_pathspec(path: &str) -> String {
    format!(":(top,literal){}", path)
}

/// Rank authors by how often they appear across all histories.
///
/// Ties keep first-seen order. `exclude` (the invoking user) never appears
/// in the result.
pub fn rank_reviewers<I, A>(histories: I, exclude: &str) -> Vec<String>
where
    I: IntoIterator<Item = A>,
    A: IntoIterator<Item = String>,
{
    let exclude = exclude.trim();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for author in histories.into_iter().flatten() {
        if author.is_empty() || author == exclude {
            continue;
        }
        match index.get(&author) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(author.clone(), counts.len());
                counts.push((author, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_REVIEWERS)
        .map(|(name, _)| name)
        .collect()
}
