//! Colored terminal report.

use colored::{ColoredString, Colorize};

use crate::analysis::ChangeSummary;
use crate::analysis::prose::plural;
use crate::git::{FileChange, FileStatus};

/// Render the report shown by default on stdout.
pub fn render_terminal(summary: &ChangeSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", summary.title.bold()));
    let head = if summary.current_branch.is_empty() {
        "HEAD"
    } else {
        summary.current_branch.as_str()
    };
    out.push_str(&format!(
        "{} {} {}\n\n",
        summary.base_branch.cyan(),
        "←".dimmed(),
        head.cyan()
    ));

    out.push_str(&format!("{}\n", "Summary".bold().underline()));
    out.push_str(&format!("  {}\n\n", summary.summary));

    out.push_str(&format!(
        "{}\n",
        format!("Files ({})", summary.files.len()).bold().underline()
    ));
    for (category, files) in summary.files_by_category() {
        out.push_str(&format!("  {}\n", category.as_str().bold()));
        for file in files {
            out.push_str(&format!("    {} {}\n", status_marker(file.status), file_label(file)));
        }
    }
    out.push('\n');

    out.push_str(&format!(
        "{} {} {} across {} {}\n",
        "Stats:".bold(),
        format!("+{}", summary.stats.additions).green(),
        format!("-{}", summary.stats.deletions).red(),
        summary.stats.files_changed,
        plural(summary.stats.files_changed, "file", "files")
    ));

    if !summary.breaking_changes.is_empty() {
        out.push_str(&format!("\n{}\n", "⚠ Breaking changes".red().bold()));
        for change in &summary.breaking_changes {
            out.push_str(&format!("  {} {}\n", "•".red(), change));
        }
    }

    if !summary.suggested_reviewers.is_empty() {
        out.push_str(&format!("\n{}\n", "Suggested reviewers".bold()));
        for reviewer in &summary.suggested_reviewers {
            out.push_str(&format!("  • {}\n", reviewer.cyan()));
        }
    }

    out
}

fn status_marker(status: FileStatus) -> ColoredString {
    let letter = status.letter().to_string();
    match status {
        FileStatus::Added => letter.green(),
        FileStatus::Modified => letter.yellow(),
        FileStatus::Deleted => letter.red(),
        FileStatus::Renamed | FileStatus::Copied => letter.cyan(),
    }
}

fn file_label(file: &FileChange) -> String {
    match &file.old_path {
        Some(old) => format!("{} → {}", old, file.path),
        None => file.path.clone(),
    }
}
