//! Markdown rendering of a change summary.

use chrono::Utc;

use crate::analysis::ChangeSummary;
use crate::git::{FileChange, FileStatus};

/// Render the full Markdown document, footer dated today (UTC).
pub fn render_markdown(summary: &ChangeSummary) -> String {
    let today = Utc::now().format("%Y-%m-%d").to_string();
    render_markdown_dated(summary, &today)
}

/// Render the full Markdown document with an explicit footer date.
pub fn render_markdown_dated(summary: &ChangeSummary, date: &str) -> String {
    let mut doc = format!("# {}\n\n", summary.title);
    doc.push_str(&render_sections(summary, 2));
    doc.push_str(&footer(summary, date));
    doc
}

/// Summary, file table, stats and the optional sections, with headings at
/// `level` (`2` gives `##`).
pub fn render_sections(summary: &ChangeSummary, level: usize) -> String {
    let hashes = "#".repeat(level.clamp(1, 6));
    let mut out = String::new();

    out.push_str(&format!("{} Summary\n\n{}\n\n", hashes, summary.summary));

    out.push_str(&format!("{} Changes\n\n", hashes));
    out.push_str("| Status | File | Category |\n");
    out.push_str("|--------|------|----------|\n");
    for file in &summary.files {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            file.status,
            file_cell(file),
            file.category
        ));
    }
    out.push('\n');

    out.push_str(&format!("{} Stats\n\n", hashes));
    out.push_str(&format!("- **Files changed:** {}\n", summary.stats.files_changed));
    out.push_str(&format!("- **Additions:** +{}\n", summary.stats.additions));
    out.push_str(&format!("- **Deletions:** -{}\n\n", summary.stats.deletions));

    if !summary.breaking_changes.is_empty() {
        out.push_str(&format!("{} ⚠️ Breaking Changes\n\n", hashes));
        for change in &summary.breaking_changes {
            out.push_str(&format!("- {}\n", change));
        }
        out.push('\n');
    }

    if !summary.suggested_reviewers.is_empty() {
        out.push_str(&format!("{} Suggested Reviewers\n\n", hashes));
        for reviewer in &summary.suggested_reviewers {
            out.push_str(&format!("- {}\n", reviewer));
        }
        out.push('\n');
    }

    out
}

fn file_cell(file: &FileChange) -> String {
    let path = escape_cell(&file.path);
    match (&file.status, &file.old_path) {
        (FileStatus::Renamed | FileStatus::Copied, Some(old)) => {
            format!("`{}` → `{}`", escape_cell(old), path)
        }
        _ => format!("`{}`", path),
    }
}

/// Pipes would split the table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn footer(summary: &ChangeSummary, date: &str) -> String {
    format!(
        "---\n_Generated by prdigest on {} against `{}`_\n",
        date, summary.base_branch
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::DiffStats;
    use crate::git::diff::parse_name_status;

    fn sample() -> ChangeSummary {
        ChangeSummary {
            title: "Add login".to_string(),
            summary: "This PR updates 1 source file. (+3 -1 across 2 files)".to_string(),
            base_branch: "main".to_string(),
            current_branch: "feature/add-login".to_string(),
            files: parse_name_status("M\tsrc/login.ts\nR100\tsrc/old.ts\tsrc/new.ts\n"),
            stats: DiffStats {
                additions: 3,
                deletions: 1,
                files_changed: 2,
            },
            breaking_changes: Vec::new(),
            suggested_reviewers: Vec::new(),
        }
    }

    #[test]
    fn test_markdown_document() {
        let doc = render_markdown_dated(&sample(), "2024-01-01");

        assert!(doc.starts_with("# Add login\n\n## Summary\n"));
        assert!(doc.contains("| Modified | `src/login.ts` | Source |"));
        assert!(doc.contains("| Renamed | `src/old.ts` → `src/new.ts` | Source |"));
        assert!(doc.contains("- **Files changed:** 2"));
        assert!(doc.contains("- **Additions:** +3"));
        assert!(doc.contains("_Generated by prdigest on 2024-01-01 against `main`_"));
    }

    #[test]
    fn test_optional_sections_omitted_when_empty() {
        let doc = render_markdown_dated(&sample(), "2024-01-01");
        assert!(!doc.contains("Breaking Changes"));
        assert!(!doc.contains("Suggested Reviewers"));
    }

    #[test]
    fn test_optional_sections_rendered() {
        let mut summary = sample();
        summary.breaking_changes = vec!["Deleted public entry point: src/index.ts".to_string()];
        summary.suggested_reviewers = vec!["Ana".to_string(), "Bo".to_string()];

        let doc = render_markdown_dated(&summary, "2024-01-01");
        assert!(doc.contains("## ⚠️ Breaking Changes\n\n- Deleted public entry point: src/index.ts\n"));
        assert!(doc.contains("## Suggested Reviewers\n\n- Ana\n- Bo\n"));
    }

    #[test]
    fn test_section_heading_level() {
        let sections = render_sections(&sample(), 3);
        assert!(sections.starts_with("### Summary"));
        assert!(sections.contains("### Stats"));
    }

    #[test]
    fn test_pipe_in_path_is_escaped() {
        let mut summary = sample();
        summary.files = parse_name_status("A\tdocs/a|b.md\n");
        let doc = render_markdown_dated(&summary, "2024-01-01");
        assert!(doc.contains("`docs/a\\|b.md`"));
    }
}
