//! Pull-request template support for the Markdown output.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analysis::{ChangeSummary, FileCategory};

use super::markdown::render_sections;

/// Locations checked for a repository PR template, in order.
pub const TEMPLATE_LOCATIONS: &[&str] = &[
    ".github/pull_request_template.md",
    ".github/PULL_REQUEST_TEMPLATE.md",
    "docs/pull_request_template.md",
    "PULL_REQUEST_TEMPLATE.md",
];

/// Heading words after which the generated description is inserted.
const ANCHOR_WORDS: &[&str] = &["summary", "description", "changes"];

/// Find and read the repository's PR template, if there is one.
pub fn load_repo_template(repo_root: &Path) -> Option<String> {
    TEMPLATE_LOCATIONS
        .iter()
        .map(|rel| repo_root.join(rel))
        .find(|path| path.is_file())
        .and_then(|path: PathBuf| {
            debug!("Using PR template {}", path.display());
            std::fs::read_to_string(&path).ok()
        })
}

/// Render the summary into a PR template.
///
/// With a repository template, the generated sections go right after its
/// first Summary/Description/Changes heading, or on top when no such heading
/// exists. Without one, a built-in template with a checklist is used.
pub fn render_with_template(summary: &ChangeSummary, repo_template: Option<&str>) -> String {
    match repo_template {
        Some(template) => fill_repo_template(summary, template),
        None => builtin_template(summary),
    }
}

fn fill_repo_template(summary: &ChangeSummary, template: &str) -> String {
    let lines: Vec<&str> = template.lines().collect();

    let anchor = lines.iter().position(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with('#') && {
            let heading = trimmed.trim_start_matches('#').trim().to_lowercase();
            ANCHOR_WORDS.iter().any(|w| heading.contains(w))
        }
    });

    match anchor {
        Some(index) => {
            let level = lines[index].trim_start().chars().take_while(|c| *c == '#').count();
            let mut out = String::new();
            for line in &lines[..=index] {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&format!("**{}**\n\n", summary.title));
            out.push_str(&render_sections(summary, level + 1));
            for line in &lines[index + 1..] {
                out.push_str(line);
                out.push('\n');
            }
            out
        }
        None => {
            let mut out = format!("# {}\n\n", summary.title);
            out.push_str(&render_sections(summary, 2));
            out.push_str(template);
            if !template.ends_with('\n') {
                out.push('\n');
            }
            out
        }
    }
}

fn builtin_template(summary: &ChangeSummary) -> String {
    let has = |category: FileCategory| summary.files.iter().any(|f| f.category == category);
    let check = |done: bool| if done { "x" } else { " " };

    let mut out = format!("# {}\n\n## Description\n\n", summary.title);
    out.push_str(&render_sections(summary, 3));
    out.push_str("## Checklist\n\n");
    out.push_str(&format!("- [{}] Tests added or updated\n", check(has(FileCategory::Tests))));
    out.push_str(&format!(
        "- [{}] Documentation updated\n",
        check(has(FileCategory::Documentation))
    ));
    out.push_str(&format!(
        "- [{}] Breaking changes documented\n",
        check(!summary.breaking_changes.is_empty())
    ));
    out.push_str("- [ ] Self-reviewed\n");
    out
}
