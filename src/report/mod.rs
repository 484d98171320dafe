//! Rendering summaries as terminal text, Markdown or JSON.

pub mod markdown;
pub mod template;
pub mod terminal;
pub mod writer;

use std::path::Path;

use crate::analysis::ChangeSummary;
use crate::error::OutputError;

pub use markdown::render_markdown;
pub use template::{load_repo_template, render_with_template};
pub use terminal::render_terminal;
pub use writer::write_atomic;

/// The Markdown form used for `--markdown` and `--output`.
///
/// With `use_template`, the repository's PR template under `repo_root` is
/// filled in, or the built-in template when there is none.
pub fn markdown_document(summary: &ChangeSummary, use_template: bool, repo_root: Option<&Path>) -> String {
    if use_template {
        let repo_template = repo_root.and_then(load_repo_template);
        render_with_template(summary, repo_template.as_deref())
    } else {
        render_markdown(summary)
    }
}

/// Serialize the summary as pretty-printed JSON.
pub fn render_json(summary: &ChangeSummary) -> Result<String, OutputError> {
    serde_json::to_string_pretty(summary).map_err(OutputError::Serialize)
}
