//! Heuristic breaking-change detection.
//!
//! Best-effort signals only: false positives and false negatives are both
//! expected.

use regex_lite::Regex;
use semver::Version;

use crate::git::diff::unquote_path;
use crate::git::{FileChange, FileStatus, ParsedCommit};

/// Maximum number of removed-export lines reported.
pub const MAX_REMOVED_EXPORTS: usize = 5;

/// Manifest files whose `version` field is watched.
pub const MANIFESTS: &[&str] = &["package.json", "Cargo.toml", "pyproject.toml"];

/// Collect suspected breaking changes, in this order: commit markers,
/// removed exports, deleted entry points, manifest version changes.
pub fn detect_breaking_changes(
    diff_text: &str,
    commits: &[ParsedCommit],
    files: &[FileChange],
) -> Vec<String> {
    let mut found = Vec::new();
    found.extend(breaking_commits(commits));
    found.extend(removed_exports(diff_text));
    found.extend(deleted_entry_points(files));
    found.extend(version_changes(diff_text));
    found
}

fn breaking_commits(commits: &[ParsedCommit]) -> Vec<String> {
    commits
        .iter()
        .filter(|c| c.breaking)
        .map(|c| {
            let short = &c.hash[..c.hash.len().min(7)];
            format!("Commit {}: {}", short, c.subject)
        })
        .collect()
}

fn removed_exports(diff_text: &str) -> Vec<String> {
    let re = Regex::new(r"^-\s*(export\s|export\{|pub\s+(fn|struct|enum|trait|mod|const|type|use)\s)")
        .unwrap();

    diff_text
        .lines()
        .filter(|line| !line.starts_with("---"))
        .filter(|line| re.is_match(line))
        .take(MAX_REMOVED_EXPORTS)
        .map(|line| format!("Removed export: {}", line[1..].trim()))
        .collect()
}

fn deleted_entry_points(files: &[FileChange]) -> Vec<String> {
    files
        .iter()
        .filter(|f| f.status == FileStatus::Deleted)
        .filter(|f| {
            let name = f.path.rsplit('/').next().unwrap_or(&f.path).to_lowercase();
            name.contains("index.") || name.contains("api.")
        })
        .map(|f| format!("Deleted public entry point: {}", f.path))
        .collect()
}

/// Old and new `version` values seen in one manifest's diff section.
#[derive(Debug, Default)]
struct VersionEdit {
    path: String,
    old: Option<String>,
    new: Option<String>,
}

fn version_changes(diff_text: &str) -> Vec<String> {
    let version_re = Regex::new(r#"^([-+])\s*"?version"?\s*[:=]\s*"([^"]+)""#).unwrap();

    let mut edits: Vec<VersionEdit> = Vec::new();
    let mut current: Option<VersionEdit> = None;

    for line in diff_text.lines() {
        if let Some(header) = line.strip_prefix("diff --git ") {
            edits.extend(current.take().filter(|e| e.old.is_some() || e.new.is_some()));
            let path = diff_header_path(header);
            let name = path.rsplit('/').next().unwrap_or(&path);
            if MANIFESTS.contains(&name) {
                current = Some(VersionEdit {
                    path,
                    ..Default::default()
                });
            }
            continue;
        }

        let Some(edit) = current.as_mut() else {
            continue;
        };
        if line.starts_with("---") || line.starts_with("+++") {
            continue;
        }
        if let Some(caps) = version_re.captures(line) {
            let value = caps[2].to_string();
            if &caps[1] == "-" {
                edit.old.get_or_insert(value);
            } else {
                edit.new.get_or_insert(value);
            }
        }
    }
    edits.extend(current.take().filter(|e| e.old.is_some() || e.new.is_some()));

    edits.iter().map(describe_version_edit).collect()
}

/// New-side path of a `diff --git a/.. b/..` header, quoted or not.
fn diff_header_path(header: &str) -> String {
    if let Some((_, quoted)) = header.rsplit_once(" \"b/") {
        return unquote_path(&format!("\"{}", quoted));
    }
    header
        .rsplit_once(" b/")
        .map(|(_, b)| b)
        .unwrap_or(header)
        .to_string()
}

fn describe_version_edit(edit: &VersionEdit) -> String {
    match (edit.old.as_deref(), edit.new.as_deref()) {
        (Some(old), Some(new)) => {
            let major = match (Version::parse(old), Version::parse(new)) {
                (Ok(o), Ok(n)) => is_major_bump(&o, &n),
                _ => false,
            };
            format!(
                "Version changed in {}: {} -> {}{}",
                edit.path,
                old,
                new,
                if major { " (major bump)" } else { "" }
            )
        }
        _ => format!("Version field changed in {}", edit.path),
    }
}

/// A major bump, or a minor bump while still below 1.0.
fn is_major_bump(old: &Version, new: &Version) -> bool {
    if new.major != old.major {
        return new.major > old.major;
    }
    new.major == 0 && new.minor > old.minor
}
