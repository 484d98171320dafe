//! Parsing `git diff --name-status` and `git diff --shortstat` output.

use std::fmt;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::category::{FileCategory, categorize};

use super::repo::BaseBranch;
use super::runner::{GitRunner, query};

/// Status of a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
}

impl FileStatus {
    /// Map a name-status letter (`M`, `R100`, `C75`, ...) to a status.
    ///
    /// Type changes and unmerged entries count as modifications.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.chars().next()? {
            'A' => Some(Self::Added),
            'M' | 'T' | 'U' => Some(Self::Modified),
            'D' => Some(Self::Deleted),
            'R' => Some(Self::Renamed),
            'C' => Some(Self::Copied),
            _ => None,
        }
    }

    /// Single-letter marker used in compact listings.
    pub fn letter(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Copied => 'C',
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "Added"),
            FileStatus::Modified => write!(f, "Modified"),
            FileStatus::Deleted => write!(f, "Deleted"),
            FileStatus::Renamed => write!(f, "Renamed"),
            FileStatus::Copied => write!(f, "Copied"),
        }
    }
}

/// A file changed between the base branch and HEAD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    pub status: FileStatus,
    pub path: String,
    /// Source path for renames and copies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    pub category: FileCategory,
}

/// Aggregate line and file counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
    pub files_changed: usize,
}

/// Decode a path as printed by git.
///
/// Paths with non-ASCII bytes or control characters come wrapped in double
/// quotes with C-style escapes (`"src/caf\303\251.ts"`). Anything else is
/// returned unchanged.
pub fn unquote_path(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) else {
        return raw.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut iter = inner.bytes().peekable();
    while let Some(b) = iter.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        match iter.next() {
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b't') => bytes.push(b'\t'),
            Some(b'n') => bytes.push(b'\n'),
            Some(b'v') => bytes.push(0x0b),
            Some(b'f') => bytes.push(0x0c),
            Some(b'r') => bytes.push(b'\r'),
            Some(d @ b'0'..=b'7') => {
                let mut value = u32::from(d - b'0');
                for _ in 0..2 {
                    match iter.peek() {
                        Some(&o @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(o - b'0');
                            iter.next();
                        }
                        _ => break,
                    }
                }
                bytes.push(value as u8);
            }
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse one `--name-status` line.
///
/// Renames and copies carry two tab-separated paths; the new path is kept.
pub fn parse_name_status_line(line: &str) -> Option<FileChange> {
    let mut parts = line.split('\t');
    let status = FileStatus::from_code(parts.next()?.trim())?;
    let first = parts.next()?.trim();
    if first.is_empty() {
        return None;
    }
    let first = unquote_path(first);

    let (path, old_path) = match (status, parts.next()) {
        (FileStatus::Renamed | FileStatus::Copied, Some(new_path)) if !new_path.trim().is_empty() => {
            (unquote_path(new_path.trim()), Some(first))
        }
        _ => (first, None),
    };

    let category = categorize(&path);
    Some(FileChange {
        status,
        path,
        old_path,
        category,
    })
}

/// Parse full `--name-status` output, skipping lines that do not parse.
pub fn parse_name_status(output: &str) -> Vec<FileChange> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_name_status_line(line);
            if parsed.is_none() {
                debug!("Skipping unparseable name-status line: {:?}", line);
            }
            parsed
        })
        .collect()
}

/// Parse a `--shortstat` line such as
/// ` 3 files changed, 10 insertions(+), 2 deletions(-)`.
///
/// Missing parts count as zero, so empty input yields all zeros.
pub fn parse_shortstat(output: &str) -> DiffStats {
    let re = Regex::new(r"(\d+) (files? changed|insertions?\(\+\)|deletions?\(-\))").unwrap();

    let mut stats = DiffStats::default();
    for caps in re.captures_iter(output) {
        let count: usize = caps[1].parse().unwrap_or(0);
        let label = &caps[2];
        if label.starts_with("file") {
            stats.files_changed = count;
        } else if label.starts_with("insertion") {
            stats.additions = count;
        } else {
            stats.deletions = count;
        }
    }
    stats
}

/// Changed files between base and HEAD.
pub fn changed_files(git: &dyn GitRunner, base: &BaseBranch) -> Vec<FileChange> {
    let range = base.diff_range();
    parse_name_status(&query(git, &["diff", "--name-status", "-M", "--no-color", &range]))
}

/// Aggregate stats between base and HEAD.
pub fn diff_stats(git: &dyn GitRunner, base: &BaseBranch) -> DiffStats {
    let range = base.diff_range();
    parse_shortstat(&query(git, &["diff", "--shortstat", "-M", "--no-color", &range]))
}

/// Full unified diff between base and HEAD.
pub fn full_diff(git: &dyn GitRunner, base: &BaseBranch) -> String {
    let range = base.diff_range();
    query(git, &["diff", "-M", "--no-color", &range])
}
