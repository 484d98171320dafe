//! Commit log fetching and conventional commit parsing.

use regex_lite::Regex;

use super::repo::BaseBranch;
use super::runner::{GitRunner, query};

/// How many non-merge commits are inspected.
pub const COMMIT_SCAN_LIMIT: usize = 20;

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';

/// Types recognised in a conventional commit header.
pub const CONVENTIONAL_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

/// What a commit message says about itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitMarkers {
    /// Subject starts with a known `type(scope)!:` header.
    pub conventional: bool,
    /// `type!:` header or a BREAKING CHANGE footer.
    pub breaking: bool,
}

/// A commit on the branch.
#[derive(Debug, Clone)]
pub struct ParsedCommit {
    pub hash: String,
    pub subject: String,
    pub body: String,
    pub conventional: bool,
    pub breaking: bool,
}

impl ParsedCommit {
    pub fn new(hash: &str, subject: &str, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            subject.to_string()
        } else {
            format!("{}\n\n{}", subject, body)
        };
        let markers = parse_commit_message(&message);

        Self {
            hash: hash.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            conventional: markers.conventional,
            breaking: markers.breaking,
        }
    }

    /// Subject with any conventional `type(scope)!:` header removed.
    pub fn description(&self) -> &str {
        if !self.conventional {
            return &self.subject;
        }
        match header_regex().find(&self.subject) {
            Some(m) => &self.subject[m.end()..],
            None => &self.subject,
        }
    }
}

fn header_regex() -> Regex {
    Regex::new(r"^(\w+)(?:\([^)]+\))?(!)?\s*:\s*").unwrap()
}

/// Parse a commit message for conventional and breaking markers.
///
/// The type is matched case-insensitively against [`CONVENTIONAL_TYPES`].
/// The BREAKING CHANGE marker is matched case-insensitively anywhere in the
/// message, and counts even on non-conventional commits.
pub fn parse_commit_message(message: &str) -> CommitMarkers {
    let first_line = message.lines().next().unwrap_or("");

    let lowered = message.to_lowercase();
    let breaking_footer = lowered.contains("breaking change") || lowered.contains("breaking-change");

    match header_regex().captures(first_line) {
        Some(caps) => {
            let ty = caps[1].to_lowercase();
            let conventional = CONVENTIONAL_TYPES.contains(&ty.as_str());
            CommitMarkers {
                conventional,
                breaking: breaking_footer || (conventional && caps.get(2).is_some()),
            }
        }
        None => CommitMarkers {
            conventional: false,
            breaking: breaking_footer,
        },
    }
}

/// Parse log output produced with the unit/record separator format used by
/// [`fetch_commits`].
pub fn parse_log(output: &str) -> Vec<ParsedCommit> {
    output
        .split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches(['\n', '\r']);
            if record.trim().is_empty() {
                return None;
            }
            let mut fields = record.splitn(3, FIELD_SEP);
            let hash = fields.next()?.trim();
            let subject = fields.next()?.trim();
            let body = fields.next().unwrap_or("").trim();
            if hash.is_empty() {
                return None;
            }
            Some(ParsedCommit::new(hash, subject, body))
        })
        .collect()
}

/// The most recent non-merge commits on HEAD that are not on base.
pub fn fetch_commits(git: &dyn GitRunner, base: &BaseBranch) -> Vec<ParsedCommit> {
    let range = base.log_range();
    let limit = format!("-n{}", COMMIT_SCAN_LIMIT);
    let format = "--format=%H%x1f%s%x1f%b%x1e";
    parse_log(&query(git, &["log", "--no-merges", "--no-color", &limit, format, &range]))
}
