//! Path-based file categorization.

use serde::{Deserialize, Serialize};

/// Category of a changed file, derived from its path alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileCategory {
    Source,
    Tests,
    Configuration,
    #[serde(rename = "CI/CD")]
    CiCd,
    Documentation,
    Styles,
    Other,
}

impl FileCategory {
    /// Categories that get a clause in the prose summary, in clause order.
    pub const SUMMARIZED: [FileCategory; 6] = [
        Self::Source,
        Self::Tests,
        Self::Configuration,
        Self::Documentation,
        Self::CiCd,
        Self::Styles,
    ];

    /// Get the display name for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Tests => "Tests",
            Self::Configuration => "Configuration",
            Self::CiCd => "CI/CD",
            Self::Documentation => "Documentation",
            Self::Styles => "Styles",
            Self::Other => "Other",
        }
    }

    /// Noun used in prose clauses ("2 test files").
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Tests => "test",
            Self::Configuration => "configuration",
            Self::CiCd => "CI/CD",
            Self::Documentation => "documentation",
            Self::Styles => "style",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "vue", "svelte", "rs", "py", "go", "java", "kt",
    "rb", "c", "h", "cpp", "swift",
];
const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl"];
const DOC_EXTENSIONS: &[&str] = &["md", "mdx", "rst", "adoc"];
const CI_MARKERS: &[&str] = &[".github/", ".circleci/", ".gitlab"];

/// Categorize a path. First matching rule wins:
/// Tests, Documentation, Configuration, CI/CD, Styles, Source, Other.
pub fn categorize(path: &str) -> FileCategory {
    let path = path.replace('\\', "/").to_lowercase();
    let (dirs, name) = match path.rsplit_once('/') {
        Some((dirs, name)) => (dirs, name),
        None => ("", path.as_str()),
    };
    let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    let in_dir = |dir: &str| dirs.split('/').any(|segment| segment == dir);

    if is_test_name(name) || in_dir("__tests__") || in_dir("tests") || in_dir("test") {
        FileCategory::Tests
    } else if name.starts_with("readme")
        || name.starts_with("changelog")
        || DOC_EXTENSIONS.contains(&ext)
        || in_dir("docs")
    {
        FileCategory::Documentation
    } else if name.starts_with("package") || name.starts_with("tsconfig") || name.contains("config") {
        FileCategory::Configuration
    } else if ext == "yml"
        || ext == "yaml"
        || CI_MARKERS.iter().any(|m| path.contains(m))
        || in_dir("ci")
    {
        FileCategory::CiCd
    } else if STYLE_EXTENSIONS.contains(&ext) {
        FileCategory::Styles
    } else if SOURCE_EXTENSIONS.contains(&ext) {
        FileCategory::Source
    } else {
        FileCategory::Other
    }
}

fn is_test_name(name: &str) -> bool {
    name.contains(".test.")
        || name.contains(".spec.")
        || name.contains("_test.")
        || name.contains("_spec.")
        || name.starts_with("test_")
}
