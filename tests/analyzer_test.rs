//! Integration tests running the analyzer against real git repositories.

mod common;

use prdigest::analysis::{AnalyzerOptions, ChangeAnalyzer};
use prdigest::git::resolve_base;
use prdigest::{FileCategory, FileStatus};

use common::{TEST_USER, TestRepo, repo_with_feature_branch};

fn all_options() -> AnalyzerOptions {
    AnalyzerOptions {
        detect_breaking: true,
        suggest_reviewers: true,
    }
}

#[test]
fn test_feature_branch_summary() {
    let repo = repo_with_feature_branch("feature/add-login");
    repo.write("src/login.ts", "export function login() {}\n");
    repo.write("src/login.test.ts", "test('login', () => {});\n");
    repo.commit("feat: add login");
    repo.write("README.md", "# Widget\n\nNow with login.\n");
    repo.commit("docs: mention login");

    let git = repo.runner();
    let base = resolve_base(&git, "main");
    let summary = ChangeAnalyzer::new(&git, all_options()).analyze(&base);

    assert_eq!(summary.title, "Add login");
    assert_eq!(summary.current_branch, "feature/add-login");
    assert_eq!(summary.base_branch, "main");
    assert_eq!(summary.files.len(), 3);
    assert_eq!(summary.stats.files_changed, summary.files.len());
    assert!(summary.stats.additions >= 4);
    assert!(
        summary
            .summary
            .starts_with("This PR updates 1 source file, 1 test file, 1 documentation file."),
        "unexpected prose: {}",
        summary.summary
    );
    assert!(summary.breaking_changes.is_empty());
}

#[test]
fn test_single_commit_lends_title() {
    let repo = repo_with_feature_branch("topic");
    repo.write("src/app.ts", "export const app = 2;\n");
    repo.commit("fix(app): correct the app constant");

    let git = repo.runner();
    let base = resolve_base(&git, "main");
    let summary = ChangeAnalyzer::new(&git, AnalyzerOptions::default()).analyze(&base);

    assert_eq!(summary.title, "Correct the app constant");
}

#[test]
fn test_reviewers_exclude_current_user() {
    let repo = TestRepo::new();
    repo.write("src/a.ts", "1\n");
    repo.write("src/b.ts", "1\n");
    repo.commit_as("Ana", "chore: init");
    repo.write("src/a.ts", "2\n");
    repo.commit_as("Bo", "fix: a");
    repo.write("src/b.ts", "2\n");
    repo.commit_as("Bo", "fix: b");
    repo.write("src/a.ts", "3\n");
    repo.commit("fix: a again");

    repo.checkout_new("feature/touch-both");
    repo.write("src/a.ts", "4\n");
    repo.write("src/b.ts", "4\n");
    repo.commit("feat: touch both");

    let git = repo.runner();
    let base = resolve_base(&git, "main");
    let summary = ChangeAnalyzer::new(&git, all_options()).analyze(&base);

    assert_eq!(summary.suggested_reviewers, vec!["Bo", "Ana"]);
    assert!(!summary.suggested_reviewers.iter().any(|r| r == TEST_USER));
}

#[test]
fn test_breaking_change_detection() {
    let repo = TestRepo::new();
    repo.write("package.json", "{\n  \"name\": \"widget\",\n  \"version\": \"1.0.0\"\n}\n");
    repo.write("src/index.ts", "export { app } from './app';\n");
    repo.write("src/app.ts", "export const app = 1;\n");
    repo.commit("chore: init");

    repo.checkout_new("refactor/drop-barrel");
    repo.write("package.json", "{\n  \"name\": \"widget\",\n  \"version\": \"2.0.0\"\n}\n");
    repo.remove("src/index.ts");
    repo.write("src/app.ts", "const app = 1;\n");
    repo.commit("refactor!: drop barrel file");

    let git = repo.runner();
    let base = resolve_base(&git, "main");
    let summary = ChangeAnalyzer::new(&git, all_options()).analyze(&base);
    let breaking = &summary.breaking_changes;

    assert!(breaking.iter().any(|b| b.starts_with("Commit ") && b.ends_with("refactor!: drop barrel file")));
    assert!(breaking.contains(&"Removed export: export const app = 1;".to_string()));
    assert!(breaking.contains(&"Deleted public entry point: src/index.ts".to_string()));
    assert!(breaking.contains(&"Version changed in package.json: 1.0.0 -> 2.0.0 (major bump)".to_string()));

    let deleted = summary.files.iter().find(|f| f.path == "src/index.ts").unwrap();
    assert_eq!(deleted.status, FileStatus::Deleted);
    let manifest = summary.files.iter().find(|f| f.path == "package.json").unwrap();
    assert_eq!(manifest.category, FileCategory::Configuration);
}

#[test]
fn test_rename_is_reported_with_old_path() {
    let repo = repo_with_feature_branch("chore/rename");
    repo.git(&["mv", "src/app.ts", "src/application.ts"]);
    repo.commit("chore: rename app module");

    let git = repo.runner();
    let base = resolve_base(&git, "main");
    let summary = ChangeAnalyzer::new(&git, AnalyzerOptions::default()).analyze(&base);

    assert_eq!(summary.files.len(), 1);
    let file = &summary.files[0];
    assert_eq!(file.status, FileStatus::Renamed);
    assert_eq!(file.path, "src/application.ts");
    assert_eq!(file.old_path.as_deref(), Some("src/app.ts"));
}

#[test]
fn test_missing_base_falls_back_to_main() {
    let repo = repo_with_feature_branch("feature/x");
    repo.write("src/x.ts", "export const x = 1;\n");
    repo.commit("feat: x");

    let git = repo.runner();
    let base = resolve_base(&git, "develop");
    assert_eq!(base.requested, "develop");
    assert_eq!(base.resolved, "main");

    let summary = ChangeAnalyzer::new(&git, AnalyzerOptions::default()).analyze(&base);
    assert_eq!(summary.files.len(), 1);
}

#[test]
fn test_no_changes_against_base() {
    let repo = repo_with_feature_branch("feature/empty");

    let git = repo.runner();
    let base = resolve_base(&git, "main");
    let summary = ChangeAnalyzer::new(&git, all_options()).analyze(&base);

    assert!(!summary.has_changes());
    assert_eq!(summary.stats.files_changed, 0);
    assert!(summary.suggested_reviewers.is_empty());
}

#[test]
fn test_reviewers_found_from_subdirectory() {
    let repo = TestRepo::new();
    repo.write("lib/a.ts", "export const a = 1;\n");
    repo.write("docs/guide.md", "# Guide\n");
    repo.commit_as("Ana", "chore: init");

    repo.checkout_new("feature/lib-a");
    repo.write("lib/a.ts", "export const a = 2;\n");
    repo.commit("fix: bump a");

    let git = repo.runner_in("lib");
    let base = resolve_base(&git, "main");
    let summary = ChangeAnalyzer::new(&git, all_options()).analyze(&base);

    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.files[0].path, "lib/a.ts");
    assert_eq!(summary.suggested_reviewers, vec!["Ana"]);

    let from_root = ChangeAnalyzer::new(&repo.runner(), all_options()).analyze(&base);
    assert_eq!(from_root.suggested_reviewers, summary.suggested_reviewers);
}

#[test]
fn test_non_ascii_path_is_decoded() {
    let repo = repo_with_feature_branch("feature/cafe");
    repo.git(&["config", "core.quotePath", "true"]);
    repo.write("src/café.ts", "export const cafe = true;\n");
    repo.commit("feat: cafe");

    let git = repo.runner();
    let base = resolve_base(&git, "main");
    let summary = ChangeAnalyzer::new(&git, all_options()).analyze(&base);

    assert_eq!(summary.files.len(), 1);
    let file = &summary.files[0];
    assert_eq!(file.path, "src/café.ts");
    assert_eq!(file.category, FileCategory::Source);
    assert_eq!(file.status, FileStatus::Added);
}
