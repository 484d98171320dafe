//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use prdigest::SystemGit;

/// Name configured as the repository's own user.
pub const TEST_USER: &str = "Test User";

/// A test git repository builder driven through the git CLI.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
}

impl TestRepo {
    /// Create a new empty repository on branch `main` in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Self { dir };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.git(&["config", "user.name", TEST_USER]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the repository and return stdout. Panics on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    pub fn remove(&self, rel: &str) {
        std::fs::remove_file(self.dir.path().join(rel)).expect("Failed to remove file");
    }

    /// Stage everything and commit as the repository user.
    pub fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    /// Stage everything and commit with a different author name.
    pub fn commit_as(&self, author: &str, message: &str) {
        let author = format!("{} <{}@example.com>", author, author.to_lowercase());
        self.git(&["add", "-A"]);
        self.git(&["commit", "--quiet", "--author", &author, "-m", message]);
    }

    /// Create and switch to a new branch.
    pub fn checkout_new(&self, branch: &str) {
        self.git(&["checkout", "--quiet", "-b", branch]);
    }

    /// A runner bound to this repository.
    pub fn runner(&self) -> SystemGit {
        SystemGit::locate(None)
            .expect("git should be installed for tests")
            .in_dir(self.dir.path())
    }

    /// A runner whose working directory is a subdirectory of the repository.
    pub fn runner_in(&self, rel: &str) -> SystemGit {
        SystemGit::locate(None)
            .expect("git should be installed for tests")
            .in_dir(self.dir.path().join(rel))
    }
}

/// A repository with one commit on `main` and a feature branch checked out.
pub fn repo_with_feature_branch(branch: &str) -> TestRepo {
    let repo = TestRepo::new();
    repo.write("README.md", "# Widget\n");
    repo.write("src/index.ts", "export { app } from './app';\n");
    repo.write("src/app.ts", "export const app = 1;\n");
    repo.commit_as("Ana", "chore: initial import");
    repo.checkout_new(branch);
    repo
}
