// Test fixtures for integration testing

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test repository fixture for creating synthetic document trees
#[allow(dead_code)] // Used in integration tests
pub struct TestRepo {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl TestRepo {
    /// A small documentation tree with a dependency folder and noise
    #[allow(dead_code)] // Used in integration tests
    pub fn docs() -> Self {
        Self::with_files(&[
            ("README.md", "# Project\n\nShort introduction."),
            ("docs/getting-started.md", "## Install\n\nRun the installer."),
            ("docs/api/reference.mdx", "## API\n\n`connect()` opens a session."),
            ("docs/notes.txt", "not a markdown file"),
            ("node_modules/pkg/README.md", "# Dependency readme"),
            (".git/HEAD.md", "ref: refs/heads/main"),
            ("build/output.md", "generated output"),
        ])
    }

    /// Create with custom files
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();

        for (path, content) in files {
            let full_path = dir.path().join(path);
            std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
            std::fs::write(&full_path, content).unwrap();
            paths.push(full_path);
        }

        Self { dir, files: paths }
    }

    /// Get path to the repository
    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// `n` distinct whitespace-separated words
#[allow(dead_code)] // Used in integration tests
pub fn words(n: usize) -> String {
    (0..n)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}
