//! Tests for the scan CLI command

use crate::common::{offline_config, words, TestRepo};
use corpus_ingest::cli::commands::scan::{execute, scan_with, ScanArgs};
use corpus_ingest::cli::OutputFormat;
use corpus_ingest::core::indexer::WordCounter;
use corpus_ingest::core::types::PlanTier;
use std::path::PathBuf;
use std::sync::Arc;

#[test]
fn test_scan_lists_files_with_plans() {
    let repo = TestRepo::with_files(&[
        ("intro.md", &words(200)),
        ("reference.md", &words(4500)),
        ("node_modules/dep/README.md", &words(10)),
    ]);
    let args = ScanArgs {
        root: repo.path().to_path_buf(),
        extensions: vec![],
    };

    let response = scan_with(&args, offline_config(), Arc::new(WordCounter)).unwrap();

    let paths: Vec<&str> = response.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["intro.md", "reference.md"]);
    assert_eq!(response.files[0].plan.tier, PlanTier::Single);
    assert_eq!(response.files[1].plan.chunk_count, 7);
    assert_eq!(response.total_tokens, 4700);
    assert_eq!(response.total_chunks, 8);
}

#[test]
fn test_scan_extension_override() {
    let repo = TestRepo::with_files(&[("a.md", "a"), ("b.rst", "b")]);
    let args = ScanArgs {
        root: repo.path().to_path_buf(),
        extensions: vec!["rst".to_string()],
    };

    let response = scan_with(&args, offline_config(), Arc::new(WordCounter)).unwrap();
    assert_eq!(response.files.len(), 1);
    assert_eq!(response.files[0].path, "b.rst");
}

#[test]
fn test_scan_execute_formats() {
    let repo = TestRepo::docs();
    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = ScanArgs {
            root: repo.path().to_path_buf(),
            extensions: vec![],
        };
        assert!(execute(args, offline_config(), format).is_ok());
    }
}

#[test]
fn test_scan_missing_root() {
    let args = ScanArgs {
        root: PathBuf::from("/nonexistent/scan/root"),
        extensions: vec![],
    };
    assert!(scan_with(&args, offline_config(), Arc::new(WordCounter)).is_err());
}

#[cfg(unix)]
#[test]
fn test_scan_reports_unreadable_files() {
    let repo = TestRepo::with_files(&[("a.md", "alpha")]);
    std::os::unix::fs::symlink(repo.path().join("nowhere.md"), repo.path().join("b.md")).unwrap();
    let args = ScanArgs {
        root: repo.path().to_path_buf(),
        extensions: vec![],
    };

    let response = scan_with(&args, offline_config(), Arc::new(WordCounter)).unwrap();
    assert_eq!(response.files.len(), 1);
    assert_eq!(response.unreadable.len(), 1);
    assert_eq!(response.unreadable[0].path, "b.md");
}
