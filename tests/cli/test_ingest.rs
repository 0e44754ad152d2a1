//! Tests for the ingest CLI command
//!
//! - Offline ingestion into the memory and JSONL backends
//! - Command-line overrides applied over configuration
//! - Setup failures (bad path, missing credentials, no files)

use crate::common::{offline_config, words, TestRepo};
use corpus_ingest::cli::commands::ingest::{execute, IngestArgs};
use corpus_ingest::cli::OutputFormat;
use corpus_ingest::core::config::{BackendKind, Config};
use corpus_ingest::core::types::Document;
use std::path::PathBuf;
use tempfile::TempDir;

fn args(root: PathBuf) -> IngestArgs {
    IngestArgs {
        root,
        extensions: vec![],
        ignore_file: None,
        backend: Some(BackendKind::Memory),
        jobs: None,
        require_files: false,
        quiet: true,
    }
}

#[tokio::test]
async fn test_ingest_memory_human() {
    let repo = TestRepo::docs();

    let result = execute(args(repo.path().to_path_buf()), offline_config(), OutputFormat::Human).await;
    assert!(result.is_ok(), "ingest should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_ingest_memory_json() {
    let repo = TestRepo::with_files(&[("a.md", &words(50)), ("b.md", &words(900))]);

    let result = execute(args(repo.path().to_path_buf()), offline_config(), OutputFormat::Json).await;
    assert!(result.is_ok(), "ingest should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_ingest_jsonl_writes_documents() {
    let repo = TestRepo::with_files(&[("guide.md", "# Guide\n\nA short page.")]);
    let out = TempDir::new().unwrap();
    let path = out.path().join("docs.jsonl");

    let mut config = offline_config();
    config.backend.jsonl_path = Some(path.clone());
    let mut args = args(repo.path().to_path_buf());
    args.backend = Some(BackendKind::Jsonl);

    execute(args, config, OutputFormat::Json).await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let docs: Vec<Document> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].metadata.source, "guide.md");
    assert_eq!(docs[0].text, "# Guide\n\nA short page.");
}

#[test]
fn test_overrides_apply_over_config() {
    let mut config = Config::default();
    let args = IngestArgs {
        root: PathBuf::from("."),
        extensions: vec!["txt".to_string()],
        ignore_file: Some(".ingestignore".to_string()),
        backend: Some(BackendKind::Jsonl),
        jobs: Some(4),
        require_files: false,
        quiet: false,
    };

    args.apply(&mut config);

    assert_eq!(config.indexing.extensions, vec!["txt"]);
    assert_eq!(config.indexing.ignore_file, ".ingestignore");
    assert_eq!(config.backend.kind, BackendKind::Jsonl);
    assert_eq!(config.limits.max_concurrent_files, 4);
}

#[tokio::test]
async fn test_ingest_invalid_path() {
    let result = execute(
        args(PathBuf::from("/nonexistent/docs/root")),
        offline_config(),
        OutputFormat::Human,
    )
    .await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid path"));
}

#[tokio::test]
async fn test_ingest_pinecone_without_credentials_fails() {
    let repo = TestRepo::docs();
    let mut args = args(repo.path().to_path_buf());
    args.backend = Some(BackendKind::Pinecone);

    let result = execute(args, Config::default(), OutputFormat::Human).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn test_ingest_zero_jobs_rejected() {
    let repo = TestRepo::docs();
    let mut args = args(repo.path().to_path_buf());
    args.jobs = Some(0);

    let result = execute(args, offline_config(), OutputFormat::Human).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_empty_tree_succeeds_without_require_files() {
    let repo = TestRepo::with_files(&[("notes.txt", "nothing to ingest")]);

    let result = execute(args(repo.path().to_path_buf()), offline_config(), OutputFormat::Json).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_empty_tree_fails_with_require_files() {
    let repo = TestRepo::with_files(&[("notes.txt", "nothing to ingest")]);
    let mut args = args(repo.path().to_path_buf());
    args.require_files = true;

    let result = execute(args, offline_config(), OutputFormat::Json).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No matching files"));
}
