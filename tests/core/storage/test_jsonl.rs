// JSONL backend fed by a full pipeline run

use crate::common::{offline_config, words, TestRepo};
use corpus_ingest::core::config::BackendKind;
use corpus_ingest::core::indexer::{IngestionPipeline, WordCounter};
use corpus_ingest::core::storage;
use corpus_ingest::core::types::Document;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_pipeline_writes_jsonl_documents() {
    let repo = TestRepo::with_files(&[("a.md", &words(100)), ("b.md", &words(1200))]);
    let out = TempDir::new().unwrap();
    let path = out.path().join("store").join("documents.jsonl");

    let mut config = offline_config();
    config.backend.kind = BackendKind::Jsonl;
    config.backend.jsonl_path = Some(path.clone());

    let index = storage::connect(&config).await.unwrap();
    assert_eq!(index.name(), "jsonl");
    let pipeline = IngestionPipeline::new(config, Arc::new(WordCounter), index).unwrap();
    let summary = pipeline.run(repo.path()).await.unwrap();

    let docs: Vec<Document> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(summary.chunks_indexed, 3);
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[0].metadata.source, "a.md");
    assert_eq!(docs[1].metadata.source, "b.md");
    assert_eq!(docs[2].metadata.source, "b.md");
}
