// Test helper functions

use corpus_ingest::core::config::{BackendKind, Config};
use corpus_ingest::core::indexer::{IngestionPipeline, WordCounter};
use corpus_ingest::core::storage::MemoryIndex;
use corpus_ingest::core::types::RunSummary;
use std::path::Path;
use std::sync::Arc;

/// Default configuration with the in-memory backend
#[allow(dead_code)] // Used in integration tests
pub fn offline_config() -> Config {
    let mut config = Config::default();
    config.backend.kind = BackendKind::Memory;
    config
}

/// Pipeline counting whitespace words and writing to memory
#[allow(dead_code)] // Used in integration tests
pub fn memory_pipeline(config: Config) -> (IngestionPipeline, Arc<MemoryIndex>) {
    let index = Arc::new(MemoryIndex::new());
    let pipeline = IngestionPipeline::new(config, Arc::new(WordCounter), index.clone())
        .expect("offline config should be valid");
    (pipeline, index)
}

/// Ingest `root` with the offline configuration
#[allow(dead_code)] // Used in integration tests
pub async fn run_memory(root: &Path) -> (RunSummary, Arc<MemoryIndex>) {
    let (pipeline, index) = memory_pipeline(offline_config());
    let summary = pipeline.run(root).await.expect("run should succeed");
    (summary, index)
}
