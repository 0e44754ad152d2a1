//! Vector index backends.
//!
//! The pipeline only ever talks to a [`VectorIndex`] through
//! `add_documents`, one batch per source file. Embedding, storage and
//! similarity ranking are the backend's business.
//!
//! # Backends
//!
//! - **PineconeIndex**: OpenAI embeddings upserted into Pinecone
//! - **JsonlIndex**: one JSON document per line in a local file
//! - **MemoryIndex**: in-process, for dry runs and tests

mod jsonl;
mod memory;
mod pinecone;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::config::{BackendKind, Config};
use crate::core::error::{IngestError, Result};
use crate::core::types::Document;

pub use jsonl::JsonlIndex;
pub use memory::MemoryIndex;
pub use pinecone::PineconeIndex;

/// Destination for ingested documents
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Embed and store a batch of documents.
    ///
    /// A batch holds every chunk of one source file, in document
    /// order. The whole batch fails or succeeds as one write.
    async fn add_documents(&self, documents: Vec<Document>) -> Result<()>;
}

/// Build the backend selected by `config`, checking it is reachable.
///
/// Every failure here is a setup error: nothing has been ingested yet.
pub async fn connect(config: &Config) -> Result<Arc<dyn VectorIndex>> {
    let backend = &config.backend;
    let index: Arc<dyn VectorIndex> = match backend.kind {
        BackendKind::Pinecone => {
            let timeout = Duration::from_secs(config.limits.request_timeout_sec);
            Arc::new(PineconeIndex::connect(backend, timeout).await?)
        }
        BackendKind::Jsonl => {
            let path = backend.jsonl_path.as_ref().ok_or_else(|| {
                IngestError::Setup("jsonl backend requires backend.jsonl_path".to_string())
            })?;
            Arc::new(JsonlIndex::open(path).await?)
        }
        BackendKind::Memory => Arc::new(MemoryIndex::new()),
    };

    tracing::info!("Connected to {} index", index.name());
    Ok(index)
}
