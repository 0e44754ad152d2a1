//! In-memory vector index.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::error::{IngestError, Result};
use crate::core::storage::VectorIndex;
use crate::core::types::Document;

/// Keeps every written batch in memory
#[derive(Debug, Default)]
pub struct MemoryIndex {
    batches: Mutex<Vec<Vec<Document>>>,

    /// Sources whose batches are rejected, to exercise write failures
    rejected_sources: HashSet<String>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any batch containing a document from `source`
    pub fn rejecting(mut self, source: impl Into<String>) -> Self {
        self.rejected_sources.insert(source.into());
        self
    }

    /// Every stored batch, in write order
    pub fn batches(&self) -> Vec<Vec<Document>> {
        self.batches.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Every stored document, in write order
    pub fn documents(&self) -> Vec<Document> {
        self.batches().into_iter().flatten().collect()
    }

    /// Documents stored for one source path
    pub fn documents_for(&self, source: &str) -> Vec<Document> {
        self.documents()
            .into_iter()
            .filter(|d| d.metadata.source == source)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.documents().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    fn name(&self) -> &str {
        "memory"
    }

    async fn add_documents(&self, documents: Vec<Document>) -> Result<()> {
        if let Some(doc) = documents
            .iter()
            .find(|d| self.rejected_sources.contains(&d.metadata.source))
        {
            return Err(IngestError::IndexWrite(format!(
                "batch for {} rejected",
                doc.metadata.source
            )));
        }

        let mut batches = self
            .batches
            .lock()
            .map_err(|_| IngestError::IndexWrite("memory index lock poisoned".to_string()))?;
        batches.push(documents);
        Ok(())
    }
}
