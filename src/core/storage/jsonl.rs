//! Local JSONL document store.
//!
//! Appends one serialized [`Document`] per line. Embedding is left to
//! whatever later loads the file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::core::error::{IngestError, Result};
use crate::core::storage::VectorIndex;
use crate::core::types::Document;

/// Append-only JSONL sink
pub struct JsonlIndex {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlIndex {
    /// Open (or create) the output file, creating parent directories
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                IngestError::Setup(format!("Cannot create directory {parent:?}: {e}"))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| IngestError::Setup(format!("Cannot open {path:?}: {e}")))?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl VectorIndex for JsonlIndex {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn add_documents(&self, documents: Vec<Document>) -> Result<()> {
        // Serialize the whole batch first so a failure writes nothing
        let mut buf = Vec::new();
        for doc in &documents {
            serde_json::to_writer(&mut buf, doc)?;
            buf.push(b'\n');
        }

        let mut file = self.file.lock().await;
        file.write_all(&buf)
            .await
            .map_err(|e| IngestError::IndexWrite(format!("{:?}: {e}", self.path)))?;
        file.flush()
            .await
            .map_err(|e| IngestError::IndexWrite(format!("{:?}: {e}", self.path)))?;
        Ok(())
    }
}
