//! Core data types for the ingestion pipeline.
//!
//! This module defines the records that flow through a run: scanned
//! files, chunk plans, chunks, index documents and the run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A file discovered by the scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root (unique within one scan)
    pub path: PathBuf,

    /// Tokens in the full file content
    pub token_count: usize,

    /// File length in bytes
    pub byte_len: u64,

    /// File length in characters
    pub char_len: usize,
}

impl FileRecord {
    /// Source path as stored in document metadata (always `/`-separated)
    pub fn source(&self) -> String {
        self.path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Sizing tier selected by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    /// Stored whole (up to 650 tokens)
    Single,
    /// Two chunks (651-1500 tokens)
    Halves,
    /// Three chunks (1501-2500 tokens)
    Thirds,
    /// Four chunks (2501-4000 tokens)
    Quarters,
    /// Fixed 700-token windows (over 4000 tokens)
    FixedWindow,
}

/// How a file is divided before indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPlan {
    /// Desired tokens per chunk (> 0)
    pub target_token_size: usize,

    /// Number of chunks to produce (>= 1)
    pub chunk_count: usize,

    pub tier: PlanTier,
}

impl ChunkPlan {
    /// Whether the file is large enough to risk semantic fragmentation
    pub fn is_large_file(&self) -> bool {
        self.tier == PlanTier::FixedWindow
    }

    /// Whether the file is stored as one document without splitting
    pub fn is_single(&self) -> bool {
        self.chunk_count == 1
    }
}

/// A single text chunk from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content
    pub text: String,

    /// Tokens in `text`
    pub token_count: usize,

    /// Source file path (relative to the scan root)
    pub source_path: String,

    /// Sequential chunk number within the file
    pub chunk_index: usize,

    /// Byte offset where chunk starts in original file
    pub start_offset: usize,

    /// Byte offset where chunk ends in original file
    pub end_offset: usize,
}

/// Metadata attached to every indexed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Source file path relative to the scan root
    pub source: String,
}

/// A document handed to the vector index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl From<Chunk> for Document {
    fn from(chunk: Chunk) -> Self {
        Self {
            text: chunk.text,
            metadata: DocumentMetadata {
                source: chunk.source_path,
            },
        }
    }
}

/// Pipeline stage at which a file failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStage {
    Read,
    Plan,
    Split,
    Index,
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileStage::Read => "read",
            FileStage::Plan => "plan",
            FileStage::Split => "split",
            FileStage::Index => "index",
        };
        f.write_str(name)
    }
}

/// A file that could not be ingested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: String,
    pub stage: FileStage,
    pub message: String,
}

/// Result of successfully ingesting one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub plan: ChunkPlan,

    /// Token count of each indexed chunk, in document order
    pub chunk_tokens: Vec<usize>,

    /// Warnings raised while processing this file
    pub warnings: Vec<String>,
}

impl FileReport {
    pub fn chunks_indexed(&self) -> usize {
        self.chunk_tokens.len()
    }
}

/// Outcome of a whole ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_seen: usize,
    pub files_succeeded: usize,
    pub files_failed: usize,
    pub chunks_indexed: usize,
    pub warnings: Vec<String>,
    pub failures: Vec<FileFailure>,

    /// Successful files in scan order
    pub files: Vec<FileReport>,

    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl RunSummary {
    /// Start an empty summary
    pub fn new() -> Self {
        Self {
            files_seen: 0,
            files_succeeded: 0,
            files_failed: 0,
            chunks_indexed: 0,
            warnings: Vec::new(),
            failures: Vec::new(),
            files: Vec::new(),
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }

    /// Fold one file outcome into the summary
    pub fn record(mut self, outcome: std::result::Result<FileReport, FileFailure>) -> Self {
        self.files_seen += 1;
        match outcome {
            Ok(report) => {
                self.files_succeeded += 1;
                self.chunks_indexed += report.chunks_indexed();
                self.warnings.extend(report.warnings.iter().cloned());
                self.files.push(report);
            }
            Err(failure) => {
                self.files_failed += 1;
                self.failures.push(failure);
            }
        }
        self
    }

    /// Add a run-level warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Look up the report of a successfully ingested file
    pub fn file(&self, path: &str) -> Option<&FileReport> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Paths of failed files, for a caller-side retry
    pub fn failed_paths(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.path.as_str()).collect()
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
