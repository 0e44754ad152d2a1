//! Ingestion pipeline orchestration.
//!
//! Coordinates the end-to-end workflow for one scan root:
//! 1. Scan the tree for matching files (with token counts)
//! 2. Plan each file's chunking from its token count
//! 3. Split files that need more than one chunk
//! 4. Hand each file's documents to the vector index as one batch
//!
//! Per-file errors are caught at the file boundary and recorded in the
//! [`RunSummary`]; only setup errors abort a run.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::core::config::Config;
use crate::core::error::{IngestError, Result};
use crate::core::indexer::planner;
use crate::core::indexer::splitter::TextSplitter;
use crate::core::indexer::tokens::TokenCounter;
use crate::core::indexer::walker::{decode_lossy, FileScanner};
use crate::core::storage::VectorIndex;
use crate::core::types::{
    Chunk, Document, FileFailure, FileRecord, FileReport, FileStage, RunSummary,
};

/// Orchestrates scanning, planning, splitting and index writes
pub struct IngestionPipeline {
    config: Config,
    counter: Arc<dyn TokenCounter>,
    splitter: TextSplitter,
    index: Arc<dyn VectorIndex>,
}

impl IngestionPipeline {
    /// Create a new pipeline
    ///
    /// The configuration is validated once here; an invalid
    /// configuration is a setup error.
    pub fn new(
        config: Config,
        counter: Arc<dyn TokenCounter>,
        index: Arc<dyn VectorIndex>,
    ) -> Result<Self> {
        config.validate()?;
        let splitter = TextSplitter::new(counter.clone(), config.indexing.overlap_ratio);

        Ok(Self {
            config,
            counter,
            splitter,
            index,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan `root` and ingest every matching file
    ///
    /// Returns `Err` only for setup failures (unreadable root or ignore
    /// file). Everything else ends up in the summary; files the scanner
    /// could not read count as failed at the read stage.
    pub async fn run(&self, root: &Path) -> Result<RunSummary> {
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!("Starting ingestion of {:?}", root);
        let scanner = FileScanner::for_root(&self.config.indexing, root, self.counter.clone())?;
        let scanned = scanner.scan(root)?;

        let mut summary = self.ingest_records(root, &scanned.records).await;
        summary = scanned
            .failures
            .into_iter()
            .fold(summary, |summary, failure| summary.record(Err(failure)));
        summary.warnings.extend(scanned.skipped);
        if summary.files_seen == 0 {
            let message = format!(
                "No files with extensions {:?} found under {}",
                self.config.indexing.normalized_extensions(),
                root.display()
            );
            tracing::warn!("{}", message);
            summary.warn(message);
        }

        summary.started_at = started_at;
        summary.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Ingestion complete: {} files succeeded, {} failed, {} chunks indexed in {}ms",
            summary.files_succeeded,
            summary.files_failed,
            summary.chunks_indexed,
            summary.duration_ms
        );

        Ok(summary)
    }

    /// Ingest already-scanned records, folding each outcome into a summary
    ///
    /// Up to `limits.max_concurrent_files` files are in flight at once;
    /// outcomes are recorded in `records` order regardless.
    pub async fn ingest_records(&self, root: &Path, records: &[FileRecord]) -> RunSummary {
        let start = Instant::now();
        let jobs = self.config.limits.max_concurrent_files.max(1);
        let total = records.len();

        let mut summary = stream::iter(records.iter().enumerate())
            .map(|(idx, record)| {
                tracing::debug!("[{}/{}] {}", idx + 1, total, record.source());
                self.process_file(root, record)
            })
            .buffered(jobs)
            .fold(RunSummary::new(), |summary, outcome| async move {
                summary.record(outcome)
            })
            .await;

        summary.duration_ms = start.elapsed().as_millis() as u64;
        summary
    }

    /// Read, plan, split and index a single file
    pub async fn process_file(
        &self,
        root: &Path,
        record: &FileRecord,
    ) -> std::result::Result<FileReport, FileFailure> {
        let source = record.source();
        let fail = |stage: FileStage, err: IngestError| {
            tracing::warn!("Failed {} at {} stage: {}", source, stage, err);
            FileFailure {
                path: source.clone(),
                stage,
                message: err.to_string(),
            }
        };

        let bytes = tokio::fs::read(root.join(&record.path))
            .await
            .map_err(|e| fail(FileStage::Read, IngestError::Io(e)))?;
        let (content, lossy) = decode_lossy(bytes);

        let plan = planner::plan(record.token_count);
        tracing::info!(
            "{}: {} tokens, {} chunk(s) of ~{} tokens",
            source,
            record.token_count,
            plan.chunk_count,
            plan.target_token_size
        );

        let mut warnings = Vec::new();

        if lossy {
            let message = format!("{source}: not valid UTF-8, invalid bytes replaced");
            tracing::warn!("{}", message);
            warnings.push(message);
        }

        if content.trim().is_empty() {
            let message = format!("{source}: empty file, nothing indexed");
            tracing::warn!("{}", message);
            warnings.push(message);
            return Ok(FileReport {
                path: source,
                plan,
                chunk_tokens: Vec::new(),
                warnings,
            });
        }

        if plan.is_large_file() {
            let message = format!(
                "{source}: large file ({} tokens) split into {} fixed windows; \
                 semantic fragmentation possible",
                record.token_count, plan.chunk_count
            );
            tracing::warn!("{}", message);
            warnings.push(message);
        }

        let chunks = if plan.is_single() {
            vec![Chunk {
                token_count: self.counter.count(&content),
                source_path: source.clone(),
                chunk_index: 0,
                start_offset: 0,
                end_offset: content.len(),
                text: content,
            }]
        } else {
            self.splitter
                .split(&content, &plan, &source)
                .map_err(|e| fail(stage_of(&e), e))?
        };

        let threshold = self.config.indexing.warn_chunk_tokens;
        for chunk in &chunks {
            tracing::debug!(
                "{}: chunk {}/{} has {} tokens",
                source,
                chunk.chunk_index + 1,
                chunks.len(),
                chunk.token_count
            );
            if chunk.token_count > threshold {
                let message = format!(
                    "{source}: chunk {} has {} tokens (over {threshold})",
                    chunk.chunk_index, chunk.token_count
                );
                tracing::warn!("{}", message);
                warnings.push(message);
            }
        }

        let chunk_tokens: Vec<usize> = chunks.iter().map(|c| c.token_count).collect();
        let documents: Vec<Document> = chunks.into_iter().map(Document::from).collect();

        self.index
            .add_documents(documents)
            .await
            .map_err(|e| fail(FileStage::Index, e))?;

        tracing::info!(
            "{}: indexed {} chunk(s) {:?}",
            source,
            chunk_tokens.len(),
            chunk_tokens
        );

        Ok(FileReport {
            path: source,
            plan,
            chunk_tokens,
            warnings,
        })
    }
}

/// Stage a splitter error is attributed to
fn stage_of(err: &IngestError) -> FileStage {
    match err {
        IngestError::Planning(_) => FileStage::Plan,
        _ => FileStage::Split,
    }
}
