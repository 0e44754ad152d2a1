//! Document ingestion module.
//!
//! Turns a directory of documents into index-ready chunks:
//!
//! - ignore-rule filtering and deterministic directory scanning
//! - token counting (cl100k or whitespace words)
//! - token-count based chunk planning
//! - boundary-aware, overlapping text splitting
//! - pipeline orchestration with per-file failure isolation
//!
//! # Safety
//!
//! The splitter works on `char_indices()` so every cut lands on a
//! UTF-8 character boundary, even for emoji and CJK text.

pub mod ignore;
pub mod pipeline;
pub mod planner;
pub mod splitter;
pub mod tokens;
pub mod walker;

pub use ignore::IgnoreFilter;
pub use pipeline::IngestionPipeline;
pub use splitter::TextSplitter;
pub use tokens::{Cl100kCounter, TokenCounter, WordCounter};
pub use walker::{FileScanner, ScanOutput};
