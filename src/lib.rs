//! corpus-ingest - document ingestion for retrieval-augmented generation
//!
//! Walks a documentation tree, sizes each file by token count, splits
//! large files into overlapping chunks and writes them to a vector
//! index.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - indexer (ignore rules, scanning, planning, splitting, pipeline)
//!   - storage (Pinecone, JSONL and in-memory backends)
//!
//! - **cli**: Command-line adapter (depends on core)
//!   - ingest, scan, plan, show-config, completions
//!
//! # Chunk sizing
//!
//! | tokens      | chunks                |
//! |-------------|-----------------------|
//! | up to 650   | 1 (stored whole)      |
//! | 651-1500    | 2                     |
//! | 1501-2500   | 3                     |
//! | 2501-4000   | 4                     |
//! | over 4000   | 700-token windows     |

// Core domain logic
pub mod core;

// Command-line interface
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{IngestError, Result};
pub use core::indexer::{IngestionPipeline, TokenCounter};
pub use core::storage::VectorIndex;
pub use core::types::*;
