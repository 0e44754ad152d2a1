//! Core domain logic (independent of the CLI)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **indexer**: Scanning, planning, splitting and the pipeline
//! - **storage**: Vector index backends

pub mod config;
pub mod error;
pub mod indexer;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{IngestError, Result};
