//! Error types and error handling for the ingestion pipeline.
//!
//! Only [`IngestError::Setup`] aborts a run. Every other kind is
//! caught at the per-file boundary by the pipeline and folded into
//! the run summary.

use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Main error type for the ingestion pipeline
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Setup failed: {0}")]
    Setup(String),

    #[error("Scan failed: {0}")]
    Scan(String),

    #[error("Invalid chunk plan: {0}")]
    Planning(String),

    #[error("Split failed: {0}")]
    Split(String),

    #[error("Index write failed: {0}")]
    IndexWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl IngestError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether this error aborts the whole run rather than a single file
    pub fn is_fatal(&self) -> bool {
        matches!(self, IngestError::Setup(_) | IngestError::Toml(_))
    }
}
