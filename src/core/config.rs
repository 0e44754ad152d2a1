//! Configuration management for the ingestion pipeline.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! Validation happens once, at startup, and maps every problem to
//! [`IngestError::Setup`].

use crate::core::error::{IngestError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Scanning and chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// File extensions to ingest ("md" or ".md")
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Ignore file looked up in the scan root
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Patterns added on top of the ignore file and built-in defaults
    #[serde(default)]
    pub extra_ignore_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,

    /// Overlap between consecutive chunks, as a fraction of the window
    #[serde(default = "default_overlap_ratio")]
    pub overlap_ratio: f64,

    /// Chunks above this many tokens are reported as warnings
    #[serde(default = "default_warn_chunk_tokens")]
    pub warn_chunk_tokens: usize,
}

/// Which vector index receives the documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// OpenAI embeddings stored in a Pinecone index
    Pinecone,
    /// Append documents to a local JSONL file
    Jsonl,
    /// Keep documents in memory (dry run)
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Pinecone => "pinecone",
            BackendKind::Jsonl => "jsonl",
            BackendKind::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Vector index backend configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_kind")]
    pub kind: BackendKind,

    /// Embedding model used by the OpenAI embeddings endpoint
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default)]
    pub pinecone_api_key: Option<String>,

    /// Pinecone index name
    #[serde(default)]
    pub pinecone_index: Option<String>,

    /// Pinecone control plane, used to resolve the index host
    #[serde(default = "default_pinecone_control_url")]
    pub pinecone_control_url: String,

    #[serde(default)]
    pub namespace: Option<String>,

    /// Output file for the jsonl backend (defaults to the XDG data dir)
    #[serde(default)]
    pub jsonl_path: Option<PathBuf>,

    /// Maximum vectors per upsert request
    #[serde(default = "default_upsert_batch_size")]
    pub upsert_batch_size: usize,
}

/// Concurrency and timeout limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Files processed concurrently (1 = sequential, scan order)
    #[serde(default = "default_max_concurrent_files")]
    pub max_concurrent_files: usize,

    /// Timeout applied to each backend request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,
}

// Default value functions
fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "mdx".to_string()]
}

fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

fn default_max_file_size() -> usize {
    10
}

fn default_overlap_ratio() -> f64 {
    0.1
}

fn default_warn_chunk_tokens() -> usize {
    800
}

fn default_backend_kind() -> BackendKind {
    BackendKind::Pinecone
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_pinecone_control_url() -> String {
    "https://api.pinecone.io".to_string()
}

fn default_upsert_batch_size() -> usize {
    100
}

fn default_max_concurrent_files() -> usize {
    1
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_file: default_ignore_file(),
            extra_ignore_patterns: Vec::new(),
            max_file_size_mb: default_max_file_size(),
            overlap_ratio: default_overlap_ratio(),
            warn_chunk_tokens: default_warn_chunk_tokens(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_backend_kind(),
            embedding_model: default_embedding_model(),
            openai_base_url: default_openai_base_url(),
            openai_api_key: None,
            pinecone_api_key: None,
            pinecone_index: None,
            pinecone_control_url: default_pinecone_control_url(),
            namespace: None,
            jsonl_path: None,
            upsert_batch_size: default_upsert_batch_size(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: default_max_concurrent_files(),
            request_timeout_sec: default_request_timeout(),
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("kind", &self.kind)
            .field("embedding_model", &self.embedding_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("pinecone_api_key", &redact(&self.pinecone_api_key))
            .field("pinecone_index", &self.pinecone_index)
            .field("pinecone_control_url", &self.pinecone_control_url)
            .field("namespace", &self.namespace)
            .field("jsonl_path", &self.jsonl_path)
            .field("upsert_batch_size", &self.upsert_batch_size)
            .finish()
    }
}

/// Render a secret for display without leaking it
pub fn redact(secret: &Option<String>) -> &'static str {
    match secret {
        Some(s) if !s.is_empty() => "<set>",
        _ => "<unset>",
    }
}

impl IndexingConfig {
    /// Configured extensions without their leading dot
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect()
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            IngestError::Setup(format!("Failed to read config file {path:?}: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg, None)
    }

    /// Load config with explicit XDG directories
    ///
    /// File priority order:
    /// 1. `explicit` path (from `--config`)
    /// 2. INGEST_CONFIG env var
    /// 3. XDG config file (~/.config/corpus-ingest/config.toml)
    /// 4. ./corpus-ingest.toml
    /// 5. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs, explicit: Option<&Path>) -> Result<Self> {
        let config = Self::resolve(xdg, explicit)?;
        config.validate()?;
        Ok(config)
    }

    /// Layer file, XDG defaults and environment without validating, so
    /// callers can apply command-line overrides first
    pub fn resolve(xdg: &XdgDirs, explicit: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::from_file(path)?
        } else if let Ok(config_path) = env::var("INGEST_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("corpus-ingest.toml").exists() {
                Self::from_file("corpus-ingest.toml")?
            } else {
                Self::default()
            }
        };

        if config.backend.jsonl_path.is_none() {
            config.backend.jsonl_path = Some(xdg.documents_file());
        }

        config.merge_env();
        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Credentials keep the names the hosted services document
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            self.backend.openai_api_key = Some(key);
        }
        if let Ok(key) = env::var("PINECONE_API_KEY") {
            self.backend.pinecone_api_key = Some(key);
        }
        if let Ok(index) = env::var("PINECONE_INDEX") {
            self.backend.pinecone_index = Some(index);
        }

        if let Ok(kind) = env::var("INGEST_BACKEND") {
            match kind.to_lowercase().as_str() {
                "pinecone" => self.backend.kind = BackendKind::Pinecone,
                "jsonl" => self.backend.kind = BackendKind::Jsonl,
                "memory" => self.backend.kind = BackendKind::Memory,
                other => tracing::warn!("Ignoring unknown INGEST_BACKEND '{}'", other),
            }
        }
        if let Ok(exts) = env::var("INGEST_EXTENSIONS") {
            self.indexing.extensions = exts
                .split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if let Ok(max_size) = env::var("INGEST_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.indexing.max_file_size_mb = size;
            }
        }
        if let Ok(max_concurrent) = env::var("INGEST_MAX_CONCURRENT_FILES") {
            if let Ok(max) = max_concurrent.parse() {
                self.limits.max_concurrent_files = max;
            }
        }
        if let Ok(timeout) = env::var("INGEST_REQUEST_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.limits.request_timeout_sec = t;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.normalized_extensions().is_empty() {
            return Err(IngestError::Setup(
                "At least one file extension is required".to_string(),
            ));
        }

        if self.indexing.max_file_size_mb == 0 {
            return Err(IngestError::Setup(
                "Max file size must be non-zero".to_string(),
            ));
        }

        let ratio = self.indexing.overlap_ratio;
        if !(0.0..0.5).contains(&ratio) {
            return Err(IngestError::Setup(format!(
                "Overlap ratio must be in [0, 0.5), got {ratio}"
            )));
        }

        if self.indexing.warn_chunk_tokens == 0 {
            return Err(IngestError::Setup(
                "Chunk warning threshold must be non-zero".to_string(),
            ));
        }

        if self.limits.max_concurrent_files == 0 {
            return Err(IngestError::Setup(
                "Max concurrent files must be non-zero".to_string(),
            ));
        }

        if self.limits.request_timeout_sec == 0 {
            return Err(IngestError::Setup(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        if self.backend.upsert_batch_size == 0 {
            return Err(IngestError::Setup(
                "Upsert batch size must be non-zero".to_string(),
            ));
        }

        if self.backend.kind == BackendKind::Pinecone {
            require(&self.backend.openai_api_key, "OPENAI_API_KEY")?;
            require(&self.backend.pinecone_api_key, "PINECONE_API_KEY")?;
            require(&self.backend.pinecone_index, "PINECONE_INDEX")?;
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Extensions: {:?}", self.indexing.extensions);
        tracing::info!("  Ignore file: {}", self.indexing.ignore_file);
        tracing::info!("  Max file size: {} MB", self.indexing.max_file_size_mb);
        tracing::info!("  Overlap ratio: {}", self.indexing.overlap_ratio);
        tracing::info!(
            "  Chunk warning threshold: {} tokens",
            self.indexing.warn_chunk_tokens
        );
        tracing::info!("  Backend: {}", self.backend.kind);
        if self.backend.kind == BackendKind::Pinecone {
            tracing::info!("  Embedding model: {}", self.backend.embedding_model);
            tracing::info!(
                "  Pinecone index: {}",
                self.backend.pinecone_index.as_deref().unwrap_or("<unset>")
            );
            tracing::info!(
                "  OpenAI API key: {}",
                redact(&self.backend.openai_api_key)
            );
            tracing::info!(
                "  Pinecone API key: {}",
                redact(&self.backend.pinecone_api_key)
            );
        }
        tracing::info!(
            "  Max concurrent files: {}",
            self.limits.max_concurrent_files
        );
        tracing::info!("  Request timeout: {}s", self.limits.request_timeout_sec);
    }
}

fn require(value: &Option<String>, name: &str) -> Result<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(IngestError::Setup(format!(
            "{name} is required for the pinecone backend"
        ))),
    }
}
