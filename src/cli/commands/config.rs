//! Config command - show the effective configuration

use crate::cli::output::{colors, print_json};
use crate::cli::OutputFormat;
use crate::core::config::{redact, Config};
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

/// Arguments for the show-config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response (secrets redacted)
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub data_dir: String,
    pub indexing: IndexingView,
    pub backend: BackendView,
    pub limits: LimitsView,
}

#[derive(Debug, Serialize)]
pub struct IndexingView {
    pub extensions: Vec<String>,
    pub ignore_file: String,
    pub extra_ignore_patterns: Vec<String>,
    pub max_file_size_mb: usize,
    pub overlap_ratio: f64,
    pub warn_chunk_tokens: usize,
}

#[derive(Debug, Serialize)]
pub struct BackendView {
    pub kind: String,
    pub embedding_model: String,
    pub openai_base_url: String,
    pub openai_api_key: &'static str,
    pub pinecone_api_key: &'static str,
    pub pinecone_index: Option<String>,
    pub namespace: Option<String>,
    pub jsonl_path: Option<String>,
    pub upsert_batch_size: usize,
}

#[derive(Debug, Serialize)]
pub struct LimitsView {
    pub max_concurrent_files: usize,
    pub request_timeout_sec: u64,
}

impl ConfigResponse {
    pub fn new(config: &Config, xdg: &XdgDirs) -> Self {
        let backend = &config.backend;
        Self {
            config_file: xdg.config_file().display().to_string(),
            data_dir: xdg.data_dir.display().to_string(),
            indexing: IndexingView {
                extensions: config.indexing.extensions.clone(),
                ignore_file: config.indexing.ignore_file.clone(),
                extra_ignore_patterns: config.indexing.extra_ignore_patterns.clone(),
                max_file_size_mb: config.indexing.max_file_size_mb,
                overlap_ratio: config.indexing.overlap_ratio,
                warn_chunk_tokens: config.indexing.warn_chunk_tokens,
            },
            backend: BackendView {
                kind: backend.kind.to_string(),
                embedding_model: backend.embedding_model.clone(),
                openai_base_url: backend.openai_base_url.clone(),
                openai_api_key: redact(&backend.openai_api_key),
                pinecone_api_key: redact(&backend.pinecone_api_key),
                pinecone_index: backend.pinecone_index.clone(),
                namespace: backend.namespace.clone(),
                jsonl_path: backend.jsonl_path.as_ref().map(|p| p.display().to_string()),
                upsert_batch_size: backend.upsert_batch_size,
            },
            limits: LimitsView {
                max_concurrent_files: config.limits.max_concurrent_files,
                request_timeout_sec: config.limits.request_timeout_sec,
            },
        }
    }
}

/// Execute the show-config command
pub fn execute(
    _args: ConfigArgs,
    config: &Config,
    xdg: &XdgDirs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = ConfigResponse::new(config, xdg);

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  config_file: {}", response.config_file);
            println!("  data_dir: {}", response.data_dir);
            println!("  indexing:");
            println!("    extensions: {:?}", response.indexing.extensions);
            println!("    ignore_file: {}", response.indexing.ignore_file);
            println!(
                "    extra_ignore_patterns: {:?}",
                response.indexing.extra_ignore_patterns
            );
            println!("    max_file_size_mb: {}", response.indexing.max_file_size_mb);
            println!("    overlap_ratio: {}", response.indexing.overlap_ratio);
            println!("    warn_chunk_tokens: {}", response.indexing.warn_chunk_tokens);
            println!("  backend:");
            println!("    kind: {}", response.backend.kind);
            println!("    embedding_model: {}", response.backend.embedding_model);
            println!("    openai_base_url: {}", response.backend.openai_base_url);
            println!("    openai_api_key: {}", response.backend.openai_api_key);
            println!("    pinecone_api_key: {}", response.backend.pinecone_api_key);
            println!(
                "    pinecone_index: {}",
                response.backend.pinecone_index.as_deref().unwrap_or("<unset>")
            );
            if let Some(namespace) = &response.backend.namespace {
                println!("    namespace: {namespace}");
            }
            if let Some(path) = &response.backend.jsonl_path {
                println!("    jsonl_path: {path}");
            }
            println!("    upsert_batch_size: {}", response.backend.upsert_batch_size);
            println!("  limits:");
            println!(
                "    max_concurrent_files: {}",
                response.limits.max_concurrent_files
            );
            println!(
                "    request_timeout_sec: {}",
                response.limits.request_timeout_sec
            );
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}
