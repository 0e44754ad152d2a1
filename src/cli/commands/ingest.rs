//! Ingest command - chunk a directory and write it to the vector index

use crate::cli::output::{colors, format_duration, print_json, print_warning};
use crate::cli::OutputFormat;
use crate::core::config::{BackendKind, Config};
use crate::core::indexer::{Cl100kCounter, IngestionPipeline, TokenCounter};
use crate::core::storage;
use crate::core::types::RunSummary;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Root directory to ingest
    pub root: PathBuf,

    /// File extensions to include (can be specified multiple times)
    #[arg(long = "ext", short = 'e', value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Ignore file, relative to the root
    #[arg(long, value_name = "FILE")]
    pub ignore_file: Option<String>,

    /// Vector index backend
    #[arg(long, short = 'b', value_enum)]
    pub backend: Option<BackendKind>,

    /// Files processed concurrently
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,

    /// Fail when no matching files are found
    #[arg(long)]
    pub require_files: bool,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl IngestArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if !self.extensions.is_empty() {
            config.indexing.extensions = self.extensions.clone();
        }
        if let Some(ignore_file) = &self.ignore_file {
            config.indexing.ignore_file = ignore_file.clone();
        }
        if let Some(backend) = self.backend {
            config.backend.kind = backend;
        }
        if let Some(jobs) = self.jobs {
            config.limits.max_concurrent_files = jobs;
        }
    }
}

/// Execute the ingest command
pub async fn execute(
    args: IngestArgs,
    mut config: Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = args.root.canonicalize().map_err(|e| {
        format!(
            "Invalid path '{}': {}. Make sure the path exists and is accessible.",
            args.root.display(),
            e
        )
    })?;

    if !root.is_dir() {
        return Err(format!("Path '{}' is not a directory.", root.display()).into());
    }

    args.apply(&mut config);
    config.validate()?;
    config.log_config();

    let counter: Arc<dyn TokenCounter> = Arc::new(Cl100kCounter::new()?);
    let index = storage::connect(&config).await?;
    let backend = index.name().to_string();
    let pipeline = IngestionPipeline::new(config, counter, index)?;

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Ingesting {} into {}...",
            colors::file_path(&root.display().to_string()),
            colors::label(&backend)
        );
    }

    let summary = pipeline.run(&root).await?;

    match format {
        OutputFormat::Human => print_summary(&summary, args.quiet),
        OutputFormat::Json => print_json(&summary)?,
    }

    if args.require_files && summary.files_seen == 0 {
        return Err(format!("No matching files found under '{}'", root.display()).into());
    }

    Ok(())
}

fn print_summary(summary: &RunSummary, quiet: bool) {
    let headline = if summary.files_failed == 0 {
        colors::success("Ingested")
    } else {
        colors::warning("Ingested")
    };
    println!(
        "{} {}/{} files ({} chunks) in {}",
        headline,
        colors::number(&summary.files_succeeded.to_string()),
        colors::number(&summary.files_seen.to_string()),
        colors::number(&summary.chunks_indexed.to_string()),
        colors::number(&format_duration(summary.duration_ms as f64 / 1000.0))
    );

    for failure in &summary.failures {
        println!(
            "  {} {} [{}] {}",
            colors::error("failed"),
            colors::file_path(&failure.path),
            failure.stage,
            colors::dim(&failure.message)
        );
    }

    if quiet {
        return;
    }
    for warning in &summary.warnings {
        print_warning(warning);
    }
}
