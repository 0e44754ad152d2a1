//! Scan command - preview which files an ingest would pick up

use crate::cli::output::{colors, describe_plan, format_bytes, print_header, print_json};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::indexer::{planner, Cl100kCounter, FileScanner, TokenCounter};
use crate::core::types::{ChunkPlan, FileFailure};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root directory to scan
    pub root: PathBuf,

    /// File extensions to include (can be specified multiple times)
    #[arg(long = "ext", short = 'e', value_name = "EXT")]
    pub extensions: Vec<String>,
}

/// One scanned file with its plan
#[derive(Debug, Serialize)]
pub struct ScannedFile {
    pub path: String,
    pub token_count: usize,
    pub byte_len: u64,
    pub plan: ChunkPlan,
}

/// Scan result response
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub root: String,
    pub files: Vec<ScannedFile>,
    pub total_tokens: usize,
    pub total_chunks: usize,
    pub unreadable: Vec<FileFailure>,
    pub skipped: Vec<String>,
}

/// Execute the scan command
pub fn execute(
    args: ScanArgs,
    config: Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let counter: Arc<dyn TokenCounter> = Arc::new(Cl100kCounter::new()?);
    let response = scan_with(&args, config, counter)?;

    match format {
        OutputFormat::Human => print_scan(&response),
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}

/// Scan using an explicit token counter
pub fn scan_with(
    args: &ScanArgs,
    mut config: Config,
    counter: Arc<dyn TokenCounter>,
) -> Result<ScanResponse, Box<dyn std::error::Error>> {
    if !args.extensions.is_empty() {
        config.indexing.extensions = args.extensions.clone();
    }

    let root: &Path = &args.root;
    let scanner = FileScanner::for_root(&config.indexing, root, counter)?;
    let output = scanner.scan(root)?;

    let files: Vec<ScannedFile> = output
        .records
        .iter()
        .map(|record| ScannedFile {
            path: record.source(),
            token_count: record.token_count,
            byte_len: record.byte_len,
            plan: planner::plan(record.token_count),
        })
        .collect();

    Ok(ScanResponse {
        root: root.display().to_string(),
        total_tokens: files.iter().map(|f| f.token_count).sum(),
        total_chunks: files.iter().map(|f| f.plan.chunk_count).sum(),
        files,
        unreadable: output.failures,
        skipped: output.skipped,
    })
}

fn print_scan(response: &ScanResponse) {
    print_header(&format!("Files under {}", response.root));
    for file in &response.files {
        println!(
            "  {}  {} tokens, {}  {}",
            colors::file_path(&file.path),
            colors::number(&file.token_count.to_string()),
            format_bytes(file.byte_len),
            colors::dim(&describe_plan(&file.plan))
        );
    }
    for failure in &response.unreadable {
        println!(
            "  {} {}  {}",
            colors::error("unreadable"),
            colors::file_path(&failure.path),
            colors::dim(&failure.message)
        );
    }
    for skipped in &response.skipped {
        println!("  {} {}", colors::warning("skipped"), skipped);
    }
    println!(
        "{} files, {} tokens, {} chunks",
        colors::number(&response.files.len().to_string()),
        colors::number(&response.total_tokens.to_string()),
        colors::number(&response.total_chunks.to_string())
    );
}
