//! CLI adapter for corpus-ingest
//!
//! Thin clap layer over `core/`: each subcommand parses its arguments,
//! resolves configuration and calls into the pipeline, scanner or
//! planner.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::xdg::XdgDirs;

/// corpus-ingest - token-aware document ingestion
///
/// Scans a documentation tree, sizes each file by token count, splits
/// large files into overlapping chunks and writes them to a vector index.
#[derive(Parser, Debug)]
#[command(name = "corpus-ingest")]
#[command(version)]
#[command(about = "Chunk documents and load them into a vector index", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Configuration file (overrides INGEST_CONFIG and the XDG config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest every matching document under a directory
    Ingest(commands::IngestArgs),

    /// List the files an ingest would pick up, with token counts and plans
    Scan(commands::ScanArgs),

    /// Show the chunk plan for a token count
    Plan(commands::PlanArgs),

    /// Show the effective configuration (secrets redacted)
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  corpus-ingest completions bash > ~/.local/share/bash-completion/completions/corpus-ingest
    ///   zsh:   corpus-ingest completions zsh > ~/.zfunc/_corpus-ingest
    ///   fish:  corpus-ingest completions fish > ~/.config/fish/completions/corpus-ingest.fish
    Completions(commands::CompletionsArgs),
}

impl Cli {
    /// Log filter used when RUST_LOG is unset
    pub fn default_log_filter(&self) -> &'static str {
        match &self.command {
            Commands::Ingest(args) if args.quiet => "corpus_ingest=warn",
            _ => "corpus_ingest=info",
        }
    }
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let xdg = XdgDirs::new();
    let explicit = cli.config.as_deref();
    let load = || Config::resolve(&xdg, explicit);

    match cli.command {
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Plan(args) => commands::plan::execute(args, cli.format),
        Commands::Ingest(args) => {
            xdg.log_paths();
            commands::ingest::execute(args, load()?, cli.format).await
        }
        Commands::Scan(args) => commands::scan::execute(args, load()?, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &load()?, &xdg, cli.format),
    }
}
