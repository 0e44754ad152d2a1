//! corpus-ingest CLI - chunk documents and load them into a vector index
//!
//! # Examples
//!
//! ```bash
//! # Preview what would be ingested
//! corpus-ingest scan ./docs
//!
//! # Ingest into Pinecone (needs OPENAI_API_KEY, PINECONE_API_KEY, PINECONE_INDEX)
//! corpus-ingest ingest ./docs
//!
//! # Offline run into a local JSONL file
//! corpus-ingest ingest ./docs --backend jsonl
//!
//! # How would a 5000-token file be chunked?
//! corpus-ingest plan 5000
//! ```

use clap::Parser;
use corpus_ingest::cli::output::print_error;
use corpus_ingest::cli::{run, Cli, OutputFormat};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs go to stderr
    match cli.format {
        OutputFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        OutputFormat::Human => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
