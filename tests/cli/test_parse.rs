//! Argument parsing tests

use clap::Parser;
use corpus_ingest::cli::{Cli, Commands, OutputFormat};
use corpus_ingest::core::config::BackendKind;

#[test]
fn test_parse_ingest_flags() {
    let cli = Cli::try_parse_from([
        "corpus-ingest",
        "--format",
        "json",
        "ingest",
        "./docs",
        "--ext",
        "md",
        "--ext",
        "mdx",
        "--backend",
        "jsonl",
        "--jobs",
        "2",
        "--require-files",
        "--quiet",
    ])
    .unwrap();

    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.default_log_filter(), "corpus_ingest=warn");
    match cli.command {
        Commands::Ingest(args) => {
            assert_eq!(args.extensions, vec!["md", "mdx"]);
            assert_eq!(args.backend, Some(BackendKind::Jsonl));
            assert_eq!(args.jobs, Some(2));
            assert!(args.require_files);
        }
        other => panic!("expected ingest, got {other:?}"),
    }
}

#[test]
fn test_parse_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["corpus-ingest", "show-config", "--config", "ingest.toml"])
        .unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("ingest.toml")));
    assert_eq!(cli.default_log_filter(), "corpus_ingest=info");
}

#[test]
fn test_parse_plan_requires_number() {
    assert!(Cli::try_parse_from(["corpus-ingest", "plan", "many"]).is_err());
    assert!(Cli::try_parse_from(["corpus-ingest", "plan", "4001"]).is_ok());
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
