//! Tests for the show-config CLI command

use corpus_ingest::cli::commands::config::{execute, ConfigArgs, ConfigResponse};
use corpus_ingest::cli::OutputFormat;
use corpus_ingest::core::config::Config;
use corpus_ingest::core::xdg::XdgDirs;

#[test]
fn test_secrets_are_redacted() {
    let mut config = Config::default();
    config.backend.openai_api_key = Some("sk-live-secret".to_string());
    config.backend.pinecone_index = Some("docs".to_string());

    let response = ConfigResponse::new(&config, &XdgDirs::new());
    let json = serde_json::to_string(&response).unwrap();

    assert!(!json.contains("sk-live-secret"));
    assert_eq!(response.backend.openai_api_key, "<set>");
    assert_eq!(response.backend.pinecone_api_key, "<unset>");
    assert_eq!(response.backend.pinecone_index.as_deref(), Some("docs"));
    assert_eq!(response.indexing.warn_chunk_tokens, 800);
}

#[test]
fn test_show_config_formats() {
    let config = Config::default();
    let xdg = XdgDirs::new();
    assert!(execute(ConfigArgs {}, &config, &xdg, OutputFormat::Human).is_ok());
    assert!(execute(ConfigArgs {}, &config, &xdg, OutputFormat::Json).is_ok());
}
