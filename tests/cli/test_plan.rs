//! Tests for the plan CLI command

use corpus_ingest::cli::commands::plan::{execute, PlanArgs};
use corpus_ingest::cli::OutputFormat;

#[test]
fn test_plan_human_and_json() {
    for token_count in [0, 500, 651, 4001] {
        assert!(execute(PlanArgs { token_count }, OutputFormat::Human).is_ok());
        assert!(execute(PlanArgs { token_count }, OutputFormat::Json).is_ok());
    }
}
