//! Plan command - show how a file of a given size would be chunked

use crate::cli::output::{colors, describe_plan, print_json};
use crate::cli::OutputFormat;
use crate::core::indexer::planner;
use clap::Args;

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Token count of the file
    pub token_count: usize,
}

/// Execute the plan command
pub fn execute(args: PlanArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let plan = planner::plan(args.token_count);

    match format {
        OutputFormat::Human => {
            println!(
                "{} tokens: {}",
                colors::number(&args.token_count.to_string()),
                describe_plan(&plan)
            );
        }
        OutputFormat::Json => print_json(&plan)?,
    }

    Ok(())
}
