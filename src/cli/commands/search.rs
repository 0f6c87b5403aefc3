//! Direct web search command, bypassing the agent.
//!
//! Exercises the search wrapper on its own, which is also handy for
//! checking that the search credentials work.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::search::TavilyClient;

/// Run the search command.
pub async fn run_search(query: &str, limit: Option<usize>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Search) {
        Output::error(&format!("{}", e));
        Output::info("Run 'prata doctor' for detailed diagnostics.");
        return Err(e);
    }

    let max_results = limit.unwrap_or(settings.search.max_results);
    let client = TavilyClient::from_env(max_results)?;

    let spinner = Output::spinner(&format!("Searching for: {}", query));
    let results = client.search(query).await;
    spinner.finish_and_clear();

    let results = results?;

    if results.is_empty() {
        Output::info("No results found.");
        return Ok(());
    }

    Output::header(&format!("Results for '{}'", query));
    for (i, result) in results.iter().enumerate() {
        Output::search_result(i + 1, &result.title, &result.url, &result.snippet);
    }
    println!();

    Ok(())
}
