//! Web search module for Prata.
//!
//! Wraps the hosted Tavily search API behind a small client used both by
//! the agent's `web_search` tool and by the `search` subcommand.

mod tavily;

pub use tavily::{SearchResult, TavilyClient, SEARCH_TOOL_DESCRIPTION, SEARCH_TOOL_NAME};
