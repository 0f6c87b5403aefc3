//! Tavily web search client.

use crate::error::{PrataError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Tool name advertised to the model.
pub const SEARCH_TOOL_NAME: &str = "web_search";

/// Natural-language description the model uses to decide when to search.
pub const SEARCH_TOOL_DESCRIPTION: &str = "A search engine. Useful for answering questions about \
    current events, recent information, or general knowledge that may not be covered by your \
    training data. Input should be a search query.";

/// Endpoint of the hosted search API.
const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Timeout for search requests (30 seconds).
const SEARCH_TIMEOUT_SECS: u64 = 30;

/// A single ranked search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Client for the Tavily search API.
#[derive(Clone)]
pub struct TavilyClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    max_results: usize,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

impl TavilyClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: &str, max_results: usize) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_key: api_key.to_string(),
            endpoint: TAVILY_ENDPOINT.to_string(),
            max_results,
        }
    }

    /// Create a client from the `TAVILY_API_KEY` environment variable.
    pub fn from_env(max_results: usize) -> Result<Self> {
        let api_key = std::env::var("TAVILY_API_KEY").map_err(|_| {
            PrataError::Config(
                "TAVILY_API_KEY not set. Set it with: export TAVILY_API_KEY='tvly-...'"
                    .to_string(),
            )
        })?;
        Ok(Self::new(&api_key, max_results))
    }

    /// The maximum number of results a search returns.
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Run a search and return ranked results, capped at `max_results`.
    ///
    /// Upstream failures (transport errors, timeouts, non-success statuses)
    /// surface as [`PrataError::Search`] so callers can recover.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let body = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results: self.max_results,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| PrataError::Search(format!("request error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PrataError::Search(format!("{}: {}", status, text)));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| PrataError::Search(format!("decode error: {}", e)))?;

        let results = collect_results(parsed, self.max_results);
        debug!("Search returned {} results", results.len());
        Ok(results)
    }
}

/// Convert a raw API response into capped, ordered results.
fn collect_results(response: SearchResponse, max_results: usize) -> Vec<SearchResult> {
    response
        .results
        .into_iter()
        .take(max_results)
        .map(|r| SearchResult {
            title: r.title,
            url: r.url,
            snippet: r.content,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> SearchResponse {
        serde_json::from_str(
            r#"{
                "query": "visionos release",
                "results": [
                    {"title": "First", "url": "https://a.example", "content": "alpha", "score": 0.9},
                    {"title": "Second", "url": "https://b.example", "content": "beta", "score": 0.7},
                    {"title": "Third", "url": "https://c.example", "content": "gamma", "score": 0.5},
                    {"title": "Fourth", "url": "https://d.example", "content": "delta", "score": 0.2}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_collect_results_caps_and_preserves_order() {
        let results = collect_results(sample_response(), 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "First");
        assert_eq!(results[1].title, "Second");
        assert_eq!(results[2].title, "Third");
    }

    #[test]
    fn test_collect_results_empty_response() {
        let response: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(collect_results(response, 3).is_empty());
    }

    #[test]
    fn test_collect_results_missing_results_field() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(collect_results(response, 3).is_empty());
    }
}
