//! Groq client configuration with sensible defaults.
//!
//! Groq exposes an OpenAI-compatible API, so the same client is used for
//! chat completions and Whisper audio transcription.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Base URL of the Groq OpenAI-compatible API.
const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default timeout for API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create a Groq client with configured timeout.
///
/// Reads the API key from the `GROQ_API_KEY` environment variable. An empty
/// key is tolerated here; pre-flight checks reject it before any request is
/// made.
pub fn create_client() -> Client<OpenAIConfig> {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create a Groq client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let config = OpenAIConfig::new()
        .with_api_base(GROQ_API_BASE)
        .with_api_key(std::env::var("GROQ_API_KEY").unwrap_or_default());

    Client::with_config(config).with_http_client(http_client)
}
