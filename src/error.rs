//! Error types for Prata.

use thiserror::Error;

/// Library-level error type for Prata operations.
#[derive(Error, Debug)]
pub enum PrataError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Web search failed: {0}")]
    Search(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("LLM API error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Prata operations.
pub type Result<T> = std::result::Result<T, PrataError>;
