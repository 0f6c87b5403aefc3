//! Prata - Voice-enabled chat agent with web search
//!
//! A terminal chat front-end for conversing with an LLM agent that can
//! search the web and transcribe spoken audio to text.
//!
//! The name "Prata" comes from the Norwegian/Scandinavian word for "talk" or "chat."
//!
//! # Overview
//!
//! Prata allows you to:
//! - Chat with a hosted LLM in an interactive terminal session
//! - Let the agent search the web when a question needs current information
//! - Speak instead of type: recorded audio clips are transcribed and submitted
//! - Stream answers token-by-token as they are generated
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `memory` - Bounded conversational memory
//! - `search` - Hosted web search client
//! - `agent` - Tool-calling agent loop
//! - `transcription` - Speech-to-text transcription
//! - `cli` - Terminal chat and subcommands
//!
//! # Example
//!
//! ```rust,no_run
//! use prata::agent::{Agent, ToolContext};
//! use prata::config::Settings;
//! use prata::search::TavilyClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let search = TavilyClient::from_env(settings.search.max_results)?;
//!     let mut agent = Agent::new(ToolContext::new(search), &settings.llm.model, &settings.agent);
//!
//!     let reply = agent.send("What's new in VisionOS?", None).await?;
//!     println!("{}", reply.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod groq;
pub mod memory;
pub mod search;
pub mod transcription;

pub use error::{PrataError, Result};
