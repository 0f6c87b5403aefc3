//! CLI module for Prata.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Prata - Voice-enabled chat agent with web search
///
/// A terminal chat front-end for conversing with an LLM agent that can
/// search the web and transcribe spoken audio to text.
/// The name "Prata" comes from the Norwegian/Scandinavian word for "talk."
#[derive(Parser, Debug)]
#[command(name = "prata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session with the agent
    Chat {
        /// Chat model to use (see `prata config show` for choices)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Run a web search directly, bypassing the agent
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Transcribe a recorded audio clip to text
    Transcribe {
        /// Path to the audio file
        input: String,

        /// Whisper model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Check API keys and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "agent.max_iterations")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Show configuration file path
    Path,
}
