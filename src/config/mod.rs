//! Configuration module for Prata.

mod settings;

pub use settings::{
    AgentSettings, GeneralSettings, LlmSettings, SearchSettings, Settings,
    TranscriptionSettings, MODEL_CHOICES,
};
