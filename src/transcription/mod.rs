//! Transcription module for Prata.
//!
//! Converts recorded audio clips to text using the hosted Whisper API.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for speech-to-text services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a recorded audio clip and return the transcript text.
    ///
    /// `file_name` is the clip's original name; its extension tells the
    /// service which audio container to expect.
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String>;
}
