//! Whisper transcription over the Groq API.

use super::Transcriber;
use crate::error::{PrataError, Result};
use crate::groq::create_client;
use async_openai::types::{
    AudioInput, AudioResponseFormat, CreateTranscriptionRequestArgs, InputSource,
};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, instrument};

/// Whisper-based transcriber for recorded voice clips.
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl WhisperTranscriber {
    /// Create a new transcriber with the default model.
    pub fn new() -> Self {
        Self::with_model("whisper-large-v3")
    }

    /// Create a new transcriber with a custom model.
    pub fn with_model(model: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
        }
    }
}

impl Default for WhisperTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    /// Transcribe a recorded clip.
    ///
    /// The clip is spooled to a named temporary file that is removed on
    /// every exit path, then submitted to the hosted Whisper API. Upstream
    /// failures surface as [`PrataError::Transcription`].
    #[instrument(skip(self, audio), fields(bytes = audio.len(), file_name = %file_name))]
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String> {
        if audio.is_empty() {
            return Err(PrataError::Transcription("empty audio clip".to_string()));
        }

        let tmp = tempfile::Builder::new()
            .prefix("prata-clip-")
            .suffix(&clip_suffix(file_name))
            .tempfile()?;
        tokio::fs::write(tmp.path(), &audio).await?;

        debug!("Transcribing audio clip with {}", self.model);

        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput {
                source: InputSource::Path {
                    path: tmp.path().to_path_buf(),
                },
            })
            .model(&self.model)
            .response_format(AudioResponseFormat::Json)
            .build()
            .map_err(|e| PrataError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| PrataError::Transcription(format!("Whisper API error: {}", e)))?;

        drop(tmp);

        Ok(response.text.trim().to_string())
    }
}

/// Temporary-file suffix for a clip, derived from its original extension.
fn clip_suffix(file_name: &str) -> String {
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext),
        _ => ".wav".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_suffix() {
        assert_eq!(clip_suffix("voice.wav"), ".wav");
        assert_eq!(clip_suffix("clip.mp3"), ".mp3");
        assert_eq!(clip_suffix("mystery"), ".wav");
    }

    #[tokio::test]
    async fn test_empty_clip_is_rejected() {
        let transcriber = WhisperTranscriber::new();
        let err = transcriber.transcribe(Vec::new(), "empty.wav").await.unwrap_err();
        assert!(matches!(err, PrataError::Transcription(_)));
    }
}
