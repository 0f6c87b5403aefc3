//! One-shot transcription command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::transcription::{Transcriber, WhisperTranscriber};
use std::path::Path;

/// Run the transcribe command.
pub async fn run_transcribe(input: &str, model: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Transcribe) {
        Output::error(&format!("{}", e));
        Output::info("Run 'prata doctor' for detailed diagnostics.");
        return Err(e);
    }

    let model = model.unwrap_or_else(|| settings.transcription.model.clone());
    let transcriber = WhisperTranscriber::with_model(&model);

    let audio = tokio::fs::read(input).await?;
    let file_name = Path::new(input)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("clip.wav")
        .to_string();

    let spinner = Output::spinner(&format!("Transcribing {} with {}...", input, model));
    let transcript = transcriber.transcribe(audio, &file_name).await;
    spinner.finish_and_clear();

    println!("{}", transcript?);
    Ok(())
}
