//! Interactive chat command.

use crate::agent::{Agent, AgentEvent, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{LlmSettings, Settings, MODEL_CHOICES};
use crate::error::{PrataError, Result};
use crate::memory::Role;
use crate::search::TavilyClient;
use crate::transcription::{Transcriber, WhisperTranscriber};
use console::style;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::debug;

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Chat) {
        Output::error(&format!("{}", e));
        Output::info("Run 'prata doctor' for detailed diagnostics.");
        return Err(e);
    }

    let model = model.unwrap_or_else(|| settings.llm.model.clone());
    if !LlmSettings::is_supported(&model) {
        return Err(PrataError::InvalidInput(format!(
            "Unsupported model '{}'. Choices: {}",
            model,
            MODEL_CHOICES.join(", ")
        )));
    }

    let mut session = ChatSession::new(&model, &settings)?;

    println!("\n{}", style("Prata Chat").bold().cyan());
    println!("{}", style(format!("Model: {}", model)).dim());
    println!(
        "{}\n",
        style(
            "Type your questions, or 'exit' to quit. Use ':voice <file>' to send a recorded \
             clip, 'history' to show the transcript, and 'clear' to reset the conversation."
        )
        .dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            session.clear();
            Output::info("Conversation history cleared.");
            continue;
        }

        if input.eq_ignore_ascii_case("history") {
            session.render_transcript();
            continue;
        }

        let outcome = if let Some(path) = input.strip_prefix(":voice") {
            session.submit_voice(path.trim()).await
        } else {
            session.submit(input).await
        };

        if let Err(e) = outcome {
            Output::error(&format!("{}", e));
        }
    }

    Ok(())
}

/// Session context for one chat: owns the agent (and with it the bounded
/// conversation memory) and the transcriber.
struct ChatSession {
    agent: Agent,
    transcriber: WhisperTranscriber,
    tools: ToolContext,
    model: String,
    settings: Settings,
}

impl ChatSession {
    /// Create a new session with empty memory.
    fn new(model: &str, settings: &Settings) -> Result<Self> {
        let search = TavilyClient::from_env(settings.search.max_results)?;
        let tools = ToolContext::new(search);
        let agent = Agent::new(tools.clone(), model, &settings.agent)
            .with_temperature(settings.llm.temperature);

        Ok(Self {
            agent,
            transcriber: WhisperTranscriber::with_model(&settings.transcription.model),
            tools,
            model: model.to_string(),
            settings: settings.clone(),
        })
    }

    /// Discard the current agent and start over with empty memory.
    fn clear(&mut self) {
        self.agent = Agent::new(self.tools.clone(), &self.model, &self.settings.agent)
            .with_temperature(self.settings.llm.temperature);
    }

    /// Submit a user turn and stream the assistant's answer to the terminal.
    async fn submit(&mut self, input: &str) -> Result<()> {
        print!("\n{} ", style("Prata:").cyan().bold());
        io::stdout().flush()?;

        let (tx, mut rx) = mpsc::unbounded_channel::<AgentEvent>();
        let printer = tokio::spawn(async move {
            let mut stdout = io::stdout();
            while let Some(event) = rx.recv().await {
                match event {
                    AgentEvent::Token(token) => {
                        print!("{}", token);
                        let _ = stdout.flush();
                    }
                    AgentEvent::ToolStart { name } => {
                        println!("\n  {}", style(format!("[using {}]", name)).dim());
                    }
                }
            }
        });

        let result = self.agent.send(input, Some(&tx)).await;
        drop(tx);
        let _ = printer.await;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                println!();
                return Err(e);
            }
        };
        println!("\n");
        debug!(
            "Answered in {} iteration(s) with {} tool call(s)",
            reply.iterations,
            reply.tool_calls.len()
        );
        Ok(())
    }

    /// Transcribe a recorded clip and submit the transcript as a user turn.
    ///
    /// Transcription failures are surfaced as a notice and leave the
    /// session untouched.
    async fn submit_voice(&mut self, path: &str) -> Result<()> {
        if path.is_empty() {
            Output::warning("Usage: :voice <path-to-audio-file>");
            return Ok(());
        }

        let audio = tokio::fs::read(path).await?;
        let file_name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("clip.wav")
            .to_string();

        let spinner = Output::spinner("Transcribing audio...");
        let transcript = self.transcriber.transcribe(audio, &file_name).await;
        spinner.finish_and_clear();

        match transcript {
            Ok(text) if text.is_empty() => {
                Output::warning("Transcription returned no speech.");
                Ok(())
            }
            Ok(text) => {
                println!("{} {}", style("You (voice):").green().bold(), text);
                self.submit(&text).await
            }
            Err(e) => {
                Output::error(&format!("{}", e));
                Ok(())
            }
        }
    }

    /// Print the conversation so far, system prompt excluded.
    fn render_transcript(&self) {
        let conversation = self.agent.memory().conversation();
        if conversation.is_empty() {
            Output::info("No messages yet.");
            return;
        }

        println!();
        for message in conversation {
            match message.role {
                Role::User => {
                    println!("{} {}", style("You:").green().bold(), message.content)
                }
                Role::Assistant => {
                    println!("{} {}\n", style("Prata:").cyan().bold(), message.content)
                }
                Role::System => {}
            }
        }
    }
}
