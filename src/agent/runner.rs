//! Agent runner with a streaming tool-calling loop.

use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::config::AgentSettings;
use crate::error::{PrataError, Result};
use crate::groq::create_client;
use crate::memory::{Message, Role, SessionMemory};
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionCall,
};
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Default system prompt for the chat agent.
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

/// Events emitted while an invocation is in flight.
#[derive(Debug, Clone)]
pub enum AgentEvent {
    /// A fragment of the assistant's answer, in generation order.
    Token(String),
    /// The agent started executing a tool call.
    ToolStart { name: String },
}

/// Agent that can search the web before answering.
///
/// Owns the bounded session memory; a fresh agent starts a fresh
/// conversation.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    tools: ToolContext,
    memory: SessionMemory,
    max_iterations: usize,
}

impl Agent {
    /// Create a new agent with the given tool context and model.
    pub fn new(tools: ToolContext, model: &str, settings: &AgentSettings) -> Self {
        let mut memory = SessionMemory::new(settings.memory_window);
        memory.ensure_system_message(DEFAULT_SYSTEM_PROMPT);

        Self {
            client: create_client(),
            model: model.to_string(),
            temperature: 0.2,
            tools,
            memory,
            max_iterations: settings.max_iterations,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Replace the default system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.memory.clear();
        self.memory.ensure_system_message(prompt);
        self
    }

    /// The model this agent talks to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The conversation so far.
    pub fn memory(&self) -> &SessionMemory {
        &self.memory
    }

    /// Send a user message and run the reasoning loop to completion.
    ///
    /// Content fragments and tool starts are forwarded on `events` as they
    /// happen. The loop alternates model completions and tool executions
    /// until the model produces a final answer; if the iteration cap is hit
    /// first, the best available partial answer is returned instead of an
    /// error. Tool failures and malformed tool calls are fed back into the
    /// loop as corrective tool results.
    pub async fn send(
        &mut self,
        input: &str,
        events: Option<&UnboundedSender<AgentEvent>>,
    ) -> Result<AgentReply> {
        self.memory.append(Message::user(input));

        let mut messages = self.request_messages()?;
        let mut tool_calls_made: Vec<ToolCallRecord> = Vec::new();
        let mut last_partial = String::new();

        for iteration in 1..=self.max_iterations {
            debug!("Agent iteration {}, {} messages", iteration, messages.len());

            let round = self.complete_streaming(&messages, events).await?;

            if round.tool_calls.is_empty() {
                // Final answer, no further tool requests.
                return self.finalize(round.content, tool_calls_made, iteration);
            }

            if !round.content.trim().is_empty() {
                last_partial = round.content.clone();
            }

            // Record the assistant turn that requested the tools.
            messages.push(assistant_tool_request(&round)?);

            for call in &round.tool_calls {
                emit(events, AgentEvent::ToolStart {
                    name: call.name.clone(),
                });
                info!("Agent calling tool: {} with args: {}", call.name, call.arguments);

                let result = match parse_tool_call(&call.name, &call.arguments) {
                    Ok(tool) => match self.tools.execute(&tool).await {
                        Ok(output) => output,
                        Err(e) => format!("Tool error: {}", e),
                    },
                    Err(e) => format!(
                        "Failed to parse tool call: {}. Correct the arguments and try again, \
                         or answer directly.",
                        e
                    ),
                };

                messages.push(
                    ChatCompletionRequestToolMessageArgs::default()
                        .tool_call_id(&call.id)
                        .content(result.clone())
                        .build()
                        .map_err(|e| PrataError::Agent(e.to_string()))?
                        .into(),
                );

                tool_calls_made.push(ToolCallRecord {
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                    result,
                });
            }
        }

        // Iteration cap reached: return the best partial answer we have.
        warn!(
            "Agent hit the iteration cap ({}) before a final answer",
            self.max_iterations
        );
        let answer = best_effort_answer(&last_partial, &tool_calls_made);
        if last_partial.is_empty() {
            // Nothing was streamed for this text yet.
            emit(events, AgentEvent::Token(answer.clone()));
        }
        self.finalize(answer, tool_calls_made, self.max_iterations)
    }

    /// Run one streamed completion, forwarding content deltas as events and
    /// accumulating any tool-call fragments.
    async fn complete_streaming(
        &self,
        messages: &[ChatCompletionRequestMessage],
        events: Option<&UnboundedSender<AgentEvent>>,
    ) -> Result<CompletionRound> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages.to_vec())
            .tools(tool_definitions())
            .temperature(self.temperature)
            .stream(true)
            .build()
            .map_err(|e| PrataError::Agent(e.to_string()))?;

        let mut stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| PrataError::Llm(format!("Chat API error: {}", e)))?;

        let mut content = String::new();
        let mut pending: Vec<PendingToolCall> = Vec::new();

        while let Some(item) = stream.next().await {
            let chunk = item.map_err(|e| PrataError::Llm(format!("Chat stream error: {}", e)))?;
            let Some(choice) = chunk.choices.first() else {
                continue;
            };

            if let Some(delta) = &choice.delta.content {
                if !delta.is_empty() {
                    content.push_str(delta);
                    emit(events, AgentEvent::Token(delta.clone()));
                }
            }

            if let Some(fragments) = &choice.delta.tool_calls {
                for fragment in fragments {
                    let idx = fragment.index as usize;
                    if pending.len() <= idx {
                        pending.resize_with(idx + 1, PendingToolCall::default);
                    }
                    let slot = &mut pending[idx];
                    if let Some(id) = &fragment.id {
                        slot.id = id.clone();
                    }
                    if let Some(function) = &fragment.function {
                        if let Some(name) = &function.name {
                            slot.name.push_str(name);
                        }
                        if let Some(arguments) = &function.arguments {
                            slot.arguments.push_str(arguments);
                        }
                    }
                }
            }
        }

        let tool_calls = pending.into_iter().filter(|p| !p.name.is_empty()).collect();
        Ok(CompletionRound { content, tool_calls })
    }

    /// Build the request message list from the bounded session memory.
    fn request_messages(&self) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::with_capacity(self.memory.len());

        if let Some(system) = self.memory.system_message() {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.content.clone())
                    .build()
                    .map_err(|e| PrataError::Agent(e.to_string()))?
                    .into(),
            );
        }

        for message in self.memory.conversation() {
            let converted: ChatCompletionRequestMessage = match message.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map_err(|e| PrataError::Agent(e.to_string()))?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map_err(|e| PrataError::Agent(e.to_string()))?
                    .into(),
                // The system message lives at the head, not in the conversation.
                Role::System => continue,
            };
            messages.push(converted);
        }

        Ok(messages)
    }

    /// Record the final answer in memory and assemble the reply.
    fn finalize(
        &mut self,
        content: String,
        tool_calls: Vec<ToolCallRecord>,
        iterations: usize,
    ) -> Result<AgentReply> {
        self.memory.append(Message::assistant(content.clone()));

        Ok(AgentReply {
            content,
            tool_calls,
            iterations,
        })
    }
}

/// Outcome of one streamed completion round.
struct CompletionRound {
    content: String,
    tool_calls: Vec<PendingToolCall>,
}

/// A tool call accumulated from stream fragments.
#[derive(Debug, Default, Clone)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Build the assistant request message that carries the round's tool calls.
fn assistant_tool_request(round: &CompletionRound) -> Result<ChatCompletionRequestMessage> {
    let calls: Vec<ChatCompletionMessageToolCall> = round
        .tool_calls
        .iter()
        .map(|call| ChatCompletionMessageToolCall {
            id: call.id.clone(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
            },
        })
        .collect();

    let mut builder = ChatCompletionRequestAssistantMessageArgs::default();
    builder.tool_calls(calls);
    if !round.content.is_empty() {
        builder.content(round.content.clone());
    }

    Ok(builder
        .build()
        .map_err(|e| PrataError::Agent(e.to_string()))?
        .into())
}

/// Forward an event to the UI, dropping it if nobody is listening.
fn emit(events: Option<&UnboundedSender<AgentEvent>>, event: AgentEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

/// Compose the answer returned when the iteration cap forces termination.
fn best_effort_answer(partial: &str, tool_calls: &[ToolCallRecord]) -> String {
    if !partial.trim().is_empty() {
        return partial.to_string();
    }

    match tool_calls.last() {
        Some(record) => format!(
            "I couldn't reach a final answer in the allotted reasoning steps. \
             Here is what the last web search returned:\n\n{}",
            record.result
        ),
        None => "I couldn't reach a final answer in the allotted reasoning steps. \
                 Please try rephrasing the question."
            .to_string(),
    }
}

/// Reply from one agent invocation.
#[derive(Debug)]
pub struct AgentReply {
    /// The final answer from the agent.
    pub content: String,
    /// Record of all tool calls made during the invocation, in order.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of model completions used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(result: &str) -> ToolCallRecord {
        ToolCallRecord {
            name: "web_search".to_string(),
            arguments: r#"{"query": "test"}"#.to_string(),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_tool_call_record_display() {
        assert_eq!(
            format!("{}", record("ok")),
            r#"web_search({"query": "test"})"#
        );
    }

    #[test]
    fn test_best_effort_prefers_partial_content() {
        let answer = best_effort_answer("Partial thoughts so far.", &[record("ignored")]);
        assert_eq!(answer, "Partial thoughts so far.");
    }

    #[test]
    fn test_best_effort_falls_back_to_last_tool_result() {
        let answer = best_effort_answer("", &[record("older"), record("Tool error: timed out")]);
        assert!(answer.contains("Tool error: timed out"));
        assert!(!answer.is_empty());
    }

    #[test]
    fn test_best_effort_without_any_tool_results() {
        let answer = best_effort_answer("  ", &[]);
        assert!(!answer.is_empty());
    }
}
