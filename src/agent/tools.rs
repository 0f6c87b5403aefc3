//! Tool definitions and implementations for the agent.

use crate::error::{PrataError, Result};
use crate::search::{TavilyClient, SEARCH_TOOL_DESCRIPTION, SEARCH_TOOL_NAME};
use serde::{Deserialize, Serialize};

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Search the web for current information.
    WebSearch { query: String },
}

/// Tool execution context with access to the search client.
#[derive(Clone)]
pub struct ToolContext {
    search: TavilyClient,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(search: TavilyClient) -> Self {
        Self { search }
    }

    /// Execute a tool call and return the result as text for the model.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::WebSearch { query } => self.execute_web_search(query).await,
        }
    }

    async fn execute_web_search(&self, query: &str) -> Result<String> {
        let results = self.search.search(query).await?;

        if results.is_empty() {
            return Ok("No results found for this query.".to_string());
        }

        let formatted = results
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {}\n   {}\n   {}", i + 1, r.title, r.url, r.snippet))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(format!("Found {} results:\n\n{}", results.len(), formatted))
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: SEARCH_TOOL_NAME.to_string(),
            description: Some(SEARCH_TOOL_DESCRIPTION.to_string()),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            })),
            strict: None,
        },
    }]
}

/// Parse a tool call from the model's response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| PrataError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        SEARCH_TOOL_NAME => {
            let query = args["query"]
                .as_str()
                .ok_or_else(|| PrataError::Agent("Missing 'query' argument".to_string()))?
                .to_string();
            Ok(ToolCall::WebSearch { query })
        }
        _ => Err(PrataError::Agent(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_search_tool() {
        let tool = parse_tool_call("web_search", r#"{"query": "visionos release notes"}"#).unwrap();
        match tool {
            ToolCall::WebSearch { query } => {
                assert_eq!(query, "visionos release notes");
            }
        }
    }

    #[test]
    fn test_parse_missing_query() {
        let err = parse_tool_call("web_search", r#"{"q": "oops"}"#).unwrap_err();
        assert!(matches!(err, PrataError::Agent(_)));
    }

    #[test]
    fn test_parse_malformed_arguments() {
        let err = parse_tool_call("web_search", "{not json").unwrap_err();
        assert!(matches!(err, PrataError::Agent(_)));
    }

    #[test]
    fn test_parse_unknown_tool() {
        let err = parse_tool_call("read_file", r#"{"path": "/etc/hosts"}"#).unwrap_err();
        assert!(matches!(err, PrataError::Agent(_)));
    }

    #[test]
    fn test_tool_definitions_advertise_web_search() {
        let defs = tool_definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].function.name, "web_search");
    }
}
