//! CompletionClient trait — the abstraction over the language-model backend.
//!
//! The orchestration loop uses it in two modes: a non-streaming *decision*
//! call (`complete`) to learn whether the model wants tools, and a streaming
//! *answer* call (`stream`) for the final response. `context_window` exposes
//! the provider's token ceiling so the budgeter can prune against it.

use crate::error::ProviderError;
use crate::message::{Message, ToolCallRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for one completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "gpt-4o-mini")
    pub model: String,

    /// The conversation messages, already budgeted
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// The fixed tool catalogue advertised to the model
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A tool definition sent to the model so it knows what it can call.
/// Static for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// A complete (non-streaming) response — the decision call result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated assistant message (text and/or tool calls)
    pub message: Message,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A single chunk in a streaming response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Partial content delta
    #[serde(default)]
    pub content: Option<String>,

    /// Complete tool calls, present only on the final chunk
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,

    /// Whether this is the final chunk
    #[serde(default)]
    pub done: bool,

    /// Usage info (typically only in the final chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// The completion client trait.
///
/// The orchestration loop calls `complete()` and `stream()` without knowing
/// which backend is configured. The stream is lazy, finite, and
/// non-restartable: dropping the receiver is the cancellation signal.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this client (e.g., "openai").
    fn name(&self) -> &str;

    /// The provider's context window in tokens.
    fn context_window(&self) -> usize;

    /// Send a request and get a complete response (the decision call).
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError>;

    /// Send a request and get a stream of response chunks (the answer call).
    async fn stream(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<StreamChunk, ProviderError>>,
        ProviderError,
    >;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_defaults() {
        let req = CompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![],
            temperature: default_temperature(),
            max_tokens: None,
            tools: vec![],
        };
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn tool_definition_serialization() {
        let tool = ToolDefinition {
            name: "get_swimmer_profile".into(),
            description: "Get swimmer profile by ID".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "swimmer_id": { "type": "string", "description": "Swimmer's ID." }
                },
                "required": ["swimmer_id"]
            }),
        };
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("get_swimmer_profile"));
        assert!(json.contains("swimmer_id"));
    }
}
