//! OpenAI-compatible completion client.
//!
//! Speaks the `/v1/chat/completions` protocol in two modes:
//! - non-streaming — the orchestration loop's decision calls
//! - streaming SSE — the final answer call, relayed chunk by chunk
//!
//! Tool calls arrive incrementally during streaming and are accumulated by
//! index until the stream finishes. Nothing is retried here: failures are
//! surfaced to the loop, which decides what the caller sees.

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use swimdeck_config::AppConfig;
use swimdeck_core::error::ProviderError;
use swimdeck_core::message::{Message, Role, ToolCallRequest};
use swimdeck_core::provider::{
    CompletionClient, CompletionRequest, CompletionResponse, StreamChunk, ToolDefinition, Usage,
};
use tracing::{debug, trace, warn};

/// A completion client for any OpenAI-compatible endpoint.
pub struct OpenAiCompatClient {
    base_url: String,
    api_key: String,
    context_window: usize,
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// Build a client from configuration. Fails if no API key is set.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ProviderError::NotConfigured("API key is not set".into()))?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            context_window: config.context_window,
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body(request: &CompletionRequest, stream: bool) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_wire_messages(&request.messages),
            "temperature": request.temperature,
            "stream": stream,
        });
        if stream {
            body["stream_options"] = serde_json::json!({ "include_usage": true });
        }
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_wire_tools(&request.tools));
        }
        body
    }

    /// Convert our Message types to the wire format.
    fn to_wire_messages(messages: &[Message]) -> Vec<WireMessage> {
        messages
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                    Role::System => "system".into(),
                    Role::Tool => "tool".into(),
                },
                content: m.content.clone(),
                tool_calls: if m.tool_calls.is_empty() {
                    None
                } else {
                    Some(
                        m.tool_calls
                            .iter()
                            .map(|tc| WireToolCall {
                                id: tc.id.clone(),
                                r#type: "function".into(),
                                function: WireFunction {
                                    name: tc.name.clone(),
                                    arguments: tc.arguments.clone(),
                                },
                            })
                            .collect(),
                    )
                },
                tool_call_id: m.tool_call_id.clone(),
            })
            .collect()
    }

    fn to_wire_tools(tools: &[ToolDefinition]) -> Vec<WireToolDefinition> {
        tools
            .iter()
            .map(|t| WireToolDefinition {
                r#type: "function".into(),
                function: WireToolSchema {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.parameters.clone(),
                },
            })
            .collect()
    }

    /// Map a non-200 response to a ProviderError, consuming its body.
    async fn error_for_status(status: u16, response: reqwest::Response) -> ProviderError {
        match status {
            429 => ProviderError::RateLimited {
                retry_after_secs: 5,
            },
            401 | 403 => ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ),
            _ => {
                let body = response.text().await.unwrap_or_default();
                warn!(status, body = %body, "Provider returned error");
                ProviderError::ApiError {
                    status_code: status,
                    message: body,
                }
            }
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn context_window(&self) -> usize {
        self.context_window
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError> {
        debug!(model = %request.model, messages = request.messages.len(), "Sending decision request");

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&Self::request_body(&request, false))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Self::error_for_status(status, response).await);
        }

        let wire: WireResponse = response.json().await.map_err(|e| ProviderError::ApiError {
            status_code: 200,
            message: format!("Failed to parse response: {e}"),
        })?;

        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 200,
                message: "No choices in response".into(),
            })?;

        let tool_calls: Vec<ToolCallRequest> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCallRequest {
                id: tc.id,
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect();

        let message = Message {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: choice.message.content,
            tool_calls,
            tool_call_id: None,
            timestamp: chrono::Utc::now(),
        };

        let usage = wire.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(CompletionResponse {
            message,
            usage,
            model: wire.model,
        })
    }

    async fn stream(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<StreamChunk, ProviderError>>,
        ProviderError,
    > {
        debug!(model = %request.model, messages = request.messages.len(), "Sending streaming request");

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&Self::request_body(&request, true))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Self::error_for_status(status, response).await);
        }

        let (tx, rx) = tokio::sync::mpsc::channel(64);

        // Read the SSE byte stream and parse chunks in a background task.
        // Receiver drop ends the task at the next send.
        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();
            let mut accumulators: std::collections::BTreeMap<u32, ToolCallAccumulator> =
                std::collections::BTreeMap::new();

            while let Some(chunk_result) = byte_stream.next().await {
                let bytes = match chunk_result {
                    Ok(b) => b,
                    Err(e) => {
                        let _ = tx
                            .send(Err(ProviderError::StreamInterrupted(e.to_string())))
                            .await;
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));

                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim_end_matches('\r').to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }
                    let Some(data) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    let data = data.trim();

                    if data == "[DONE]" {
                        let _ = tx
                            .send(Ok(StreamChunk {
                                content: None,
                                tool_calls: drain_accumulators(&mut accumulators),
                                done: true,
                                usage: None,
                            }))
                            .await;
                        return;
                    }

                    let sse: SseChunk = match serde_json::from_str(data) {
                        Ok(parsed) => parsed,
                        Err(e) => {
                            trace!(data = %data, error = %e, "Ignoring unparseable SSE chunk");
                            continue;
                        }
                    };

                    if let Some(choice) = sse.choices.first() {
                        if let Some(ref deltas) = choice.delta.tool_calls {
                            for delta in deltas {
                                let acc = accumulators.entry(delta.index).or_default();
                                if let Some(ref id) = delta.id {
                                    acc.id = id.clone();
                                }
                                if let Some(ref func) = delta.function {
                                    if let Some(ref name) = func.name {
                                        acc.name = name.clone();
                                    }
                                    if let Some(ref args) = func.arguments {
                                        acc.arguments.push_str(args);
                                    }
                                }
                            }
                        }

                        let has_content = choice.delta.content.as_ref().is_some_and(|c| !c.is_empty());
                        if has_content || choice.finish_reason.is_some() {
                            let chunk = StreamChunk {
                                content: choice.delta.content.clone(),
                                tool_calls: Vec::new(),
                                done: false,
                                usage: None,
                            };
                            if tx.send(Ok(chunk)).await.is_err() {
                                return; // receiver dropped — stop consuming upstream
                            }
                        }
                    }

                    // Usage arrives in a trailing chunk when stream_options is set
                    if let Some(usage) = sse.usage {
                        let _ = tx
                            .send(Ok(StreamChunk {
                                content: None,
                                tool_calls: drain_accumulators(&mut accumulators),
                                done: true,
                                usage: Some(Usage {
                                    prompt_tokens: usage.prompt_tokens,
                                    completion_tokens: usage.completion_tokens,
                                    total_tokens: usage.total_tokens,
                                }),
                            }))
                            .await;
                        return;
                    }
                }
            }

            // Stream ended without [DONE]
            let _ = tx
                .send(Ok(StreamChunk {
                    content: None,
                    tool_calls: drain_accumulators(&mut accumulators),
                    done: true,
                    usage: None,
                }))
                .await;
        });

        Ok(rx)
    }
}

// --- Wire types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    // Present-but-null for assistant messages that only carry tool calls
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    r#type: String,
    function: WireFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct WireToolDefinition {
    r#type: String,
    function: WireToolSchema,
}

#[derive(Debug, Serialize)]
struct WireToolSchema {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// --- Streaming SSE types ---

/// A single SSE `data: {...}` chunk from a streaming response.
#[derive(Debug, Deserialize)]
struct SseChunk {
    #[serde(default)]
    choices: Vec<SseChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct SseChoice {
    delta: SseDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SseDelta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<SseToolCallDelta>>,
}

/// A tool call delta — arrives incrementally across chunks.
#[derive(Debug, Deserialize)]
struct SseToolCallDelta {
    index: u32,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    function: Option<SseFunctionDelta>,
}

#[derive(Debug, Deserialize)]
struct SseFunctionDelta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

/// Accumulates incremental tool call deltas into a complete tool call.
#[derive(Default)]
struct ToolCallAccumulator {
    id: String,
    name: String,
    arguments: String,
}

/// Ordered by delta index, so parallel calls keep the model's call order.
fn drain_accumulators(
    accumulators: &mut std::collections::BTreeMap<u32, ToolCallAccumulator>,
) -> Vec<ToolCallRequest> {
    std::mem::take(accumulators)
        .into_values()
        .map(|acc| ToolCallRequest {
            id: acc.id,
            name: acc.name,
            arguments: acc.arguments,
        })
        .collect()
}
