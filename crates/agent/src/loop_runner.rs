//! The orchestration loop: decide, execute tools, stream the answer.
//!
//! One `Assistant` instance serves any number of requests; each
//! `handle_prompt` call runs an independent loop with no shared mutable
//! state. The loop alternates decision calls and tool rounds until the model
//! answers in text (streamed to the caller) or requests a chart (returned as
//! a structured directive without streaming).

use std::sync::Arc;

use chrono::Utc;
use swimdeck_config::AppConfig;
use swimdeck_core::chart::{ChartDirective, DISPLAY_CHART};
use swimdeck_core::error::{Error, Result};
use swimdeck_core::message::Message;
use swimdeck_core::provider::{CompletionClient, CompletionRequest};
use swimdeck_core::roster::Coach;
use swimdeck_core::tool::ToolRegistry;
use swimdeck_providers::OpenAiCompatClient;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::context::{assemble, budget};
use crate::{dispatch, relay};

/// Guidance appended before the final streaming call after any tool round.
/// Keeps the model from answering a tool result with another question.
const POST_TOOL_GUIDANCE: &str = "You have already retrieved the data you need \
with the tool calls above. Present that data to the coach directly and \
completely. Do not ask follow-up questions unless the data itself is ambiguous.";

/// The terminal outcome of one request.
#[derive(Debug)]
pub enum Reply {
    /// The answer was streamed in full through the caller's channel.
    Streamed,
    /// The model requested a visualization; nothing was streamed. The caller
    /// renders the directive client-side.
    Chart {
        /// The raw assistant decision message carrying the chart call.
        message: Message,
        /// The parsed chart arguments.
        directive: ChartDirective,
    },
}

/// The coaching assistant: a completion client plus the tool catalogue.
pub struct Assistant {
    client: Arc<dyn CompletionClient>,
    tools: Arc<ToolRegistry>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    max_tool_rounds: u32,
}

impl Assistant {
    /// Create an assistant over an existing client and catalogue.
    pub fn new(
        client: Arc<dyn CompletionClient>,
        tools: Arc<ToolRegistry>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            tools,
            model: model.into(),
            temperature,
            max_tokens: None,
            max_tool_rounds: 8,
        }
    }

    /// Wire up an assistant from configuration, using the OpenAI-compatible
    /// client.
    pub fn from_config(config: &AppConfig, tools: Arc<ToolRegistry>) -> Result<Self> {
        let client = OpenAiCompatClient::from_config(config)?;
        Ok(Self {
            client: Arc::new(client),
            tools,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_tool_rounds: config.max_tool_rounds,
        })
    }

    /// Set the default max tokens per model response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set the ceiling on tool rounds per request.
    pub fn with_max_tool_rounds(mut self, max: u32) -> Self {
        self.max_tool_rounds = max;
        self
    }

    fn request_for(&self, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: budget::prune_to_fit(messages, self.client.context_window()),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools: self.tools.definitions(),
        }
    }

    /// Handle one prompt: either stream the answer through `output` or
    /// return a chart directive without streaming.
    ///
    /// `history` holds the caller's prior turns (user/assistant/tool roles
    /// only); the instruction preamble is prepended here. Provider failures
    /// before streaming begins surface as the returned error; failures
    /// mid-stream are reported inline by the relay.
    pub async fn handle_prompt(
        &self,
        history: &[Message],
        coach: &Coach,
        output: mpsc::Sender<String>,
    ) -> Result<Reply> {
        let mut messages = assemble::assemble(history, coach, Utc::now());
        let mut rounds = 0u32;

        info!(
            coach_id = %coach.id,
            history_len = history.len(),
            "Handling prompt"
        );

        loop {
            let response = self.client.complete(self.request_for(messages.clone())).await?;

            if response.message.tool_calls.is_empty() {
                debug!("No tool call requested, streaming the answer");
                break;
            }

            if let Some(chart_call) = response
                .message
                .tool_calls
                .iter()
                .find(|c| c.name == DISPLAY_CHART)
            {
                if response.message.tool_calls.len() > 1 {
                    warn!(
                        discarded = response.message.tool_calls.len() - 1,
                        "display_chart overrides co-occurring tool calls; discarding the others"
                    );
                }
                let directive: ChartDirective = serde_json::from_str(&chart_call.arguments)?;
                info!(chart_type = ?directive.chart_type, "Chart short-circuit");
                return Ok(Reply::Chart {
                    message: response.message,
                    directive,
                });
            }

            if rounds >= self.max_tool_rounds {
                warn!(
                    rounds,
                    "Max tool rounds reached, forcing a streamed answer"
                );
                break;
            }
            rounds += 1;

            let calls = response.message.tool_calls.clone();
            debug!(round = rounds, tool_count = calls.len(), "Executing tool round");
            messages.push(response.message);

            let results = dispatch::dispatch_all(&self.tools, &calls, &coach.id).await;
            for (call, result) in calls.iter().zip(results) {
                messages.push(Message::tool_result(&call.id, result));
            }
        }

        if rounds > 0 {
            messages.push(Message::system(POST_TOOL_GUIDANCE));
        }

        let upstream = self.client.stream(self.request_for(messages)).await?;
        let outcome = relay::relay(upstream, output).await.map_err(Error::Provider)?;
        debug!(?outcome, "Stream finished");
        Ok(Reply::Streamed)
    }
}
