//! Message domain types.
//!
//! A conversation is an ordered sequence of Messages. The sequence is built
//! fresh per request, mutated only by appending (assistant decisions, tool
//! results, final-call guidance), and discarded when the request completes.
//! No cross-request state lives in these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The coach talking to the assistant
    User,
    /// The AI assistant
    Assistant,
    /// Instruction preamble (persona, rules)
    System,
    /// Tool execution result
    Tool,
}

/// A single message in a conversation.
///
/// `content` is optional because an assistant message that only carries tool
/// calls has no text on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content, if any
    pub content: Option<String>,

    /// Tool calls requested by the assistant (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,

    /// If this is a tool result, which tool call it responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, Some(content.into()))
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, Some(content.into()))
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, Some(content.into()))
    }

    /// Create a tool result message.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        let mut msg = Self::new(Role::Tool, Some(content.into()));
        msg.tool_call_id = Some(tool_call_id.into());
        msg
    }

    /// The text content, or the empty string if there is none.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// A tool call embedded in an assistant message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Unique ID for this tool call
    pub id: String,

    /// Name of the tool to invoke
    pub name: String,

    /// Arguments as a JSON string (exactly as the model produced them)
    pub arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("How did the Sharks train last week?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text(), "How did the Sharks train last week?");
        assert!(msg.tool_calls.is_empty());
    }

    #[test]
    fn tool_result_carries_call_id() {
        let msg = Message::tool_result("call_1", r#"{"trainings":[]}"#);
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn text_of_contentless_message_is_empty() {
        let mut msg = Message::assistant("");
        msg.content = None;
        assert_eq!(msg.text(), "");
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user("Test message");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.text(), "Test message");
        assert_eq!(deserialized.role, Role::User);
    }
}
