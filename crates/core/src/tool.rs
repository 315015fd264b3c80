//! Tool trait — the abstraction over the lookup catalogue.
//!
//! Every catalogue entry (team details, trainings, daily forms, …) is a pure
//! read: given parsed arguments and the authenticated coach it returns a
//! JSON-serializable value or fails. Handlers never decide control flow —
//! continuing or stopping the loop belongs to the orchestrator.

use crate::error::ToolError;
use crate::provider::ToolDefinition;
use async_trait::async_trait;
use std::collections::HashMap;

/// The core Tool trait.
///
/// Each lookup implements this trait and is registered in the ToolRegistry,
/// which the orchestration loop advertises to the model on every decision
/// call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "get_team_details").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the model).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with parsed arguments, scoped to the calling coach.
    async fn execute(
        &self,
        arguments: serde_json::Value,
        coach_id: &str,
    ) -> std::result::Result<serde_json::Value, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the model.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A registry of available tools.
///
/// The orchestration loop uses this to:
/// 1. Get tool definitions to advertise to the model
/// 2. Look up handlers when the model requests them
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Get all tool definitions (for sending to the model).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_definition()).collect()
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
