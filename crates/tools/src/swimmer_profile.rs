//! Swimmer profile lookup.

use crate::args;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use swimdeck_core::error::ToolError;
use swimdeck_core::roster::RosterStore;
use swimdeck_core::tool::Tool;

#[derive(Debug, Deserialize)]
struct SwimmerProfileArgs {
    swimmer_id: String,
}

pub struct SwimmerProfileTool {
    store: Arc<dyn RosterStore>,
}

impl SwimmerProfileTool {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SwimmerProfileTool {
    fn name(&self) -> &str {
        "get_swimmer_profile"
    }

    fn description(&self) -> &str {
        "Get swimmer profile: id, firstName, lastName, birthDate, teamId. For basic swimmer info."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "swimmer_id": {
                    "type": "string",
                    "description": "Swimmer's ID."
                }
            },
            "required": ["swimmer_id"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        _coach_id: &str,
    ) -> Result<serde_json::Value, ToolError> {
        let args: SwimmerProfileArgs = args::parse(arguments)?;
        let swimmer = self.store.swimmer(&args.swimmer_id).await?;
        serde_json::to_value(swimmer).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().into(),
            reason: e.to_string(),
        })
    }
}
