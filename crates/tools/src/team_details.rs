//! Team details lookup — the coach's team with groups and full roster.

use async_trait::async_trait;
use std::sync::Arc;
use swimdeck_core::error::ToolError;
use swimdeck_core::roster::RosterStore;
use swimdeck_core::tool::Tool;

pub struct TeamDetailsTool {
    store: Arc<dyn RosterStore>,
}

impl TeamDetailsTool {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for TeamDetailsTool {
    fn name(&self) -> &str {
        "get_coach_team_details"
    }

    fn description(&self) -> &str {
        "Get coach's team details: team info, groups (id, name), and swimmers (id, firstName, lastName, birthDate). For team overview."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        // The coach's identity comes from the request context, not the model.
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn execute(
        &self,
        _arguments: serde_json::Value,
        coach_id: &str,
    ) -> Result<serde_json::Value, ToolError> {
        let details = self.store.team_for_coach(coach_id).await?;
        Ok(serde_json::to_value(details)
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: e.to_string(),
            })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::StaticRoster;

    #[tokio::test]
    async fn returns_team_with_groups_and_swimmers() {
        let tool = TeamDetailsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool.execute(serde_json::json!({}), "c1").await.unwrap();
        assert_eq!(value["teamCode"], "SWIM01");
        assert_eq!(value["groups"].as_array().unwrap().len(), 2);
        assert_eq!(value["swimmers"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_team_surfaces_lookup_error() {
        let tool = TeamDetailsTool::new(Arc::new(StaticRoster::new()));
        let err = tool.execute(serde_json::json!({}), "c1").await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
