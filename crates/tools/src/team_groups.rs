//! Team groups lookup — the coach's groups, each with member swimmers.

use async_trait::async_trait;
use std::sync::Arc;
use swimdeck_core::error::ToolError;
use swimdeck_core::roster::RosterStore;
use swimdeck_core::tool::Tool;

pub struct TeamGroupsTool {
    store: Arc<dyn RosterStore>,
}

impl TeamGroupsTool {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for TeamGroupsTool {
    fn name(&self) -> &str {
        "get_coach_team_groups_with_swimmers"
    }

    fn description(&self) -> &str {
        "Get coach's team groups. Returns groups with id, name, teamId, and a swimmers array (id, firstName, lastName, birthDate). For group member analysis."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn execute(
        &self,
        _arguments: serde_json::Value,
        coach_id: &str,
    ) -> Result<serde_json::Value, ToolError> {
        let groups = self.store.groups_for_coach(coach_id).await?;
        serde_json::to_value(groups).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().into(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::StaticRoster;

    #[tokio::test]
    async fn groups_include_member_swimmers() {
        let tool = TeamGroupsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool.execute(serde_json::json!({}), "c1").await.unwrap();
        let groups = value.as_array().unwrap();
        assert_eq!(groups.len(), 2);
        let sharks = groups.iter().find(|g| g["name"] == "Sharks").unwrap();
        assert_eq!(sharks["swimmers"].as_array().unwrap().len(), 2);
    }
}
