//! Trainings a swimmer participates in, filterable by date.

use crate::args::{self, DateRangeArgs};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use swimdeck_core::error::ToolError;
use swimdeck_core::roster::RosterStore;
use swimdeck_core::tool::Tool;

#[derive(Debug, Deserialize)]
struct SwimmerTrainingsArgs {
    swimmer_id: String,
    #[serde(flatten)]
    range: DateRangeArgs,
}

pub struct SwimmerTrainingsTool {
    store: Arc<dyn RosterStore>,
}

impl SwimmerTrainingsTool {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SwimmerTrainingsTool {
    fn name(&self) -> &str {
        "get_swimmer_assigned_trainings"
    }

    fn description(&self) -> &str {
        "Get swimmer's assigned/participated trainings, filterable by date. Returns trainings with id, date, minutes, meters, description, groupId. For charting individual training load."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "swimmer_id": {
                    "type": "string",
                    "description": "Swimmer's ID."
                },
                "date": {
                    "type": "string",
                    "description": "Specific date for trainings (YYYY-MM-DD)."
                },
                "start_date": {
                    "type": "string",
                    "description": "Start date for training range (YYYY-MM-DD)."
                },
                "end_date": {
                    "type": "string",
                    "description": "End date for training range (YYYY-MM-DD)."
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
        let args: SwimmerTrainingsArgs = args::parse(arguments)?;
        let trainings = self
            .store
            .trainings_for_swimmer(&args.swimmer_id, args.range.filter()?)
            .await?;
        serde_json::to_value(trainings).map_err(|e| ToolError::ExecutionFailed {
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
    async fn returns_only_own_group_trainings() {
        let tool = SwimmerTrainingsTool::new(Arc::new(StaticRoster::seeded()));
        // s3 swims with the Dolphins (g2), who trained once
        let value = tool
            .execute(serde_json::json!({"swimmer_id": "s3"}), "c1")
            .await
            .unwrap();
        let trainings = value.as_array().unwrap();
        assert_eq!(trainings.len(), 1);
        assert_eq!(trainings[0]["groupId"], "g2");
    }

    #[tokio::test]
    async fn range_filter_narrows_results() {
        let tool = SwimmerTrainingsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool
            .execute(
                serde_json::json!({
                    "swimmer_id": "s1",
                    "start_date": "2026-08-19",
                    "end_date": "2026-08-21"
                }),
                "c1",
            )
            .await
            .unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }
}
