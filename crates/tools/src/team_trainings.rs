//! Team trainings lookup, filterable by date or date range.

use crate::args::{self, DateRangeArgs};
use async_trait::async_trait;
use std::sync::Arc;
use swimdeck_core::error::ToolError;
use swimdeck_core::roster::RosterStore;
use swimdeck_core::tool::Tool;

pub struct TeamTrainingsTool {
    store: Arc<dyn RosterStore>,
}

impl TeamTrainingsTool {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for TeamTrainingsTool {
    fn name(&self) -> &str {
        "get_coach_team_trainings"
    }

    fn description(&self) -> &str {
        "Get coach's team trainings, filterable by date or date range. Returns trainings with id, date, minutes, meters, description, groupId. For charting training volume."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "date": {
                    "type": "string",
                    "description": "Specific date (YYYY-MM-DD)."
                },
                "startDate": {
                    "type": "string",
                    "description": "Start date of range (YYYY-MM-DD)."
                },
                "endDate": {
                    "type": "string",
                    "description": "End date of range (YYYY-MM-DD)."
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        coach_id: &str,
    ) -> Result<serde_json::Value, ToolError> {
        let args: DateRangeArgs = args::parse(arguments)?;
        let trainings = self
            .store
            .trainings_for_coach(coach_id, args.filter()?)
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
    async fn unfiltered_returns_all_team_trainings() {
        let tool = TeamTrainingsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool.execute(serde_json::json!({}), "c1").await.unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn camel_case_range_filters_by_day() {
        let tool = TeamTrainingsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool
            .execute(
                serde_json::json!({"startDate": "2026-08-17", "endDate": "2026-08-18"}),
                "c1",
            )
            .await
            .unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn bad_date_is_invalid_arguments() {
        let tool = TeamTrainingsTool::new(Arc::new(StaticRoster::seeded()));
        let err = tool
            .execute(serde_json::json!({"date": "yesterday"}), "c1")
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
