//! Swimmer daily wellness form lookup, filterable by date.

use crate::args::{self, DateRangeArgs};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use swimdeck_core::error::ToolError;
use swimdeck_core::roster::RosterStore;
use swimdeck_core::tool::Tool;

#[derive(Debug, Deserialize)]
struct SwimmerDailyFormsArgs {
    swimmer_id: String,
    #[serde(flatten)]
    range: DateRangeArgs,
}

pub struct SwimmerDailyFormsTool {
    store: Arc<dyn RosterStore>,
}

impl SwimmerDailyFormsTool {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SwimmerDailyFormsTool {
    fn name(&self) -> &str {
        "get_swimmer_daily_forms"
    }

    fn description(&self) -> &str {
        "Get swimmer daily wellness forms. Returns forms with id, date, swimmerId, and metrics (sleepHours, sleepQuality, musclePain, fatigue, stress - all numeric). For charting wellness trends."
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
                    "description": "Specific date for forms (YYYY-MM-DD)."
                },
                "start_date": {
                    "type": "string",
                    "description": "Start date for form range (YYYY-MM-DD)."
                },
                "end_date": {
                    "type": "string",
                    "description": "End date for form range (YYYY-MM-DD)."
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
        let args: SwimmerDailyFormsArgs = args::parse(arguments)?;
        let forms = self
            .store
            .daily_forms(&args.swimmer_id, args.range.filter()?)
            .await?;
        serde_json::to_value(forms).map_err(|e| ToolError::ExecutionFailed {
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
    async fn returns_all_forms_for_swimmer() {
        let tool = SwimmerDailyFormsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool
            .execute(serde_json::json!({"swimmer_id": "s1"}), "c1")
            .await
            .unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[0]["swimmerId"], "s1");
    }

    #[tokio::test]
    async fn single_day_filter_applies_utc_bounds() {
        let tool = SwimmerDailyFormsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool
            .execute(
                serde_json::json!({"swimmer_id": "s1", "date": "2026-08-19"}),
                "c1",
            )
            .await
            .unwrap();
        let forms = value.as_array().unwrap();
        assert_eq!(forms.len(), 1);
        assert!(forms[0]["date"].as_str().unwrap().starts_with("2026-08-19"));
    }

    #[tokio::test]
    async fn swimmer_without_forms_returns_empty_list() {
        let tool = SwimmerDailyFormsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool
            .execute(serde_json::json!({"swimmer_id": "s2"}), "c1")
            .await
            .unwrap();
        assert!(value.as_array().unwrap().is_empty());
    }
}
