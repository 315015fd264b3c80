//! Group details lookup — a group resolved by name, with its trainings.

use crate::args;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use swimdeck_core::error::ToolError;
use swimdeck_core::roster::{DateFilter, RosterStore};
use swimdeck_core::tool::Tool;

#[derive(Debug, Deserialize)]
struct GroupDetailsArgs {
    group_name: String,
    #[serde(default)]
    trainings_start_date: Option<NaiveDate>,
    #[serde(default)]
    trainings_end_date: Option<NaiveDate>,
}

impl GroupDetailsArgs {
    fn trainings_filter(&self) -> Result<DateFilter, ToolError> {
        match (self.trainings_start_date, self.trainings_end_date) {
            (Some(start), Some(end)) => Ok(DateFilter::Between(start, end)),
            (None, None) => Ok(DateFilter::All),
            _ => Err(ToolError::InvalidArguments(
                "a trainings date range requires both trainings_start_date and trainings_end_date"
                    .into(),
            )),
        }
    }
}

pub struct GroupDetailsTool {
    store: Arc<dyn RosterStore>,
}

impl GroupDetailsTool {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GroupDetailsTool {
    fn name(&self) -> &str {
        "get_group_details"
    }

    fn description(&self) -> &str {
        "Get group details by its name: id, name, teamId, memberSwimmers (id, firstName, lastName, birthDate), assignedTrainings (id, date, minutes, meters, description). The group name is resolved to an ID using the coach's context. For group analysis."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "group_name": {
                    "type": "string",
                    "description": "The name of the group (e.g., 'Alevines')."
                },
                "trainings_start_date": {
                    "type": "string",
                    "description": "Optional. Start date (YYYY-MM-DD) to filter group trainings."
                },
                "trainings_end_date": {
                    "type": "string",
                    "description": "Optional. End date (YYYY-MM-DD) to filter group trainings."
                }
            },
            "required": ["group_name"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        coach_id: &str,
    ) -> Result<serde_json::Value, ToolError> {
        let args: GroupDetailsArgs = args::parse(arguments)?;
        let filter = args.trainings_filter()?;

        let details = self.store.group_by_name(coach_id, &args.group_name).await?;
        let trainings = self
            .store
            .trainings_for_group(&details.group.id, filter)
            .await?;

        Ok(serde_json::json!({
            "id": details.group.id,
            "name": details.group.name,
            "teamId": details.group.team_id,
            "memberSwimmers": details.swimmers,
            "assignedTrainings": trainings,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::StaticRoster;

    #[tokio::test]
    async fn resolves_group_by_name_with_trainings() {
        let tool = GroupDetailsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool
            .execute(serde_json::json!({"group_name": "Sharks"}), "c1")
            .await
            .unwrap();
        assert_eq!(value["id"], "g1");
        assert_eq!(value["memberSwimmers"].as_array().unwrap().len(), 2);
        assert_eq!(value["assignedTrainings"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn name_match_is_case_insensitive() {
        let tool = GroupDetailsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool
            .execute(serde_json::json!({"group_name": "sharks"}), "c1")
            .await
            .unwrap();
        assert_eq!(value["name"], "Sharks");
    }

    #[tokio::test]
    async fn trainings_range_filters_sessions() {
        let tool = GroupDetailsTool::new(Arc::new(StaticRoster::seeded()));
        let value = tool
            .execute(
                serde_json::json!({
                    "group_name": "Sharks",
                    "trainings_start_date": "2026-08-20",
                    "trainings_end_date": "2026-08-22"
                }),
                "c1",
            )
            .await
            .unwrap();
        assert_eq!(value["assignedTrainings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_group_surfaces_not_found() {
        let tool = GroupDetailsTool::new(Arc::new(StaticRoster::seeded()));
        let err = tool
            .execute(serde_json::json!({"group_name": "Orcas"}), "c1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Group 'Orcas' not found");
    }
}
