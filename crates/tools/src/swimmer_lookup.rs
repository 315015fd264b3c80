//! Fuzzy swimmer name → id resolution.
//!
//! Matches the provided text case-insensitively as a substring against each
//! roster swimmer's first name, last name, and "first last" concatenation.
//! Zero matches and multiple matches are *valid results* the model is
//! expected to act on (report or ask for clarification), never errors.

use crate::args;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use swimdeck_core::error::ToolError;
use swimdeck_core::roster::{RosterStore, Swimmer};
use swimdeck_core::tool::Tool;

#[derive(Debug, Deserialize)]
struct SwimmerLookupArgs {
    swimmer_name: String,
}

pub struct SwimmerLookupTool {
    store: Arc<dyn RosterStore>,
}

impl SwimmerLookupTool {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }

    fn matches(swimmer: &Swimmer, needle: &str) -> bool {
        let full = format!("{} {}", swimmer.first_name, swimmer.last_name).to_lowercase();
        swimmer.first_name.to_lowercase().contains(needle)
            || swimmer.last_name.to_lowercase().contains(needle)
            || full.contains(needle)
    }

    fn full_name(swimmer: &Swimmer) -> String {
        format!("{} {}", swimmer.first_name, swimmer.last_name)
    }
}

#[async_trait]
impl Tool for SwimmerLookupTool {
    fn name(&self) -> &str {
        "get_swimmer_id_by_name"
    }

    fn description(&self) -> &str {
        "Resolve swimmer's name (full/partial) to their ID. Use if user provides name instead of ID for other functions."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "swimmer_name": {
                    "type": "string",
                    "description": "Full or partial swimmer name (e.g., 'Jane Doe' or 'Jane')."
                }
            },
            "required": ["swimmer_name"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        coach_id: &str,
    ) -> Result<serde_json::Value, ToolError> {
        let lookup_args: SwimmerLookupArgs = args::parse(arguments)?;
        let needle = lookup_args.swimmer_name.trim().to_lowercase();
        if needle.is_empty() {
            return Err(ToolError::InvalidArguments(
                "swimmer_name must not be empty".into(),
            ));
        }

        let roster = self.store.swimmers_for_coach(coach_id).await?;
        let matching: Vec<&Swimmer> = roster
            .iter()
            .filter(|s| Self::matches(s, &needle))
            .collect();

        Ok(match matching.as_slice() {
            [] => serde_json::json!({
                "found": false,
                "message": format!(
                    "No swimmer found matching name '{}'",
                    lookup_args.swimmer_name
                ),
            }),
            [swimmer] => serde_json::json!({
                "swimmer_id": swimmer.id,
                "swimmer_name": Self::full_name(swimmer),
            }),
            several => {
                tracing::debug!(
                    candidates = several.len(),
                    "Ambiguous swimmer name, asking for clarification"
                );
                serde_json::json!({
                "clarification_needed": true,
                "message": format!(
                    "Multiple swimmers match name '{}'. Ask the user which one they mean.",
                    lookup_args.swimmer_name
                ),
                "matching_swimmers": several
                    .iter()
                    .map(|s| serde_json::json!({
                        "swimmer_id": s.id,
                        "swimmer_name": Self::full_name(s),
                    }))
                    .collect::<Vec<_>>(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::StaticRoster;

    fn tool() -> SwimmerLookupTool {
        SwimmerLookupTool::new(Arc::new(StaticRoster::seeded()))
    }

    #[tokio::test]
    async fn unique_match_returns_id() {
        let value = tool()
            .execute(serde_json::json!({"swimmer_name": "Marco"}), "c1")
            .await
            .unwrap();
        assert_eq!(value["swimmer_id"], "s3");
        assert_eq!(value["swimmer_name"], "Marco Rossi");
    }

    #[tokio::test]
    async fn full_name_disambiguates() {
        let value = tool()
            .execute(serde_json::json!({"swimmer_name": "jane doe"}), "c1")
            .await
            .unwrap();
        assert_eq!(value["swimmer_id"], "s1");
    }

    #[tokio::test]
    async fn multiple_matches_request_clarification() {
        let value = tool()
            .execute(serde_json::json!({"swimmer_name": "Jane"}), "c1")
            .await
            .unwrap();
        assert_eq!(value["clarification_needed"], true);
        assert_eq!(value["matching_swimmers"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn no_match_is_a_result_not_an_error() {
        let value = tool()
            .execute(serde_json::json!({"swimmer_name": "Zelda"}), "c1")
            .await
            .unwrap();
        assert_eq!(value["found"], false);
    }

    #[tokio::test]
    async fn empty_name_is_invalid_arguments() {
        let err = tool()
            .execute(serde_json::json!({"swimmer_name": "  "}), "c1")
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
