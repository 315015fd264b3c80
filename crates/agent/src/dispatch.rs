//! Tool dispatch — turning a model-requested call into a tool-result string.
//!
//! The dispatcher never fails: every failure mode is encoded in the returned
//! string so the loop can hand it back to the model as a tool result and let
//! the model decide how to respond. Nothing is retried here.

use futures::future::join_all;
use swimdeck_core::error::ToolError;
use swimdeck_core::message::ToolCallRequest;
use swimdeck_core::tool::ToolRegistry;
use tracing::{debug, warn};

/// Execute one tool call on behalf of the given coach.
///
/// Failure modes, in check order:
/// - malformed argument JSON, or a shape the tool's typed arguments reject →
///   `"Error: Invalid arguments for function <name>"`;
/// - unknown tool name → `"Error: Unknown function <name>"`;
/// - handler failure → `"Error executing function <name>: <message>"`.
///
/// On success the handler's value is returned JSON-serialized.
pub async fn dispatch(registry: &ToolRegistry, call: &ToolCallRequest, coach_id: &str) -> String {
    let arguments: serde_json::Value = match serde_json::from_str(&call.arguments) {
        Ok(v) => v,
        Err(e) => {
            warn!(tool = %call.name, error = %e, "Malformed tool call arguments");
            return format!("Error: Invalid arguments for function {}", call.name);
        }
    };

    let Some(tool) = registry.get(&call.name) else {
        warn!(tool = %call.name, "Unknown function called");
        return format!("Error: {}", ToolError::UnknownTool(call.name.clone()));
    };

    debug!(tool = %call.name, call_id = %call.id, "Executing tool call");
    match tool.execute(arguments, coach_id).await {
        Ok(value) => serde_json::to_string(&value)
            .unwrap_or_else(|e| format!("Error executing function {}: {e}", call.name)),
        Err(ToolError::InvalidArguments(reason)) => {
            warn!(tool = %call.name, %reason, "Tool rejected its arguments");
            format!("Error: Invalid arguments for function {}", call.name)
        }
        Err(e) => {
            warn!(tool = %call.name, error = %e, "Tool execution failed");
            format!("Error executing function {}: {e}", call.name)
        }
    }
}

/// Execute all calls of one round concurrently.
///
/// The lookups are independent and read-only, so execution order does not
/// matter; results come back in call order so each can be appended as the
/// tool result for its originating call.
pub async fn dispatch_all(
    registry: &ToolRegistry,
    calls: &[ToolCallRequest],
    coach_id: &str,
) -> Vec<String> {
    join_all(calls.iter().map(|call| dispatch(registry, call, coach_id))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use swimdeck_tools::fixtures::StaticRoster;

    fn registry() -> ToolRegistry {
        swimdeck_tools::catalogue(Arc::new(StaticRoster::seeded()))
    }

    fn call(name: &str, arguments: &str) -> ToolCallRequest {
        ToolCallRequest {
            id: format!("call_{name}"),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    #[tokio::test]
    async fn malformed_arguments_return_fixed_text() {
        let registry = registry();
        let result = dispatch(
            &registry,
            &call("get_swimmer_profile", "{not json"),
            "c1",
        )
        .await;
        assert_eq!(
            result,
            "Error: Invalid arguments for function get_swimmer_profile"
        );
    }

    #[tokio::test]
    async fn missing_required_field_is_an_argument_error() {
        // Valid JSON that the tool's typed arguments reject must read the same
        // as malformed JSON, not as a handler failure.
        let registry = registry();
        let result = dispatch(&registry, &call("get_swimmer_profile", "{}"), "c1").await;
        assert_eq!(
            result,
            "Error: Invalid arguments for function get_swimmer_profile"
        );
    }

    #[tokio::test]
    async fn unknown_function_returns_error_text() {
        let registry = registry();
        let result = dispatch(&registry, &call("get_tide_tables", "{}"), "c1").await;
        assert_eq!(result, "Error: Unknown function get_tide_tables");
    }

    #[tokio::test]
    async fn handler_failure_is_encoded_in_text() {
        let registry = registry();
        let result = dispatch(
            &registry,
            &call("get_swimmer_profile", r#"{"swimmer_id":"nope"}"#),
            "c1",
        )
        .await;
        assert!(result.starts_with("Error executing function get_swimmer_profile: "));
        assert!(result.contains("not found"));
    }

    #[tokio::test]
    async fn success_returns_serialized_json() {
        let registry = registry();
        let result = dispatch(
            &registry,
            &call("get_swimmer_profile", r#"{"swimmer_id":"s1"}"#),
            "c1",
        )
        .await;
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["firstName"], "Jane");
    }

    #[tokio::test]
    async fn fan_out_preserves_call_order() {
        let registry = registry();
        let calls = vec![
            call("get_swimmer_profile", r#"{"swimmer_id":"s1"}"#),
            call("get_tide_tables", "{}"),
            call("get_swimmer_profile", r#"{"swimmer_id":"s3"}"#),
        ];
        let results = dispatch_all(&registry, &calls, "c1").await;
        assert_eq!(results.len(), 3);
        assert!(results[0].contains("Jane"));
        assert_eq!(results[1], "Error: Unknown function get_tide_tables");
        assert!(results[2].contains("Marco"));
    }
}
