//! The visualization directive tool.
//!
//! Advertised to the model like any other catalogue entry, but never
//! executed server-side: the orchestration loop short-circuits when the
//! model calls it and hands the parsed `ChartDirective` to the caller.
//! `execute` still validates and echoes the directive so that a
//! misconfigured loop fails loudly in tests rather than silently charting.

use crate::args;
use async_trait::async_trait;
use swimdeck_core::chart::{ChartDirective, DISPLAY_CHART};
use swimdeck_core::error::ToolError;
use swimdeck_core::tool::Tool;

pub struct DisplayChartTool;

#[async_trait]
impl Tool for DisplayChartTool {
    fn name(&self) -> &str {
        DISPLAY_CHART
    }

    fn description(&self) -> &str {
        "Display a chart to the user. Use when the user explicitly asks for a visualization of data already in context."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        ChartDirective::parameters_schema()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        _coach_id: &str,
    ) -> Result<serde_json::Value, ToolError> {
        let directive: ChartDirective = args::parse(arguments)?;
        serde_json::to_value(directive).map_err(|e| ToolError::ExecutionFailed {
            tool_name: DISPLAY_CHART.into(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validates_and_echoes_directive() {
        let tool = DisplayChartTool;
        let value = tool
            .execute(
                serde_json::json!({
                    "chart_type": "line",
                    "title": "Stress this month",
                    "data": [{"date": "2026-08-18", "stress": 1}],
                    "x_axis_key": "date",
                    "y_axis_keys": ["stress"]
                }),
                "c1",
            )
            .await
            .unwrap();
        assert_eq!(value["chart_type"], "line");
    }

    #[tokio::test]
    async fn rejects_unknown_chart_type() {
        let tool = DisplayChartTool;
        let err = tool
            .execute(
                serde_json::json!({
                    "chart_type": "hologram",
                    "title": "x",
                    "data": [],
                    "x_axis_key": "date",
                    "y_axis_keys": []
                }),
                "c1",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
