//! Chart directive types.
//!
//! When the coach asks for a visualization the model emits a `display_chart`
//! tool call. That call is never executed server-side — the orchestration
//! loop short-circuits and hands the parsed directive straight to the caller,
//! which renders it client-side.

use serde::{Deserialize, Serialize};

/// The tool name the model uses to request a visualization.
pub const DISPLAY_CHART: &str = "display_chart";

/// Supported chart shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Area,
    Radar,
    RadialBar,
    Scatter,
}

/// The structured payload returned on the chart short-circuit path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDirective {
    /// Type of chart to render.
    pub chart_type: ChartType,

    /// Chart title.
    pub title: String,

    /// Data to plot — an array of flat objects.
    pub data: Vec<serde_json::Value>,

    /// Key in the data objects for the x-axis.
    pub x_axis_key: String,

    /// Keys in the data objects for the y-axis values.
    pub y_axis_keys: Vec<String>,
}

impl ChartDirective {
    /// JSON Schema for the `display_chart` tool parameters.
    pub fn parameters_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "chart_type": {
                    "type": "string",
                    "description": "Type of chart (e.g., \"bar\", \"line\", \"pie\").",
                    "enum": ["bar", "line", "pie", "area", "radar", "radialBar", "scatter"]
                },
                "title": {
                    "type": "string",
                    "description": "Chart title."
                },
                "data": {
                    "type": "array",
                    "description": "Data to plot (array of objects).",
                    "items": { "type": "object" }
                },
                "x_axis_key": {
                    "type": "string",
                    "description": "Key in data objects for x-axis."
                },
                "y_axis_keys": {
                    "type": "array",
                    "description": "Keys in data objects for y-axis values.",
                    "items": { "type": "string" }
                }
            },
            "required": ["chart_type", "title", "data", "x_axis_key", "y_axis_keys"]
        })
    }
}
