//! Typed argument structs shared across the catalogue.
//!
//! Every tool parses its arguments into a typed struct before touching the
//! store; a shape mismatch is an argument error, never a handler failure.

use chrono::NaiveDate;
use serde::Deserialize;
use swimdeck_core::error::ToolError;
use swimdeck_core::roster::DateFilter;

/// The `date` / `start_date`+`end_date` argument trio.
///
/// The team-trainings tool advertises these as camelCase (`startDate`,
/// `endDate`), the swimmer tools as snake_case; aliases accept both.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeArgs {
    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(default, alias = "startDate")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, alias = "endDate")]
    pub end_date: Option<NaiveDate>,
}

impl DateRangeArgs {
    /// Resolve into a `DateFilter`.
    ///
    /// A single `date` wins over a range. A range needs both bounds; a lone
    /// bound is a malformed request.
    pub fn filter(&self) -> Result<DateFilter, ToolError> {
        match (self.date, self.start_date, self.end_date) {
            (Some(day), _, _) => Ok(DateFilter::On(day)),
            (None, Some(start), Some(end)) => Ok(DateFilter::Between(start, end)),
            (None, None, None) => Ok(DateFilter::All),
            _ => Err(ToolError::InvalidArguments(
                "a date range requires both start_date and end_date".into(),
            )),
        }
    }
}

/// Parse raw argument JSON into a typed struct.
pub fn parse<T: serde::de::DeserializeOwned>(
    arguments: serde_json::Value,
) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}
