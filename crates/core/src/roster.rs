//! RosterStore trait — the abstraction over operational data lookups.
//!
//! Rosters, training logs, and wellness forms are owned by an external
//! system; this core only reads them. Every operation is scoped to the
//! authenticated coach and may fail with a `LookupError`, which the
//! dispatcher converts to text for the model rather than aborting the
//! request.

use crate::error::LookupError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub coach_id: String,
    pub team_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub team_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swimmer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub team_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: String,
    pub date: DateTime<Utc>,
    pub minutes: u32,
    pub meters: u32,
    pub description: Option<String>,
    pub group_id: String,
}

/// A daily wellness form. All metrics are numeric self-assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForm {
    pub id: String,
    pub date: DateTime<Utc>,
    pub swimmer_id: String,
    pub sleep_hours: f32,
    pub sleep_quality: u8,
    pub muscle_pain: u8,
    pub fatigue: u8,
    pub stress: u8,
}

/// A coach's team with its groups and roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetails {
    #[serde(flatten)]
    pub team: Team,
    pub groups: Vec<Group>,
    pub swimmers: Vec<Swimmer>,
}

/// A group with its member swimmers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetails {
    #[serde(flatten)]
    pub group: Group,
    pub swimmers: Vec<Swimmer>,
}

/// A date filter for trainings and daily forms.
///
/// Day boundaries are computed in UTC: 00:00:00.000 through 23:59:59.999,
/// both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    /// No filtering — all records.
    #[default]
    All,
    /// Records on a single calendar day.
    On(NaiveDate),
    /// Records within an inclusive start/end day range.
    Between(NaiveDate, NaiveDate),
}

impl DateFilter {
    /// The inclusive UTC instant bounds of this filter, if it has any.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let day_bounds = |start: NaiveDate, end: NaiveDate| {
            let lo = start.and_hms_opt(0, 0, 0)?.and_utc();
            let hi = end.and_hms_milli_opt(23, 59, 59, 999)?.and_utc();
            Some((lo, hi))
        };
        match *self {
            Self::All => None,
            Self::On(day) => day_bounds(day, day),
            Self::Between(start, end) => day_bounds(start, end),
        }
    }

    /// Whether the given instant falls inside this filter.
    pub fn matches(&self, instant: DateTime<Utc>) -> bool {
        match self.bounds() {
            None => true,
            Some((lo, hi)) => instant >= lo && instant <= hi,
        }
    }
}

/// The read-only data collaborator.
///
/// List results come back newest-first; the model is told to re-sort when a
/// chart needs ascending order.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// The authenticated coach's record.
    async fn coach(&self, coach_id: &str) -> Result<Coach, LookupError>;

    /// The coach's team with groups and full roster.
    async fn team_for_coach(&self, coach_id: &str) -> Result<TeamDetails, LookupError>;

    /// The coach's groups, each with member swimmers.
    async fn groups_for_coach(&self, coach_id: &str) -> Result<Vec<GroupDetails>, LookupError>;

    /// Training records for the coach's team, date-filtered.
    async fn trainings_for_coach(
        &self,
        coach_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Training>, LookupError>;

    /// A single swimmer record.
    async fn swimmer(&self, swimmer_id: &str) -> Result<Swimmer, LookupError>;

    /// All swimmers on the coach's team (used by name resolution).
    async fn swimmers_for_coach(&self, coach_id: &str) -> Result<Vec<Swimmer>, LookupError>;

    /// Wellness forms for a swimmer, date-filtered.
    async fn daily_forms(
        &self,
        swimmer_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<DailyForm>, LookupError>;

    /// Training records the swimmer participates in, date-filtered.
    async fn trainings_for_swimmer(
        &self,
        swimmer_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Training>, LookupError>;

    /// A group on the coach's team, resolved by exact name.
    async fn group_by_name(&self, coach_id: &str, name: &str)
    -> Result<GroupDetails, LookupError>;

    /// Training records assigned to a group, date-filtered.
    async fn trainings_for_group(
        &self,
        group_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Training>, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn single_day_bounds_span_whole_utc_day() {
        let (lo, hi) = DateFilter::On(day("2026-08-21")).bounds().unwrap();
        assert_eq!(lo, Utc.with_ymd_and_hms(2026, 8, 21, 0, 0, 0).unwrap());
        assert_eq!(
            hi,
            Utc.with_ymd_and_hms(2026, 8, 21, 23, 59, 59).unwrap()
                + chrono::Duration::milliseconds(999)
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let filter = DateFilter::Between(day("2026-08-01"), day("2026-08-07"));
        assert!(filter.matches(Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()));
        assert!(filter.matches(Utc.with_ymd_and_hms(2026, 8, 7, 23, 59, 59).unwrap()));
        assert!(!filter.matches(Utc.with_ymd_and_hms(2026, 8, 8, 0, 0, 0).unwrap()));
    }

    #[test]
    fn all_filter_matches_everything() {
        assert!(DateFilter::All.bounds().is_none());
        assert!(DateFilter::All.matches(Utc::now()));
    }

    #[test]
    fn records_serialize_camel_case() {
        let swimmer = Swimmer {
            id: "s1".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            birth_date: day("2010-03-14"),
            team_id: Some("t1".into()),
        };
        let json = serde_json::to_string(&swimmer).unwrap();
        assert!(json.contains(r#""firstName":"Jane""#));
        assert!(json.contains(r#""birthDate":"2010-03-14""#));
    }
}
