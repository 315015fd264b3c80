//! A static in-memory `RosterStore` for tests.
//!
//! Holds plain vectors and answers every lookup synchronously. The `seeded()`
//! constructor builds a small club — one coach, one team, two groups, three
//! swimmers (two of them both named Jane) — that the module tests share.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use swimdeck_core::error::LookupError;
use swimdeck_core::roster::{
    Coach, DailyForm, DateFilter, Group, GroupDetails, RosterStore, Swimmer, Team, TeamDetails,
    Training,
};

#[derive(Default)]
pub struct StaticRoster {
    pub coaches: Vec<Coach>,
    pub teams: Vec<Team>,
    pub groups: Vec<Group>,
    pub swimmers: Vec<Swimmer>,
    /// (group_id, swimmer_id) pairs
    pub memberships: Vec<(String, String)>,
    pub trainings: Vec<Training>,
    pub daily_forms: Vec<DailyForm>,
}

fn day(s: &str) -> NaiveDate {
    s.parse().expect("fixture date")
}

impl StaticRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// One coach ("c1", Laura), one team, groups Sharks/Dolphins, swimmers
    /// Jane Doe + Jane Smith (Sharks) and Marco Rossi (Dolphins), a week of
    /// trainings and daily forms.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.coaches.push(Coach {
            id: "c1".into(),
            first_name: "Laura".into(),
            last_name: "Vega".into(),
        });
        store.teams.push(Team {
            id: "t1".into(),
            coach_id: "c1".into(),
            team_code: "SWIM01".into(),
        });
        store.groups.push(Group {
            id: "g1".into(),
            name: "Sharks".into(),
            team_id: "t1".into(),
        });
        store.groups.push(Group {
            id: "g2".into(),
            name: "Dolphins".into(),
            team_id: "t1".into(),
        });
        store.swimmers.push(Swimmer {
            id: "s1".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            birth_date: day("2010-03-14"),
            team_id: Some("t1".into()),
        });
        store.swimmers.push(Swimmer {
            id: "s2".into(),
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            birth_date: day("2011-07-02"),
            team_id: Some("t1".into()),
        });
        store.swimmers.push(Swimmer {
            id: "s3".into(),
            first_name: "Marco".into(),
            last_name: "Rossi".into(),
            birth_date: day("2009-11-30"),
            team_id: Some("t1".into()),
        });
        for (group, swimmer) in [("g1", "s1"), ("g1", "s2"), ("g2", "s3")] {
            store.memberships.push((group.into(), swimmer.into()));
        }
        for (i, (group, date)) in [
            ("g1", "2026-08-17"),
            ("g1", "2026-08-19"),
            ("g2", "2026-08-18"),
            ("g1", "2026-08-21"),
        ]
        .iter()
        .enumerate()
        {
            let d = day(date);
            store.trainings.push(Training {
                id: format!("tr{}", i + 1),
                date: Utc
                    .from_utc_datetime(&d.and_hms_opt(17, 30, 0).expect("fixture time")),
                minutes: 90,
                meters: 3500 + (i as u32) * 200,
                description: Some(format!("Session {}", i + 1)),
                group_id: (*group).into(),
            });
        }
        for (i, date) in ["2026-08-18", "2026-08-19", "2026-08-20"].iter().enumerate() {
            let d = day(date);
            store.daily_forms.push(DailyForm {
                id: format!("df{}", i + 1),
                date: Utc.from_utc_datetime(&d.and_hms_opt(7, 0, 0).expect("fixture time")),
                swimmer_id: "s1".into(),
                sleep_hours: 7.5,
                sleep_quality: 4,
                muscle_pain: 2,
                fatigue: 3,
                stress: (i as u8) + 1,
            });
        }
        store
    }

    fn team(&self, coach_id: &str) -> Result<&Team, LookupError> {
        self.teams
            .iter()
            .find(|t| t.coach_id == coach_id)
            .ok_or_else(|| LookupError::NotFound(format!("Team for coach {coach_id}")))
    }

    fn group_details(&self, group: &Group) -> GroupDetails {
        let swimmers = self
            .memberships
            .iter()
            .filter(|(group_id, _)| *group_id == group.id)
            .filter_map(|(_, swimmer_id)| self.swimmers.iter().find(|s| s.id == *swimmer_id))
            .cloned()
            .collect();
        GroupDetails {
            group: group.clone(),
            swimmers,
        }
    }

    fn filtered_trainings<F>(&self, filter: DateFilter, keep: F) -> Vec<Training>
    where
        F: Fn(&Training) -> bool,
    {
        let mut trainings: Vec<Training> = self
            .trainings
            .iter()
            .filter(|t| keep(t) && filter.matches(t.date))
            .cloned()
            .collect();
        trainings.sort_by(|a, b| b.date.cmp(&a.date));
        trainings
    }
}

#[async_trait]
impl RosterStore for StaticRoster {
    async fn coach(&self, coach_id: &str) -> Result<Coach, LookupError> {
        self.coaches
            .iter()
            .find(|c| c.id == coach_id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("Coach {coach_id}")))
    }

    async fn team_for_coach(&self, coach_id: &str) -> Result<TeamDetails, LookupError> {
        let team = self.team(coach_id)?;
        Ok(TeamDetails {
            team: team.clone(),
            groups: self
                .groups
                .iter()
                .filter(|g| g.team_id == team.id)
                .cloned()
                .collect(),
            swimmers: self
                .swimmers
                .iter()
                .filter(|s| s.team_id.as_deref() == Some(team.id.as_str()))
                .cloned()
                .collect(),
        })
    }

    async fn groups_for_coach(&self, coach_id: &str) -> Result<Vec<GroupDetails>, LookupError> {
        let team = self.team(coach_id)?;
        Ok(self
            .groups
            .iter()
            .filter(|g| g.team_id == team.id)
            .map(|g| self.group_details(g))
            .collect())
    }

    async fn trainings_for_coach(
        &self,
        coach_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Training>, LookupError> {
        let team = self.team(coach_id)?;
        let group_ids: Vec<&str> = self
            .groups
            .iter()
            .filter(|g| g.team_id == team.id)
            .map(|g| g.id.as_str())
            .collect();
        Ok(self.filtered_trainings(filter, |t| group_ids.contains(&t.group_id.as_str())))
    }

    async fn swimmer(&self, swimmer_id: &str) -> Result<Swimmer, LookupError> {
        self.swimmers
            .iter()
            .find(|s| s.id == swimmer_id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("Swimmer {swimmer_id}")))
    }

    async fn swimmers_for_coach(&self, coach_id: &str) -> Result<Vec<Swimmer>, LookupError> {
        let team = self.team(coach_id)?;
        Ok(self
            .swimmers
            .iter()
            .filter(|s| s.team_id.as_deref() == Some(team.id.as_str()))
            .cloned()
            .collect())
    }

    async fn daily_forms(
        &self,
        swimmer_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<DailyForm>, LookupError> {
        let mut forms: Vec<DailyForm> = self
            .daily_forms
            .iter()
            .filter(|f| f.swimmer_id == swimmer_id && filter.matches(f.date))
            .cloned()
            .collect();
        forms.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(forms)
    }

    async fn trainings_for_swimmer(
        &self,
        swimmer_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Training>, LookupError> {
        // Validates the swimmer exists before filtering by their groups
        self.swimmer(swimmer_id).await?;
        let group_ids: Vec<&str> = self
            .memberships
            .iter()
            .filter(|(_, sid)| sid.as_str() == swimmer_id)
            .map(|(gid, _)| gid.as_str())
            .collect();
        Ok(self.filtered_trainings(filter, |t| group_ids.contains(&t.group_id.as_str())))
    }

    async fn group_by_name(
        &self,
        coach_id: &str,
        name: &str,
    ) -> Result<GroupDetails, LookupError> {
        let team = self.team(coach_id)?;
        self.groups
            .iter()
            .find(|g| g.team_id == team.id && g.name.eq_ignore_ascii_case(name))
            .map(|g| self.group_details(g))
            .ok_or_else(|| LookupError::NotFound(format!("Group '{name}'")))
    }

    async fn trainings_for_group(
        &self,
        group_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Training>, LookupError> {
        Ok(self.filtered_trainings(filter, |t| t.group_id == group_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_team_has_full_roster() {
        let store = StaticRoster::seeded();
        let details = store.team_for_coach("c1").await.unwrap();
        assert_eq!(details.groups.len(), 2);
        assert_eq!(details.swimmers.len(), 3);
    }

    #[tokio::test]
    async fn trainings_come_back_newest_first() {
        let store = StaticRoster::seeded();
        let trainings = store.trainings_for_coach("c1", DateFilter::All).await.unwrap();
        assert!(trainings.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[tokio::test]
    async fn unknown_coach_is_not_found() {
        let store = StaticRoster::seeded();
        let err = store.team_for_coach("nobody").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
    }
}
