//! The fixed lookup catalogue advertised to the model.
//!
//! One module per tool. Every tool is a read-only lookup scoped to the
//! calling coach; none of them mutates anything or decides control flow.
//! `display_chart` is the odd one out: it is advertised so the model can
//! request a visualization, but the orchestration loop short-circuits on it
//! instead of executing it.

pub mod args;
pub mod display_chart;
pub mod fixtures;
pub mod group_details;
pub mod swimmer_daily_forms;
pub mod swimmer_lookup;
pub mod swimmer_profile;
pub mod swimmer_trainings;
pub mod team_details;
pub mod team_groups;
pub mod team_trainings;

use std::sync::Arc;
use swimdeck_core::roster::RosterStore;
use swimdeck_core::tool::ToolRegistry;

/// Create the full catalogue backed by the given store.
///
/// The registry is static for the process lifetime: the same definitions are
/// advertised on every decision call.
pub fn catalogue(store: Arc<dyn RosterStore>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(team_details::TeamDetailsTool::new(store.clone())));
    registry.register(Box::new(team_groups::TeamGroupsTool::new(store.clone())));
    registry.register(Box::new(team_trainings::TeamTrainingsTool::new(
        store.clone(),
    )));
    registry.register(Box::new(swimmer_profile::SwimmerProfileTool::new(
        store.clone(),
    )));
    registry.register(Box::new(swimmer_daily_forms::SwimmerDailyFormsTool::new(
        store.clone(),
    )));
    registry.register(Box::new(swimmer_trainings::SwimmerTrainingsTool::new(
        store.clone(),
    )));
    registry.register(Box::new(group_details::GroupDetailsTool::new(store.clone())));
    registry.register(Box::new(swimmer_lookup::SwimmerLookupTool::new(store)));
    registry.register(Box::new(display_chart::DisplayChartTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixtures::StaticRoster;

    #[test]
    fn catalogue_contains_all_nine_tools() {
        let registry = catalogue(Arc::new(StaticRoster::seeded()));
        let mut names = registry.names();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "display_chart",
                "get_coach_team_details",
                "get_coach_team_groups_with_swimmers",
                "get_coach_team_trainings",
                "get_group_details",
                "get_swimmer_assigned_trainings",
                "get_swimmer_daily_forms",
                "get_swimmer_id_by_name",
                "get_swimmer_profile",
            ]
        );
    }
}
