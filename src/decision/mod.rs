//! Decision engine - applies a chosen option to the game state
//!
//! `apply_decision` is pure: it returns a new state and never touches
//! storage. The controller decides when to persist.

use crate::catalog::DecisionOption;
use crate::core::types::ScenarioId;
use crate::metrics::{MetricKind, Metrics};
use crate::session::GameState;
use serde::Serialize;

/// One metric change shown in the debrief
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisItem {
    pub metric: MetricKind,
    pub label: &'static str,
    pub delta: i32,
    pub old_value: i32,
    pub new_value: i32,
    pub is_budget: bool,
}

/// Everything a decision produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub state: GameState,
    /// Ordered trust, resilience, diplomacy, budget; only present consequences
    pub analysis: Vec<AnalysisItem>,
    pub next_scenario: ScenarioId,
}

/// Apply `option` to `state`
///
/// Every present consequence is applied and recorded, including explicit
/// zeros. The next scenario id is fixed before the mission counter moves.
pub fn apply_decision(state: &GameState, option: &DecisionOption) -> DecisionOutcome {
    let mut next_state = state.clone();
    let mut analysis = Vec::with_capacity(4);

    for (metric, delta) in option.consequences.iter() {
        let (old_value, new_value) = next_state.metrics.apply(metric, delta);
        tracing::debug!("{}: {} -> {} ({:+})", metric, old_value, new_value, delta);
        analysis.push(AnalysisItem {
            metric,
            label: metric.label(),
            delta,
            old_value,
            new_value,
            is_budget: metric.is_budget(),
        });
    }

    let next_scenario = option.next_scenario.clone();

    next_state.mission_number = next_state.mission_number.saturating_add(1);
    next_state.current_scenario = Some(next_scenario.clone());

    DecisionOutcome {
        state: next_state,
        analysis,
        next_scenario,
    }
}

/// Advisory funds check: false when the option would push the budget below zero
///
/// Not enforced by `apply_decision`; the presentation layer uses it to
/// disable options.
pub fn is_affordable(metrics: &Metrics, option: &DecisionOption) -> bool {
    option
        .budget_delta()
        .map_or(true, |delta| metrics.can_afford(delta))
}
