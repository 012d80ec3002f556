//! Scenario definitions as authored in the catalog

use crate::core::types::ScenarioId;
use crate::metrics::MetricKind;
use serde::{Deserialize, Serialize};

/// Signed metric deltas attached to an option
///
/// `None` means the option does not touch that metric. `Some(0)` is an
/// explicit "no change" and still shows up in the debrief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consequences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_trust: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_resilience: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diplomatic_stability: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<i32>,
}

impl Consequences {
    pub fn get(&self, kind: MetricKind) -> Option<i32> {
        match kind {
            MetricKind::PublicTrust => self.public_trust,
            MetricKind::SystemResilience => self.system_resilience,
            MetricKind::DiplomaticStability => self.diplomatic_stability,
            MetricKind::Budget => self.budget,
        }
    }

    /// Present deltas in evaluation order: trust, resilience, diplomacy, budget
    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, i32)> + '_ {
        MetricKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|delta| (kind, delta)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// A selectable choice within a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOption {
    pub text: String,
    #[serde(default)]
    pub consequences: Consequences,
    #[serde(default)]
    pub feedback: String,
    pub next_scenario: ScenarioId,
}

impl DecisionOption {
    /// Budget delta, when the option spends or earns funds
    pub fn budget_delta(&self) -> Option<i32> {
        self.consequences.budget
    }
}

/// One decision point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Filled in from the catalog key when omitted in the source
    #[serde(default)]
    pub id: ScenarioId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: Vec<DecisionOption>,
}

impl Scenario {
    pub fn option(&self, index: usize) -> Option<&DecisionOption> {
        self.options.get(index)
    }
}
