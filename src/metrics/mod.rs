//! Metric model - the four health trackers of a session
//!
//! Trust, resilience and diplomacy are percentages clamped to [0, 100] on
//! every update. Budget is stored unclamped so it can record debt.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const PERCENT_MIN: i32 = 0;
pub const PERCENT_MAX: i32 = 100;

/// Bound `value` to `[min, max]`
///
/// Returns `min` when the bounds are inverted instead of panicking like
/// `Ord::clamp`.
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    min.max(value.min(max))
}

/// One of the four tracked metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    PublicTrust,
    SystemResilience,
    DiplomaticStability,
    Budget,
}

impl MetricKind {
    /// Evaluation order for consequences and analysis items
    pub const ALL: [MetricKind; 4] = [
        MetricKind::PublicTrust,
        MetricKind::SystemResilience,
        MetricKind::DiplomaticStability,
        MetricKind::Budget,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::PublicTrust => "Public Trust",
            MetricKind::SystemResilience => "System Resilience",
            MetricKind::DiplomaticStability => "Diplomatic Stability",
            MetricKind::Budget => "Budget",
        }
    }

    pub fn is_budget(&self) -> bool {
        matches!(self, MetricKind::Budget)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display band of a metric gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricBand {
    Healthy,
    Strained,
    Critical,
}

/// Current values of all metrics
///
/// Field names serialize in camelCase so a saved session keeps the flat
/// `publicTrust`/`budget` layout of the session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub public_trust: i32,
    pub system_resilience: i32,
    pub diplomatic_stability: i32,
    /// Billions. Negative means debt.
    pub budget: i32,
}

impl Metrics {
    /// Build a metric set, clamping the percentage metrics
    pub fn new(
        public_trust: i32,
        system_resilience: i32,
        diplomatic_stability: i32,
        budget: i32,
    ) -> Self {
        Self {
            public_trust: clamp(public_trust, PERCENT_MIN, PERCENT_MAX),
            system_resilience: clamp(system_resilience, PERCENT_MIN, PERCENT_MAX),
            diplomatic_stability: clamp(diplomatic_stability, PERCENT_MIN, PERCENT_MAX),
            budget,
        }
    }

    pub fn get(&self, kind: MetricKind) -> i32 {
        match kind {
            MetricKind::PublicTrust => self.public_trust,
            MetricKind::SystemResilience => self.system_resilience,
            MetricKind::DiplomaticStability => self.diplomatic_stability,
            MetricKind::Budget => self.budget,
        }
    }

    fn slot_mut(&mut self, kind: MetricKind) -> &mut i32 {
        match kind {
            MetricKind::PublicTrust => &mut self.public_trust,
            MetricKind::SystemResilience => &mut self.system_resilience,
            MetricKind::DiplomaticStability => &mut self.diplomatic_stability,
            MetricKind::Budget => &mut self.budget,
        }
    }

    /// Apply a signed delta and return `(old, new)`
    ///
    /// Percentage metrics are clamped to [0, 100]. Budget is not clamped;
    /// both saturate at the integer range instead of overflowing.
    pub fn apply(&mut self, kind: MetricKind, delta: i32) -> (i32, i32) {
        let slot = self.slot_mut(kind);
        let old = *slot;
        let raw = old.saturating_add(delta);
        *slot = if kind.is_budget() {
            raw
        } else {
            clamp(raw, PERCENT_MIN, PERCENT_MAX)
        };
        (old, *slot)
    }

    /// First percentage metric outside [0, 100], if any
    ///
    /// Values built through `new` or `apply` are always in range; this
    /// catches values decoded from a config file or a saved slot.
    pub fn out_of_range(&self) -> Option<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .filter(|kind| !kind.is_budget())
            .find(|&kind| !(PERCENT_MIN..=PERCENT_MAX).contains(&self.get(kind)))
    }

    /// Budget as seen by floor comparisons: debt counts as zero
    pub fn effective_budget(&self) -> i32 {
        self.budget.max(0)
    }

    /// Whether spending `delta` keeps the budget out of debt
    pub fn can_afford(&self, delta: i32) -> bool {
        self.budget.saturating_add(delta) >= 0
    }

    /// Fill percentage of a metric's gauge
    pub fn gauge_percent(&self, kind: MetricKind, budget_gauge_max: i32) -> i32 {
        let value = self.get(kind) as i64;
        let max = if kind.is_budget() {
            budget_gauge_max.max(1) as i64
        } else {
            PERCENT_MAX as i64
        };
        let percent = (value * 100 / max).clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        clamp(percent, PERCENT_MIN, PERCENT_MAX)
    }

    /// Colour band of a metric gauge
    pub fn band(&self, kind: MetricKind) -> MetricBand {
        let value = self.get(kind);
        if kind.is_budget() {
            if value < 20 {
                MetricBand::Critical
            } else if value < 50 {
                MetricBand::Strained
            } else {
                MetricBand::Healthy
            }
        } else if value >= 70 {
            MetricBand::Healthy
        } else if value >= 40 {
            MetricBand::Strained
        } else {
            MetricBand::Critical
        }
    }
}
