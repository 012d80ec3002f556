//! System status derived from the current metrics

use crate::core::config::StatusThresholds;
use crate::metrics::Metrics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall health classification, least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemStatus {
    Nominal,
    InstabilityWarning,
    CompleteDisaster,
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemStatus::Nominal => write!(f, "NOMINAL"),
            SystemStatus::InstabilityWarning => write!(f, "INSTABILITY WARNING"),
            SystemStatus::CompleteDisaster => write!(f, "COMPLETE DISASTER"),
        }
    }
}

/// Classify metrics with the default thresholds
pub fn derive_status(metrics: &Metrics) -> SystemStatus {
    derive_status_with(metrics, &StatusThresholds::default())
}

/// Classify metrics against explicit thresholds
///
/// The disaster check runs after the warning check and overrides it.
pub fn derive_status_with(metrics: &Metrics, thresholds: &StatusThresholds) -> SystemStatus {
    let percentages = [
        metrics.public_trust,
        metrics.system_resilience,
        metrics.diplomatic_stability,
    ];

    let mut status = SystemStatus::Nominal;

    if percentages.iter().any(|&v| v < thresholds.warning_floor)
        || metrics.budget < thresholds.budget_warning
    {
        status = SystemStatus::InstabilityWarning;
    }

    if percentages.iter().any(|&v| v < thresholds.disaster_floor)
        || metrics.budget <= thresholds.budget_floor
    {
        status = SystemStatus::CompleteDisaster;
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_low_metric_is_disaster() {
        let metrics = Metrics::new(10, 90, 90, 90);
        assert_eq!(derive_status(&metrics), SystemStatus::CompleteDisaster);
    }

    #[test]
    fn test_low_budget_alone_warns() {
        let metrics = Metrics::new(50, 50, 50, 25);
        assert_eq!(derive_status(&metrics), SystemStatus::InstabilityWarning);
    }

    #[test]
    fn test_zero_budget_is_disaster() {
        assert_eq!(
            derive_status(&Metrics::new(90, 90, 90, 0)),
            SystemStatus::CompleteDisaster
        );
        assert_eq!(
            derive_status(&Metrics::new(90, 90, 90, -10)),
            SystemStatus::CompleteDisaster
        );
    }

    #[test]
    fn test_nominal() {
        assert_eq!(derive_status(&Metrics::new(40, 40, 40, 30)), SystemStatus::Nominal);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(
            derive_status(&Metrics::new(39, 90, 90, 90)),
            SystemStatus::InstabilityWarning
        );
        assert_eq!(
            derive_status(&Metrics::new(15, 90, 90, 90)),
            SystemStatus::InstabilityWarning
        );
        assert_eq!(
            derive_status(&Metrics::new(90, 90, 14, 90)),
            SystemStatus::CompleteDisaster
        );
        assert_eq!(derive_status(&Metrics::new(90, 90, 90, 1)), SystemStatus::InstabilityWarning);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = StatusThresholds {
            disaster_floor: 5,
            warning_floor: 20,
            budget_warning: 10,
            budget_floor: -50,
        };
        let metrics = Metrics::new(30, 30, 30, -20);
        assert_eq!(derive_status_with(&metrics, &thresholds), SystemStatus::InstabilityWarning);
    }

    #[test]
    fn test_display() {
        assert_eq!(SystemStatus::InstabilityWarning.to_string(), "INSTABILITY WARNING");
        assert!(SystemStatus::CompleteDisaster > SystemStatus::Nominal);
    }
}
