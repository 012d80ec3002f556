//! Simulation configuration with documented constants
//!
//! Every tunable number of the simulation lives here. Values can be
//! overridden from a TOML file; missing sections fall back to defaults.

use crate::core::error::{MissionError, Result};
use crate::core::types::{MissionNumber, ScenarioId, START_ID};
use crate::metrics::Metrics;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Keys of the two durable slots the controller writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotKeys {
    /// Holds the in-progress session. Written after every decision,
    /// removed when the session ends.
    pub session_key: String,
    /// Holds the final snapshot. Written once, at termination.
    pub final_key: String,
}

impl Default for SlotKeys {
    fn default() -> Self {
        Self {
            session_key: "cmsGameState".to_string(),
            final_key: "cmsFinalState".to_string(),
        }
    }
}

/// Floors used by the status deriver
///
/// Percentage metrics are compared with strict `<`. The budget disaster
/// check uses `<=` against `budget_floor` since zero funds is already
/// a failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusThresholds {
    /// Any percentage metric below this is a complete disaster
    pub disaster_floor: i32,
    /// Any percentage metric below this raises an instability warning
    pub warning_floor: i32,
    /// Budget below this raises an instability warning
    pub budget_warning: i32,
    /// Budget at or below this is a complete disaster
    pub budget_floor: i32,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            disaster_floor: 15,
            warning_floor: 40,
            budget_warning: 30,
            budget_floor: 0,
        }
    }
}

/// Configuration for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Hard cap on decisions per session
    ///
    /// Once the mission counter passes this value the next load terminates
    /// the session, whatever scenario the catalog would have served.
    pub max_missions: MissionNumber,

    /// Scenario a session resumes on before its first decision
    pub start_scenario: ScenarioId,

    /// Durable slot names
    pub slots: SlotKeys,

    /// Status classification floors
    pub thresholds: StatusThresholds,

    /// Metrics a freshly created session starts with
    pub starting_metrics: Metrics,

    /// Budget value that fills the budget gauge
    ///
    /// Only affects display. Budget itself is never capped.
    pub budget_gauge_max: i32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_missions: 10,
            start_scenario: ScenarioId::new(START_ID),
            slots: SlotKeys::default(),
            thresholds: StatusThresholds::default(),
            starting_metrics: Metrics::new(60, 60, 60, 100),
            budget_gauge_max: 100,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_missions == 0 {
            return Err(MissionError::ConfigError(
                "max_missions must be at least 1".into(),
            ));
        }

        if self.start_scenario.as_str().is_empty() || self.start_scenario.is_terminal() {
            return Err(MissionError::ConfigError(format!(
                "start_scenario '{}' must name a real scenario",
                self.start_scenario
            )));
        }

        if self.thresholds.disaster_floor > self.thresholds.warning_floor {
            return Err(MissionError::ConfigError(format!(
                "disaster_floor ({}) should be <= warning_floor ({})",
                self.thresholds.disaster_floor, self.thresholds.warning_floor
            )));
        }

        if self.slots.session_key == self.slots.final_key {
            return Err(MissionError::ConfigError(
                "session and final slots must use different keys".into(),
            ));
        }

        if let Some(kind) = self.starting_metrics.out_of_range() {
            return Err(MissionError::ConfigError(format!(
                "starting {} ({}) must be within 0..=100",
                kind,
                self.starting_metrics.get(kind)
            )));
        }

        if self.budget_gauge_max <= 0 {
            return Err(MissionError::ConfigError(
                "budget_gauge_max must be positive".into(),
            ));
        }

        Ok(())
    }
}

/// Parse and validate a config from TOML text
pub fn parse_config(contents: &str) -> Result<SimulationConfig> {
    let config: SimulationConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a config from a TOML file
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        MissionError::ConfigError(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_missions, 10);
        assert_eq!(config.start_scenario.as_str(), "START");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = parse_config(
            r#"
max_missions = 5

[thresholds]
disaster_floor = 10
warning_floor = 35
budget_warning = 25
budget_floor = 0
"#,
        )
        .unwrap();

        assert_eq!(config.max_missions, 5);
        assert_eq!(config.thresholds.disaster_floor, 10);
        assert_eq!(config.slots, SlotKeys::default());
        assert_eq!(config.budget_gauge_max, 100);
    }

    #[test]
    fn test_starting_metrics_from_toml() {
        let config = parse_config(
            r#"
[starting_metrics]
publicTrust = 70
systemResilience = 50
diplomaticStability = 45
budget = 80
"#,
        )
        .unwrap();

        assert_eq!(config.starting_metrics, Metrics::new(70, 50, 45, 80));
    }

    #[test]
    fn test_rejects_out_of_range_starting_metrics() {
        let result = parse_config(
            r#"
[starting_metrics]
publicTrust = 150
systemResilience = -20
diplomaticStability = 60
budget = 100
"#,
        );
        match result {
            Err(MissionError::ConfigError(msg)) => assert!(msg.contains("Public Trust")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_terminal_start() {
        let result = parse_config("start_scenario = \"end\"");
        assert!(matches!(result, Err(MissionError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut config = SimulationConfig::default();
        config.thresholds.disaster_floor = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_shared_slot_key() {
        let mut config = SimulationConfig::default();
        config.slots.final_key = config.slots.session_key.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        let path = Path::new("data/config.toml");
        if path.exists() {
            let config = load_config(path).expect("Should load bundled config");
            assert_eq!(config, SimulationConfig::default());
        }
    }

    #[test]
    fn test_rejects_zero_missions() {
        let result = parse_config("max_missions = 0");
        assert!(result.is_err());
    }
}
