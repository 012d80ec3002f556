//! Persisted game state of one playthrough

use crate::core::error::{MissionError, Result};
use crate::core::types::{MissionNumber, ScenarioId};
use crate::metrics::Metrics;
use serde::{Deserialize, Serialize};

/// Everything the session slot holds
///
/// Serializes flat: `{ role, missionNumber, currentScenario?, publicTrust, ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub role: String,
    pub mission_number: MissionNumber,
    /// Absent until the first decision is made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_scenario: Option<ScenarioId>,
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl GameState {
    /// A fresh session at mission 1 with no scenario chosen yet
    pub fn new(role: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            role: role.into(),
            mission_number: 1,
            current_scenario: None,
            metrics,
        }
    }

    /// Scenario to load when resuming
    pub fn resume_point(&self, start: &ScenarioId) -> ScenarioId {
        self.current_scenario
            .clone()
            .unwrap_or_else(|| start.clone())
    }

    /// Mission number as shown to the player, never past the cap
    pub fn display_mission(&self, max_missions: MissionNumber) -> MissionNumber {
        self.mission_number.min(max_missions)
    }

    /// Decisions made so far
    pub fn missions_completed(&self) -> MissionNumber {
        self.mission_number.saturating_sub(1)
    }

    /// Reject a decoded state that no sequence of decisions could produce
    pub fn validate(&self) -> Result<()> {
        if self.mission_number == 0 {
            return Err(MissionError::CorruptSession(
                "missionNumber must be at least 1".into(),
            ));
        }
        if let Some(kind) = self.metrics.out_of_range() {
            return Err(MissionError::CorruptSession(format!(
                "{} is {}, outside 0..=100",
                kind,
                self.metrics.get(kind)
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_mission_one() {
        let state = GameState::new("Cyber Director", Metrics::new(60, 60, 60, 100));
        assert_eq!(state.mission_number, 1);
        assert_eq!(state.current_scenario, None);
        assert_eq!(state.resume_point(&ScenarioId::start()).as_str(), "START");
        assert_eq!(state.missions_completed(), 0);
    }

    #[test]
    fn test_resume_point_uses_current_scenario() {
        let mut state = GameState::new("Analyst", Metrics::default());
        state.current_scenario = Some("M4".into());
        assert_eq!(state.resume_point(&ScenarioId::start()).as_str(), "M4");
    }

    #[test]
    fn test_display_mission_is_capped() {
        let mut state = GameState::new("Analyst", Metrics::default());
        state.mission_number = 11;
        assert_eq!(state.display_mission(10), 10);
        state.mission_number = 4;
        assert_eq!(state.display_mission(10), 4);
    }

    #[test]
    fn test_flat_json_layout() {
        let json = r#"{
            "role": "Ambassador",
            "missionNumber": 3,
            "currentScenario": "M3",
            "publicTrust": 55,
            "systemResilience": 48,
            "diplomaticStability": 71,
            "budget": -5
        }"#;
        let state = GameState::from_json(json).unwrap();
        assert_eq!(state.role, "Ambassador");
        assert_eq!(state.mission_number, 3);
        assert_eq!(state.metrics, Metrics::new(55, 48, 71, -5));

        let value: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
        assert_eq!(value["diplomaticStability"], 71);
        assert_eq!(value["currentScenario"], "M3");
    }

    #[test]
    fn test_validate_rejects_impossible_states() {
        let mut state = GameState::new("Analyst", Metrics::new(60, 60, 60, -40));
        assert!(state.validate().is_ok());

        state.mission_number = 0;
        assert!(matches!(state.validate(), Err(MissionError::CorruptSession(_))));

        let json = r#"{"role":"Analyst","missionNumber":2,"publicTrust":250,"systemResilience":60,"diplomaticStability":60,"budget":100}"#;
        let decoded = GameState::from_json(json).unwrap();
        match decoded.validate() {
            Err(MissionError::CorruptSession(msg)) => assert!(msg.contains("Public Trust is 250")),
            other => panic!("expected CorruptSession, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_current_scenario() {
        let json = r#"{"role":"Analyst","missionNumber":1,"publicTrust":60,"systemResilience":60,"diplomaticStability":60,"budget":100}"#;
        let state = GameState::from_json(json).unwrap();
        assert_eq!(state.current_scenario, None);
        assert!(!state.to_json().unwrap().contains("currentScenario"));
    }
}
