//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Reserved identifier that ends the simulation. Matched ignoring case.
pub const TERMINAL_ID: &str = "END";

/// Identifier of the scenario a fresh session starts on
pub const START_ID: &str = "START";

/// 1-based count of decisions made so far
pub type MissionNumber = u32;

/// Key of a scenario in the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub String);

impl ScenarioId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn start() -> Self {
        Self::new(START_ID)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for any casing of `END`
    pub fn is_terminal(&self) -> bool {
        self.0.eq_ignore_ascii_case(TERMINAL_ID)
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ScenarioId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ScenarioId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
