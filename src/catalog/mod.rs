//! Scenario catalog - read-only lookup of scenarios by id
//!
//! Loaded once per session from a JSON or TOML source (`loader`), which may
//! live on disk or behind an HTTP endpoint (`source`).

pub mod loader;
pub mod scenario;
pub mod source;

pub use loader::{load_catalog_file, parse_catalog, CatalogFormat};
pub use scenario::{Consequences, DecisionOption, Scenario};
pub use source::CatalogSource;

use crate::core::error::{MissionError, Result};
use crate::core::types::ScenarioId;
use ahash::AHashMap;

/// Result of resolving an id against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The reserved end-of-game id
    Terminal,
    Found(&'a Scenario),
    NotFound,
}

/// Immutable scenario collection keyed by id
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    scenarios: AHashMap<ScenarioId, Scenario>,
}

impl ScenarioCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from scenarios keyed by their own ids
    pub fn from_scenarios(scenarios: impl IntoIterator<Item = Scenario>) -> Result<Self> {
        let mut catalog = Self::new();
        for scenario in scenarios {
            catalog.insert(scenario)?;
        }
        Ok(catalog)
    }

    /// Add a scenario. Terminal, empty and duplicate ids are rejected.
    pub(crate) fn insert(&mut self, scenario: Scenario) -> Result<()> {
        let id = scenario.id.clone();
        if id.as_str().is_empty() {
            return Err(MissionError::CatalogLoadFailure(format!(
                "scenario '{}' has no id",
                scenario.title
            )));
        }
        if id.is_terminal() {
            return Err(MissionError::CatalogLoadFailure(format!(
                "'{}' is reserved and cannot be a scenario id",
                id
            )));
        }
        if self.scenarios.contains_key(&id) {
            return Err(MissionError::CatalogLoadFailure(format!(
                "duplicate scenario id '{}'",
                id
            )));
        }
        self.scenarios.insert(id, scenario);
        Ok(())
    }

    /// Resolve an id, treating any casing of `END` as terminal
    pub fn lookup(&self, id: &ScenarioId) -> Lookup<'_> {
        if id.is_terminal() {
            return Lookup::Terminal;
        }
        match self.scenarios.get(id) {
            Some(scenario) => Lookup::Found(scenario),
            None => Lookup::NotFound,
        }
    }

    /// Fetch a real scenario. Case-sensitive.
    pub fn get(&self, id: &ScenarioId) -> Result<&Scenario> {
        match self.lookup(id) {
            Lookup::Found(scenario) => Ok(scenario),
            Lookup::Terminal | Lookup::NotFound => Err(MissionError::ScenarioNotFound(id.clone())),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scenarios.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    /// `(from, to)` pairs where an option points at an id that is neither
    /// terminal nor in the catalog
    pub fn dangling_references(&self) -> Vec<(ScenarioId, ScenarioId)> {
        let mut dangling: Vec<_> = self
            .iter()
            .flat_map(|scenario| {
                scenario
                    .options
                    .iter()
                    .map(move |option| (&scenario.id, &option.next_scenario))
            })
            .filter(|(_, next)| !next.is_terminal() && !self.scenarios.contains_key(*next))
            .map(|(from, to)| (from.clone(), to.clone()))
            .collect();
        dangling.sort();
        dangling.dedup();
        dangling
    }
}
