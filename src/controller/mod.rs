//! Game state controller
//!
//! Drives one session through the cycle:
//! Loading -> AwaitingDecision -> Debriefing -> Loading ... -> Terminated
//!
//! The controller is the only writer of the session slot. A scenario id the
//! catalog cannot resolve halts the machine; every later input is refused.

pub mod view;

pub use view::{DebriefView, FinalReport, OptionView, PlayerInput, Presentation, ScenarioView};

use crate::catalog::{Lookup, Scenario, ScenarioCatalog};
use crate::core::config::SimulationConfig;
use crate::core::error::{MissionError, Result};
use crate::core::types::ScenarioId;
use crate::decision::{apply_decision, is_affordable};
use crate::session::{read_state, write_state, GameState, SessionStore};
use crate::status::{derive_status_with, SystemStatus};

/// Controller phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Loading,
    AwaitingDecision,
    Debriefing,
    Terminated,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::AwaitingDecision => "awaiting a decision",
            Phase::Debriefing => "debriefing",
            Phase::Terminated => "terminated",
        }
    }
}

/// Drives one session over a catalog, persisting to `S` after every decision
pub struct GameController<S: SessionStore> {
    catalog: ScenarioCatalog,
    store: S,
    config: SimulationConfig,
    state: GameState,
    phase: Phase,
    /// Scenario currently awaiting a decision
    current: Option<ScenarioId>,
    /// Captured when entering the debrief, consumed by `proceed`
    pending_next: Option<ScenarioId>,
    /// Id that could not be resolved
    halted: Option<ScenarioId>,
}

impl<S: SessionStore> GameController<S> {
    /// Resume the session held in the store
    ///
    /// Returns `MissingSession` when the slot is empty; the caller should
    /// send the player to session creation.
    pub fn resume(catalog: ScenarioCatalog, store: S, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let state =
            read_state(&store, &config.slots.session_key)?.ok_or(MissionError::MissingSession)?;
        tracing::info!(
            "Resuming session for {} at mission {}",
            state.role,
            state.mission_number
        );
        Ok(Self::with_state(catalog, store, config, state))
    }

    /// Create and persist a fresh session, replacing any in progress
    pub fn begin(
        catalog: ScenarioCatalog,
        mut store: S,
        config: SimulationConfig,
        role: impl Into<String>,
    ) -> Result<Self> {
        config.validate()?;
        let state = GameState::new(role, config.starting_metrics);
        write_state(&mut store, &config.slots.session_key, &state)?;
        tracing::info!("Started new session as {}", state.role);
        Ok(Self::with_state(catalog, store, config, state))
    }

    fn with_state(
        catalog: ScenarioCatalog,
        store: S,
        config: SimulationConfig,
        state: GameState,
    ) -> Self {
        Self {
            catalog,
            store,
            config,
            state,
            phase: Phase::Loading,
            current: None,
            pending_next: None,
            halted: None,
        }
    }

    /// Load the resume point: the saved scenario, or the start scenario
    pub fn start(&mut self) -> Result<Presentation> {
        self.require(Phase::Loading, "start")?;
        let id = self.state.resume_point(&self.config.start_scenario);
        self.load(id)
    }

    /// Route a player input to `choose` or `proceed`
    pub fn handle(&mut self, input: PlayerInput) -> Result<Presentation> {
        match input {
            PlayerInput::Choose(index) => self.choose(index),
            PlayerInput::Proceed => self.proceed(),
        }
    }

    /// Apply the option at `index`, persist, and enter the debrief
    ///
    /// Affordability is advisory and not checked here.
    pub fn choose(&mut self, index: usize) -> Result<Presentation> {
        self.require(Phase::AwaitingDecision, "choose an option")?;
        let scenario_id = self.current.clone().ok_or(MissionError::InvalidTransition {
            action: "choose an option",
            phase: "no scenario is loaded",
        })?;

        let scenario = self.catalog.get(&scenario_id)?;
        let option = scenario
            .option(index)
            .ok_or_else(|| MissionError::InvalidOption {
                scenario: scenario_id.clone(),
                index,
            })?;

        let outcome = apply_decision(&self.state, option);
        let feedback = option.feedback.clone();

        write_state(&mut self.store, &self.config.slots.session_key, &outcome.state)?;

        tracing::debug!(
            "Mission {} decided in {}: option {} -> {}",
            self.state.mission_number,
            scenario_id,
            index,
            outcome.next_scenario
        );

        self.state = outcome.state;
        self.current = None;
        self.phase = Phase::Debriefing;

        let is_terminal_next = self.is_terminal(&outcome.next_scenario);
        let next_label = if is_terminal_next {
            "Proceed to Final Debrief →".to_string()
        } else {
            format!("Proceed to Mission {} →", self.state.mission_number)
        };
        self.pending_next = Some(outcome.next_scenario);

        Ok(Presentation::Debrief(DebriefView {
            feedback,
            analysis: outcome.analysis,
            next_label,
            is_terminal_next,
        }))
    }

    /// Leave the debrief for the captured next scenario
    pub fn proceed(&mut self) -> Result<Presentation> {
        self.require(Phase::Debriefing, "proceed")?;
        let next = self.pending_next.take().ok_or(MissionError::InvalidTransition {
            action: "proceed",
            phase: "no next scenario was captured",
        })?;

        if self.is_terminal(&next) {
            self.terminate()
        } else {
            self.load(next)
        }
    }

    /// Terminal check shared by loading and debriefing
    ///
    /// Runs before any catalog lookup so the end of the game never reads as
    /// a missing scenario.
    pub fn is_terminal(&self, id: &ScenarioId) -> bool {
        id.is_terminal() || self.state.mission_number > self.config.max_missions
    }

    fn load(&mut self, id: ScenarioId) -> Result<Presentation> {
        self.phase = Phase::Loading;
        self.current = None;

        if self.is_terminal(&id) {
            return self.terminate();
        }

        match self.catalog.lookup(&id) {
            Lookup::Found(scenario) => {
                let view = self.scenario_view(scenario);
                self.current = Some(id);
                self.phase = Phase::AwaitingDecision;
                Ok(Presentation::Scenario(view))
            }
            Lookup::Terminal | Lookup::NotFound => {
                tracing::error!("Scenario ID \"{}\" not found", id);
                self.halted = Some(id.clone());
                Err(MissionError::ScenarioNotFound(id))
            }
        }
    }

    fn scenario_view(&self, scenario: &Scenario) -> ScenarioView {
        let options = scenario
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| OptionView {
                index,
                text: option.text.clone(),
                disabled: !is_affordable(&self.state.metrics, option),
                budget_delta: option.budget_delta(),
            })
            .collect();

        ScenarioView {
            id: scenario.id.clone(),
            mission: self.state.display_mission(self.config.max_missions),
            title: scenario.title.clone(),
            description: scenario.description.clone(),
            options,
        }
    }

    /// Save the final snapshot, clear the session slot, and stop
    fn terminate(&mut self) -> Result<Presentation> {
        write_state(&mut self.store, &self.config.slots.final_key, &self.state)?;
        self.store.remove(&self.config.slots.session_key)?;

        self.phase = Phase::Terminated;
        self.current = None;
        self.pending_next = None;

        let status = self.status();
        tracing::info!(
            "Simulation ended after {} missions with status {}",
            self.state.missions_completed(),
            status
        );

        Ok(Presentation::SessionEnded(FinalReport {
            state: self.state.clone(),
            status,
        }))
    }

    fn require(&self, expected: Phase, action: &'static str) -> Result<()> {
        if let Some(id) = &self.halted {
            return Err(MissionError::ScenarioNotFound(id.clone()));
        }
        if self.phase == Phase::Terminated {
            return Err(MissionError::SessionEnded);
        }
        if self.phase != expected {
            return Err(MissionError::InvalidTransition {
                action,
                phase: self.phase.name(),
            });
        }
        Ok(())
    }

    /// Current phase of the state machine
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// State as last persisted
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Status derived from the current metrics
    pub fn status(&self) -> SystemStatus {
        derive_status_with(&self.state.metrics, &self.config.thresholds)
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Scenario awaiting a decision, if any
    pub fn current_scenario(&self) -> Option<&ScenarioId> {
        self.current.as_ref()
    }

    pub fn pending_next(&self) -> Option<&ScenarioId> {
        self.pending_next.as_ref()
    }

    /// Whether an unknown scenario id stopped the session
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store, e.g. to read the final slot
    pub fn into_store(self) -> S {
        self.store
    }
}

/// Read the final snapshot left by a finished session
pub fn final_report<S: SessionStore + ?Sized>(
    store: &S,
    config: &SimulationConfig,
) -> Result<Option<FinalReport>> {
    Ok(read_state(store, &config.slots.final_key)?.map(|state| FinalReport {
        status: derive_status_with(&state.metrics, &config.thresholds),
        state,
    }))
}
