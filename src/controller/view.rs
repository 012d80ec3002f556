//! View state emitted by the controller for the presentation layer

use crate::core::types::{MissionNumber, ScenarioId};
use crate::decision::AnalysisItem;
use crate::session::GameState;
use crate::status::SystemStatus;
use serde::Serialize;

/// Controller input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Pick the option at this index of the current scenario
    Choose(usize),
    /// Leave the debrief
    Proceed,
}

/// One option as the player sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub index: usize,
    pub text: String,
    /// Set when the option would push the budget into debt
    pub disabled: bool,
    pub budget_delta: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioView {
    pub id: ScenarioId,
    pub mission: MissionNumber,
    pub title: String,
    pub description: String,
    pub options: Vec<OptionView>,
}

impl ScenarioView {
    pub fn enabled_options(&self) -> impl Iterator<Item = &OptionView> {
        self.options.iter().filter(|o| !o.disabled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebriefView {
    pub feedback: String,
    pub analysis: Vec<AnalysisItem>,
    pub next_label: String,
    pub is_terminal_next: bool,
}

/// Final snapshot handed to the summary screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalReport {
    pub state: GameState,
    pub status: SystemStatus,
}

/// What the controller asks the presentation layer to show next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Scenario(ScenarioView),
    Debrief(DebriefView),
    /// The session is over; the caller navigates to the summary
    SessionEnded(FinalReport),
}

impl Presentation {
    pub fn is_session_end(&self) -> bool {
        matches!(self, Presentation::SessionEnded(_))
    }
}
