//! UI state for the terminal front end

use crate::controller::DebriefView;
use crate::core::types::MissionNumber;
use crate::decision::AnalysisItem;
use crate::ui::render::format_delta;
use std::collections::VecDeque;

/// Maximum decision log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Terminal UI state
#[derive(Debug, Default)]
pub struct TerminalUi {
    /// Decision log entries
    pub decision_log: VecDeque<LogEntry>,
    /// Whether to show the metric dashboard above each screen
    pub show_dashboard: bool,
    /// Whether to show the decision log
    pub show_log: bool,
}

/// An entry in the decision log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub mission: MissionNumber,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Decision,
    Warning,
    System,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self {
            decision_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            show_dashboard: true,
            show_log: false,
        }
    }

    /// Add an entry to the decision log
    pub fn log(&mut self, mission: MissionNumber, message: String, category: LogCategory) {
        if self.decision_log.len() >= MAX_LOG_ENTRIES {
            self.decision_log.pop_front();
        }
        self.decision_log.push_back(LogEntry {
            mission,
            message,
            category,
        });
    }

    /// Record a debrief: one entry per metric change, warnings for drops
    pub fn record_debrief(&mut self, mission: MissionNumber, debrief: &DebriefView) {
        if debrief.analysis.is_empty() {
            self.log(mission, "No measurable impact".to_string(), LogCategory::Decision);
        }
        for item in &debrief.analysis {
            let category = if item.delta < 0 {
                LogCategory::Warning
            } else {
                LogCategory::Decision
            };
            self.log(mission, summarize(item), category);
        }
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
    }

    pub fn toggle_dashboard(&mut self) {
        self.show_dashboard = !self.show_dashboard;
    }

    /// Most recent `n` entries, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.decision_log
            .iter()
            .skip(self.decision_log.len().saturating_sub(n))
    }
}

fn summarize(item: &AnalysisItem) -> String {
    format!("{} {}", item.label, format_delta(item))
}
