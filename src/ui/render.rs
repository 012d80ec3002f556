//! Plain-text rendering of controller views

use crate::controller::{DebriefView, FinalReport, OptionView, ScenarioView};
use crate::core::config::SimulationConfig;
use crate::decision::AnalysisItem;
use crate::metrics::{MetricBand, MetricKind, Metrics};
use crate::session::GameState;
use crate::status::SystemStatus;
use std::fmt::Write;

const GAUGE_WIDTH: usize = 20;

/// `+5%`, `-5%`, `0%` for percentages; `-20B` for budget
pub fn format_delta(item: &AnalysisItem) -> String {
    if item.is_budget {
        format!("{}B", item.delta)
    } else if item.delta > 0 {
        format!("+{}%", item.delta)
    } else {
        format!("{}%", item.delta)
    }
}

/// `40% → 45%` or `40B → -10B`
pub fn format_change(item: &AnalysisItem) -> String {
    let unit = if item.is_budget { "B" } else { "%" };
    format!("{}{unit} → {}{unit}", item.old_value, item.new_value)
}

/// Option text, with the shortfall appended when the option is disabled
pub fn option_label(option: &OptionView) -> String {
    match (option.disabled, option.budget_delta) {
        (true, Some(delta)) => format!("{} (Insufficient Funds: {}B)", option.text, delta),
        _ => option.text.clone(),
    }
}

pub fn gauge(percent: i32, band: MetricBand) -> String {
    let filled = (percent.clamp(0, 100) as usize * GAUGE_WIDTH) / 100;
    let fill = match band {
        MetricBand::Healthy => '#',
        MetricBand::Strained => '=',
        MetricBand::Critical => '!',
    };
    format!(
        "[{}{}]",
        fill.to_string().repeat(filled),
        ".".repeat(GAUGE_WIDTH - filled)
    )
}

fn metric_value(metrics: &Metrics, kind: MetricKind) -> String {
    if kind.is_budget() {
        format!("${}B", metrics.budget)
    } else {
        format!("{}%", metrics.get(kind))
    }
}

pub fn render_dashboard(
    state: &GameState,
    status: SystemStatus,
    config: &SimulationConfig,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "--- {} | Mission {}/{} | Status: {} ---",
        state.role,
        state.display_mission(config.max_missions),
        config.max_missions,
        status
    );
    for kind in MetricKind::ALL {
        let _ = writeln!(
            out,
            "  {:<21} {} {}",
            kind.label(),
            gauge(
                state.metrics.gauge_percent(kind, config.budget_gauge_max),
                state.metrics.band(kind)
            ),
            metric_value(&state.metrics, kind)
        );
    }
    out
}

pub fn render_scenario(view: &ScenarioView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== MISSION {}: {} ===", view.mission, view.title);
    let _ = writeln!(out, "{}", view.description);
    let _ = writeln!(out);
    for option in &view.options {
        let marker = if option.disabled { 'x' } else { ' ' };
        let _ = writeln!(out, " {}{}) {}", marker, option.index + 1, option_label(option));
    }
    out
}

pub fn render_debrief(view: &DebriefView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Decision Debrief ===");
    let _ = writeln!(out, "{}", view.feedback);
    let _ = writeln!(out);
    for item in &view.analysis {
        let _ = writeln!(
            out,
            "  {:<21} {:<14} {}",
            item.label,
            format_change(item),
            format_delta(item)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[p] {}", view.next_label);
    out
}

pub fn render_summary(report: &FinalReport, config: &SimulationConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== FINAL DEBRIEF ===");
    let _ = writeln!(out, "Role: {}", report.state.role);
    let _ = writeln!(
        out,
        "Missions completed: {}",
        report.state.missions_completed().min(config.max_missions)
    );
    let _ = writeln!(out, "Final status: {}", report.status);
    for kind in MetricKind::ALL {
        let value = metric_value(&report.state.metrics, kind);
        let _ = writeln!(out, "  {:<21} {}", kind.label(), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(metric: MetricKind, old_value: i32, delta: i32, new_value: i32) -> AnalysisItem {
        AnalysisItem {
            metric,
            label: metric.label(),
            delta,
            old_value,
            new_value,
            is_budget: metric.is_budget(),
        }
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(&item(MetricKind::PublicTrust, 50, 5, 55)), "+5%");
        assert_eq!(format_delta(&item(MetricKind::PublicTrust, 50, -5, 45)), "-5%");
        assert_eq!(format_delta(&item(MetricKind::PublicTrust, 50, 0, 50)), "0%");
        assert_eq!(format_delta(&item(MetricKind::Budget, 40, -50, -10)), "-50B");
        assert_eq!(format_delta(&item(MetricKind::Budget, 40, 20, 60)), "20B");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(&item(MetricKind::Budget, 40, -50, -10)), "40B → -10B");
        assert_eq!(
            format_change(&item(MetricKind::SystemResilience, 95, 10, 100)),
            "95% → 100%"
        );
    }

    #[test]
    fn test_option_label_insufficient_funds() {
        let option = OptionView {
            index: 0,
            text: "Buy satellites".into(),
            disabled: true,
            budget_delta: Some(-80),
        };
        assert_eq!(option_label(&option), "Buy satellites (Insufficient Funds: -80B)");

        let affordable = OptionView {
            disabled: false,
            ..option
        };
        assert_eq!(option_label(&affordable), "Buy satellites");
    }

    #[test]
    fn test_gauge_width() {
        assert_eq!(
            gauge(50, MetricBand::Strained),
            format!("[{}{}]", "=".repeat(10), ".".repeat(10))
        );
        assert_eq!(gauge(0, MetricBand::Critical), format!("[{}]", ".".repeat(20)));
        assert_eq!(gauge(100, MetricBand::Healthy), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn test_dashboard_caps_mission() {
        let mut state = GameState::new("Analyst", Metrics::new(60, 60, 60, 100));
        state.mission_number = 11;
        let text = render_dashboard(&state, SystemStatus::Nominal, &SimulationConfig::default());
        assert!(text.contains("Mission 10/10"));
        assert!(text.contains("$100B"));
    }
}
