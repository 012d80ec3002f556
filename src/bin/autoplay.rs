//! Headless playtester - plays whole sessions and reports how they ended
//!
//! Useful for checking a catalog: dangling references show up as halted
//! runs, and strategies reveal how punishing the budget curve is.

use clap::{Parser, ValueEnum};
use mission_sim::catalog::{load_catalog_file, ScenarioCatalog};
use mission_sim::controller::{GameController, PlayerInput, Presentation, ScenarioView};
use mission_sim::core::config::{load_config, SimulationConfig};
use mission_sim::core::error::{MissionError, Result};
use mission_sim::decision::apply_decision;
use mission_sim::metrics::Metrics;
use mission_sim::session::{GameState, MemoryStore};
use mission_sim::status::SystemStatus;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Always the first affordable option
    First,
    /// A uniformly random affordable option
    Random,
    /// The affordable option whose weakest resulting metric is highest
    Cautious,
}

/// Headless Mission Sim runner
#[derive(Parser, Debug)]
#[command(name = "autoplay")]
#[command(about = "Play mission campaigns automatically and report outcomes")]
struct Args {
    /// Scenario catalog file (JSON or TOML)
    #[arg(long, default_value = "data/missions.json")]
    catalog: PathBuf,

    /// Optional TOML config overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Option-picking strategy
    #[arg(long, value_enum, default_value_t = Strategy::Random)]
    strategy: Strategy,

    /// Number of sessions to play
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Role recorded in each session
    #[arg(long, default_value = "Autoplay Operator")]
    role: String,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum RunOutcome {
    Completed,
    /// Every option of a scenario was unaffordable
    Stuck,
    Halted,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct RunResult {
    run: u32,
    seed: u64,
    outcome: RunOutcome,
    missions_completed: u32,
    path: Vec<String>,
    final_metrics: Metrics,
    status: SystemStatus,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mission_sim=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    let catalog = load_catalog_file(&args.catalog)?;

    let mut results = Vec::with_capacity(args.runs as usize);
    for run in 0..args.runs {
        let seed = args.seed.wrapping_add(run as u64);
        results.push(play(&catalog, &config, &args, run, seed)?);
    }

    if args.format == "text" {
        for result in &results {
            println!(
                "run {:>3} | {:?} | {} missions | {} | trust {} resilience {} diplomacy {} budget {}B",
                result.run,
                result.outcome,
                result.missions_completed,
                result.status,
                result.final_metrics.public_trust,
                result.final_metrics.system_resilience,
                result.final_metrics.diplomatic_stability,
                result.final_metrics.budget
            );
            println!("          {}", result.path.join(" -> "));
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

fn play(
    catalog: &ScenarioCatalog,
    config: &SimulationConfig,
    args: &Args,
    run: u32,
    seed: u64,
) -> Result<RunResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut controller =
        GameController::begin(catalog.clone(), MemoryStore::new(), config.clone(), &args.role)?;
    let mut path = Vec::new();

    let mut screen = controller.start();
    let outcome = loop {
        match screen {
            Ok(Presentation::Scenario(view)) => {
                path.push(view.id.to_string());
                let Some(index) = pick(&controller, &view, args.strategy, &mut rng) else {
                    break RunOutcome::Stuck;
                };
                screen = controller.handle(PlayerInput::Choose(index));
            }
            Ok(Presentation::Debrief(_)) => {
                screen = controller.handle(PlayerInput::Proceed);
            }
            Ok(Presentation::SessionEnded(_)) => break RunOutcome::Completed,
            Err(MissionError::ScenarioNotFound(id)) => {
                path.push(format!("{}?", id));
                break RunOutcome::Halted;
            }
            Err(e) => return Err(e),
        }
    };

    let state: &GameState = controller.state();
    Ok(RunResult {
        run,
        seed,
        outcome,
        missions_completed: state.missions_completed(),
        path,
        final_metrics: state.metrics,
        status: controller.status(),
    })
}

fn pick(
    controller: &GameController<MemoryStore>,
    view: &ScenarioView,
    strategy: Strategy,
    rng: &mut ChaCha8Rng,
) -> Option<usize> {
    let enabled: Vec<usize> = view.enabled_options().map(|o| o.index).collect();
    if enabled.is_empty() {
        return None;
    }

    match strategy {
        Strategy::First => enabled.first().copied(),
        Strategy::Random => Some(enabled[rng.gen_range(0..enabled.len())]),
        Strategy::Cautious => {
            let scenario = controller.catalog().get(&view.id).ok()?;
            enabled.into_iter().max_by_key(|&index| {
                let outcome = apply_decision(controller.state(), &scenario.options[index]);
                let m = outcome.state.metrics;
                m.public_trust
                    .min(m.system_resilience)
                    .min(m.diplomatic_stability)
                    .min(m.effective_budget())
            })
        }
    }
}
