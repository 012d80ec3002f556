//! Mission Sim - Entry Point
//!
//! Fetches the scenario catalog, resumes (or creates) the session stored in
//! the save directory, and runs the interactive decision loop.

use clap::Parser;
use mission_sim::catalog::CatalogSource;
use mission_sim::controller::{final_report, GameController, PlayerInput, Presentation};
use mission_sim::core::config::{load_config, SimulationConfig};
use mission_sim::core::error::{MissionError, Result};
use mission_sim::session::FileStore;
use mission_sim::ui::render::{render_dashboard, render_debrief, render_scenario, render_summary};
use mission_sim::ui::{LogCategory, TerminalUi};

use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Classified Mission Simulator
#[derive(Parser, Debug)]
#[command(name = "mission-sim")]
#[command(about = "Play through a crisis-management mission campaign")]
struct Args {
    /// Scenario catalog: a JSON/TOML file or an http(s) URL
    #[arg(long, default_value = "data/missions.json")]
    catalog: String,

    /// Directory holding the session and final-snapshot slots
    #[arg(long, default_value = ".mission-sim")]
    save_dir: PathBuf,

    /// Optional TOML config overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start a new session with this role, replacing any in progress
    #[arg(long, value_name = "ROLE")]
    new: Option<String>,

    /// Print the final debrief of the last finished session and exit
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mission_sim=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    let store = FileStore::open(&args.save_dir)?;

    if args.summary {
        match final_report(&store, &config)? {
            Some(report) => print!("{}", render_summary(&report, &config)),
            None => println!("No finished session in {}", store.dir().display()),
        }
        return Ok(());
    }

    // The catalog is fetched once, before the state machine starts
    let rt = Runtime::new()?;
    let source = CatalogSource::parse(&args.catalog);
    let catalog = rt.block_on(source.fetch()).map_err(|e| {
        eprintln!("Error: Mission Data Missing");
        eprintln!("Could not load scenarios from {}.", source);
        e
    })?;

    let mut controller = match args.new {
        Some(role) => GameController::begin(catalog, store, config, role)?,
        None => match GameController::resume(catalog, store, config) {
            Ok(controller) => controller,
            Err(MissionError::MissingSession) => {
                println!("No session in progress. Start one with --new <ROLE>.");
                return Ok(());
            }
            Err(e) => return Err(e),
        },
    };

    let mut ui = TerminalUi::new();
    let mut screen = controller.start().map_err(report_fatal)?;

    println!("\n=== CLASSIFIED MISSION SIMULATOR ===");
    println!("Commands: <number> choose option, p proceed, q save & quit");
    println!("          log toggle history, d toggle dashboard");

    loop {
        if let Presentation::SessionEnded(report) = &screen {
            println!();
            print!("{}", render_summary(report, controller.config()));
            break;
        }

        println!();
        if ui.show_dashboard {
            print!(
                "{}",
                render_dashboard(controller.state(), controller.status(), controller.config())
            );
        }
        if ui.show_log {
            for entry in ui.recent(10) {
                println!("  [M{}] {:?}: {}", entry.mission, entry.category, entry.message);
            }
        }
        match &screen {
            Presentation::Scenario(view) => print!("{}", render_scenario(view)),
            Presentation::Debrief(view) => print!("{}", render_debrief(view)),
            Presentation::SessionEnded(_) => {}
        }

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        let action = match (input, &screen) {
            ("q" | "quit", _) => break,
            ("log", _) => {
                ui.toggle_log();
                continue;
            }
            ("d", _) => {
                ui.toggle_dashboard();
                continue;
            }
            ("p" | "", Presentation::Debrief(_)) => PlayerInput::Proceed,
            (choice, Presentation::Scenario(view)) => {
                let Some(option) = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| view.options.get(i))
                else {
                    println!("Pick an option between 1 and {}", view.options.len());
                    continue;
                };
                if option.disabled {
                    println!("Insufficient funds for that option.");
                    continue;
                }
                PlayerInput::Choose(option.index)
            }
            _ => {
                println!("Unknown command.");
                continue;
            }
        };

        let mission = controller.state().mission_number;
        match controller.handle(action) {
            Ok(next) => {
                if let Presentation::Debrief(view) = &next {
                    ui.record_debrief(mission, view);
                }
                screen = next;
            }
            Err(e @ MissionError::ScenarioNotFound(_)) => return Err(report_fatal(e)),
            Err(e) => {
                ui.log(mission, e.to_string(), LogCategory::System);
                println!("{}", e);
            }
        }
    }

    Ok(())
}

fn report_fatal(e: MissionError) -> MissionError {
    if let MissionError::ScenarioNotFound(id) = &e {
        eprintln!("Error: Scenario Not Found ({})", id);
    }
    e
}
