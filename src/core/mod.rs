pub mod config;
pub mod error;
pub mod types;

pub use config::{SimulationConfig, SlotKeys, StatusThresholds};
pub use error::{MissionError, Result};
pub use types::{MissionNumber, ScenarioId, START_ID, TERMINAL_ID};
