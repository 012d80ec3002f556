use thiserror::Error;

use crate::core::types::ScenarioId;

#[derive(Error, Debug)]
pub enum MissionError {
    #[error("Could not load scenario catalog: {0}")]
    CatalogLoadFailure(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(ScenarioId),

    #[error("No session in progress")]
    MissingSession,

    #[error("Saved session is invalid: {0}")]
    CorruptSession(String),

    #[error("Scenario {scenario} has no option {index}")]
    InvalidOption { scenario: ScenarioId, index: usize },

    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    #[error("Session has already ended")]
    SessionEnded,

    #[error("Invalid config: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MissionError>;
