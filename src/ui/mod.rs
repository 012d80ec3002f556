//! Terminal front end: view rendering and the decision log

pub mod render;
pub mod state;

pub use state::{LogCategory, LogEntry, TerminalUi};
