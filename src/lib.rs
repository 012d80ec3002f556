//! Mission Sim - crisis-management simulation on a scenario state machine

pub mod catalog;
pub mod controller;
pub mod core;
pub mod decision;
pub mod metrics;
pub mod session;
pub mod status;
pub mod ui;
