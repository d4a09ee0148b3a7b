//! `lifecycle-consumption` library crate.
//!
//! The binary (`lcc`) is a thin wrapper around this library so that:
//!
//! - the closed-form model is testable without spawning processes
//! - the model never depends on the terminal/charting code
//! - front-ends (CLI, TUI) share one evaluation pipeline

pub mod app;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
