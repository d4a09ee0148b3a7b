//! Command-line parsing for the life-cycle consumption explorer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the model code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{HORIZON_SLIDER, ModelParameters, RATE_SLIDER, RHO_SLIDER};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lcc", version, about = "Life-cycle consumption problem explorer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve the model, print a summary and table, and optionally plot/export.
    Solve(SolveArgs),
    /// Plot a previously exported trajectory JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// The flags set the initial slider positions; each change in the TUI
    /// recomputes the full trajectory.
    Tui(ParamArgs),
}

/// Model controls shared by all commands.
///
/// Initial and terminal assets are fixed at 1 and 0.
#[derive(Debug, Args, Clone)]
pub struct ParamArgs {
    /// Discount rate ρ, in [0.01, 0.10].
    #[arg(short = 'p', long, env = "LCC_RHO", default_value_t = RHO_SLIDER.default)]
    pub rho: f64,

    /// Interest rate r, in [0.01, 0.10].
    #[arg(short = 'r', long = "r", env = "LCC_R", default_value_t = RATE_SLIDER.default)]
    pub rate: f64,

    /// Time horizon T, in [2, 100].
    #[arg(short = 'T', long, env = "LCC_HORIZON", default_value_t = HORIZON_SLIDER.default as u32)]
    pub horizon: u32,
}

impl ParamArgs {
    pub fn to_params(&self) -> ModelParameters {
        ModelParameters::with_controls(self.rho, self.rate, self.horizon)
    }
}

/// Options for `lcc solve`.
#[derive(Debug, Args, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Print every n-th row of the trajectory table (the last row is always printed).
    #[arg(long, default_value_t = 10)]
    pub every: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height per panel (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Export the trajectory to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export parameters + trajectory to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for plotting a saved trajectory.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Trajectory JSON file produced by `lcc solve --export-json`.
    #[arg(long, value_name = "JSON")]
    pub file: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height per panel (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,
}
