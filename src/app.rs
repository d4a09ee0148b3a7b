//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - solves the model
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use log::info;

use crate::cli::{Command, ParamArgs, PlotArgs, SolveArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `lcc` binary.
pub fn run() -> Result<(), AppError> {
    // Missing `.env` is the common case, not an error.
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    // We want `lcc` and `lcc --rho 0.03` to behave like `lcc tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Solve(args) => handle_solve(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_solve(args: SolveArgs) -> Result<(), AppError> {
    let params = args.params.to_params();
    params.validate()?;

    let run = pipeline::run_model(&params);

    println!("{}", crate::report::format_run_summary(&run));
    println!(
        "{}",
        crate::report::format_trajectory_table(&run.trajectory, args.every)
    );

    if !args.no_plot {
        let plot = crate::plot::render_trajectory_plot(&run.trajectory, args.width, args.height);
        println!("{plot}");
    }

    if let Some(path) = &args.export {
        crate::io::write_trajectory_csv(path, &run.trajectory)?;
        info!("wrote {}", path.display());
    }
    if let Some(path) = &args.export_json {
        crate::io::write_trajectory_json(path, &run)?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

fn handle_tui(args: ParamArgs) -> Result<(), AppError> {
    let params = args.to_params();
    params.validate()?;
    crate::tui::run(params)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_trajectory_json(&args.file)?;

    println!(
        "{} | generated {}",
        crate::report::format_parameters(&file.parameters),
        file.generated_at.to_rfc3339()
    );
    let plot = crate::plot::render_trajectory_plot(&file.trajectory, args.width, args.height);
    println!("{plot}");
    Ok(())
}

/// Rewrite argv so `lcc` defaults to `lcc tui`.
///
/// Rules:
/// - `lcc`                      -> `lcc tui`
/// - `lcc --rho 0.03 ...`       -> `lcc tui --rho 0.03 ...`
/// - `lcc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "solve" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
