//! Debug bundle writer: a markdown snapshot of one run for later inspection.

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;

use crate::app::pipeline::RunOutput;
use crate::error::AppError;
use crate::report::MODEL_DESCRIPTION;

/// Write a bundle into `./debug/`.
pub fn write_debug_bundle(run: &RunOutput) -> Result<PathBuf, AppError> {
    write_debug_bundle_to(Path::new("debug"), run)
}

/// Write a bundle into `dir`, creating it if needed.
pub fn write_debug_bundle_to(dir: &Path, run: &RunOutput) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let p = &run.params;
    let path = dir.join(format!(
        "lcc_debug_rho{:.2}_r{:.2}_T{}_{ts}.md",
        p.rho, p.r, p.horizon
    ));

    let file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    let mut file = BufWriter::new(file);

    writeln!(file, "# lcc debug bundle").map_err(write_err)?;
    writeln!(file, "- generated: {}", Local::now().to_rfc3339()).map_err(write_err)?;
    writeln!(file, "- rho: {}", p.rho).map_err(write_err)?;
    writeln!(file, "- r: {}", p.r).map_err(write_err)?;
    writeln!(file, "- a0: {}", p.a0).map_err(write_err)?;
    writeln!(file, "- aT: {}", p.a_t).map_err(write_err)?;
    writeln!(file, "- T: {}", p.horizon).map_err(write_err)?;

    writeln!(file, "\n## Diagnostics").map_err(write_err)?;
    writeln!(file, "- c0: {}", run.trajectory.c0).map_err(write_err)?;
    writeln!(file, "- growth r-rho: {}", p.growth_rate()).map_err(write_err)?;
    writeln!(file, "- a(T) reconstructed: {}", run.terminal_assets).map_err(write_err)?;
    writeln!(file, "- |a(T) - aT|: {}", run.terminal_gap).map_err(write_err)?;
    writeln!(file, "- finite: {}", run.finite).map_err(write_err)?;

    writeln!(file, "\n## Trajectory").map_err(write_err)?;
    writeln!(file, "| t | a(t) | c(t) |").map_err(write_err)?;
    writeln!(file, "| - | - | - |").map_err(write_err)?;
    let traj = &run.trajectory;
    for ((t, a), c) in traj.t.iter().zip(&traj.a).zip(&traj.c) {
        writeln!(file, "| {t} | {a:.10} | {c:.10} |").map_err(write_err)?;
    }

    writeln!(file, "\n## Notes\n\n{MODEL_DESCRIPTION}").map_err(write_err)?;
    file.flush().map_err(write_err)?;

    info!("wrote debug bundle {}", path.display());
    Ok(path)
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::new(4, format!("Failed to write debug bundle: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_model;
    use crate::domain::ModelParameters;

    #[test]
    fn bundle_contains_parameters_and_every_row() {
        let dir = std::env::temp_dir().join(format!("lcc_debug_{}", std::process::id()));
        let run = run_model(&ModelParameters::with_controls(0.05, 0.06, 7));

        let path = write_debug_bundle_to(&dir, &run).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert!(path.file_name().unwrap().to_string_lossy().starts_with("lcc_debug_rho0.05_r0.06_T7_"));
        assert!(text.starts_with("# lcc debug bundle"));
        assert!(text.contains("- T: 7"));
        assert!(text.contains("- finite: true"));
        let rows = text.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| t") && !l.starts_with("| -")).count();
        assert_eq!(rows, 7);
    }
}
