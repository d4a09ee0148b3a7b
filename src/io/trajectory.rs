//! Read/write trajectory JSON files.
//!
//! Trajectory JSON is the "portable" representation of a run:
//! - the parameters it was solved for
//! - `c0` and the reconstructed terminal assets
//! - the full `t`, `a(t)`, `c(t)` grid for re-plotting
//!
//! The schema is defined by `domain::TrajectoryFile`. Non-finite values are
//! written as `null` by `serde_json` and such files cannot be read back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;

use crate::app::pipeline::RunOutput;
use crate::domain::TrajectoryFile;
use crate::error::AppError;

/// Write a trajectory JSON file.
pub fn write_trajectory_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create trajectory JSON '{}': {e}", path.display())))?;

    let payload = TrajectoryFile {
        tool: "lcc".to_string(),
        generated_at: Utc::now(),
        parameters: run.params,
        terminal_assets: run.terminal_assets,
        trajectory: run.trajectory.clone(),
    };

    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &payload)
        .map_err(|e| AppError::new(2, format!("Failed to write trajectory JSON: {e}")))?;
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush trajectory JSON: {e}")))?;

    Ok(())
}

/// Read a trajectory JSON file and check its parallel arrays line up.
pub fn read_trajectory_json(path: &Path) -> Result<TrajectoryFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open trajectory JSON '{}': {e}", path.display())))?;
    let payload: TrajectoryFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid trajectory JSON: {e}")))?;

    let traj = &payload.trajectory;
    if traj.a.len() != traj.t.len() || traj.c.len() != traj.t.len() {
        return Err(AppError::new(
            2,
            format!(
                "Invalid trajectory JSON: length mismatch (t={}, a={}, c={}).",
                traj.t.len(),
                traj.a.len(),
                traj.c.len()
            ),
        ));
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_model;
    use crate::domain::ModelParameters;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lcc_{name}_{}.json", std::process::id()))
    }

    #[test]
    fn written_file_reads_back() {
        let run = run_model(&ModelParameters::with_controls(0.04, 0.07, 12));
        let path = temp_path("roundtrip");

        write_trajectory_json(&path, &run).unwrap();
        let file = read_trajectory_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(file.tool, "lcc");
        assert_eq!(file.parameters, run.params);
        assert_eq!(file.trajectory.t, run.trajectory.t);
        assert_eq!(file.trajectory.len(), 12);
        assert!((file.trajectory.c0 - run.trajectory.c0).abs() < 1e-15);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let path = temp_path("mismatch");
        let json = r#"{
            "tool": "lcc",
            "generated_at": "2026-01-01T00:00:00Z",
            "parameters": {"rho": 0.05, "r": 0.06, "a0": 1.0, "a_t": 0.0, "horizon": 2},
            "terminal_assets": 0.0,
            "trajectory": {"c0": 0.5, "t": [1, 2], "a": [0.5], "c": [0.5, 0.5]}
        }"#;
        std::fs::write(&path, json).unwrap();
        let err = read_trajectory_json(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("length mismatch"));
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_trajectory_json(&temp_path("does_not_exist")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
