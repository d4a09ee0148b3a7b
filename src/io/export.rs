//! Export a trajectory to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::Trajectory;
use crate::error::AppError;

/// Write `t,assets,consumption` rows to a CSV file.
pub fn write_trajectory_csv(path: &Path, traj: &Trajectory) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "t,assets,consumption")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for ((t, a), c) in traj.t.iter().zip(&traj.a).zip(&traj.c) {
        writeln!(out, "{t},{a:.12},{c:.12}")
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelParameters;
    use crate::models::calculate_trajectory;

    #[test]
    fn csv_has_header_and_one_row_per_step() {
        let traj = calculate_trajectory(&ModelParameters::with_controls(0.05, 0.06, 5));
        let path = std::env::temp_dir().join(format!("lcc_export_{}.csv", std::process::id()));

        write_trajectory_csv(&path, &traj).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "t,assets,consumption");
        assert!(lines[1].starts_with("1,0.827720078231,0.228312328838"));
        assert!(lines[5].starts_with("5,"));
    }

    #[test]
    fn csv_reports_unwritable_path() {
        let traj = calculate_trajectory(&ModelParameters::with_controls(0.05, 0.06, 2));
        let path = std::env::temp_dir().join("lcc_missing_dir").join("nested").join("out.csv");
        let err = write_trajectory_csv(&path, &traj).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("out.csv"));
    }
}
