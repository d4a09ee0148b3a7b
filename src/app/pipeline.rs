//! Shared "solve" pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! parameters -> closed form -> trajectory -> diagnostics
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use log::{debug, warn};

use crate::domain::{ModelParameters, Trajectory};
use crate::models::{calculate_trajectory, terminal_assets};

/// All computed outputs of a single evaluation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub params: ModelParameters,
    pub trajectory: Trajectory,
    /// `a(T)` reconstructed from the closed form.
    pub terminal_assets: f64,
    /// `|a(T) - aT|`; NaN when the solution is degenerate.
    pub terminal_gap: f64,
    pub finite: bool,
}

/// Evaluate the model for one parameter set.
///
/// Never fails: degenerate inputs (e.g. `ρ = 0`) produce non-finite values that
/// the front-ends are expected to render as-is.
pub fn run_model(params: &ModelParameters) -> RunOutput {
    debug!(
        "solving: rho={} r={} a0={} aT={} T={}",
        params.rho, params.r, params.a0, params.a_t, params.horizon
    );

    let trajectory = calculate_trajectory(params);
    let terminal_assets = terminal_assets(params);
    let terminal_gap = (terminal_assets - params.a_t).abs();
    let finite = trajectory.is_finite();

    if !finite {
        warn!(
            "non-finite trajectory for rho={} r={} T={} (c0={})",
            params.rho, params.r, params.horizon, trajectory.c0
        );
    } else {
        debug!("c0={:.6} a(T)={:.3e}", trajectory.c0, terminal_assets);
    }

    RunOutput {
        params: *params,
        trajectory,
        terminal_assets,
        terminal_gap,
        finite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_is_consistent() {
        let run = run_model(&ModelParameters::default());
        assert!(run.finite);
        assert_eq!(run.trajectory.len(), 100);
        assert!(run.terminal_gap < 1e-6);
        assert_eq!(run.params, ModelParameters::default());
    }

    #[test]
    fn degenerate_run_is_flagged_not_rejected() {
        let run = run_model(&ModelParameters::with_controls(0.0, 0.05, 20));
        assert!(!run.finite);
        assert!(run.terminal_gap.is_nan());
        assert_eq!(run.trajectory.len(), 20);
    }
}
