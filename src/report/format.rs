//! Formatted terminal output: run summary, trajectory table, model description.
//!
//! We keep formatting code in one place so:
//! - the model code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::domain::{ModelParameters, Trajectory};

/// Static description of the model shown under the charts.
pub const MODEL_DESCRIPTION: &str = "\
Model Description
This app demonstrates the Life-cycle Consumption Problem, which models how an
individual might optimally consume resources over their lifetime.

- a(t): Assets over time
- c(t): Optimal consumption over time
- ρ (rho): Subjective discount rate (time preference)
- r: Interest rate (interest income rate)
- T: Time horizon

Adjust the parameters to see how they affect the optimal consumption and asset paths.";

/// One-line parameter summary.
pub fn format_parameters(params: &ModelParameters) -> String {
    format!(
        "ρ={:.2} r={:.2} T={} a0={} aT={}",
        params.rho, params.r, params.horizon, params.a0, params.a_t
    )
}

/// Format the full run summary (parameters + closed-form diagnostics).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();
    let traj = &run.trajectory;

    out.push_str("=== lcc - Life-cycle Consumption Problem ===\n");
    out.push_str(&format!("Parameters: {}\n", format_parameters(&run.params)));
    out.push_str(&format!("Optimal initial consumption c0 = {}\n", fmt_value(traj.c0)));
    out.push_str(&format!(
        "Consumption growth r-ρ = {:+.4}\n",
        run.params.growth_rate()
    ));
    out.push_str(&format!(
        "Terminal check: a(T) = {} (target {}, gap {})\n",
        fmt_value(run.terminal_assets),
        run.params.a_t,
        fmt_value(run.terminal_gap)
    ));

    if let (Some(a_first), Some(a_last)) = (traj.a.first(), traj.a.last()) {
        out.push_str(&format!(
            "Assets: a(1) = {} -> a(T) = {}\n",
            fmt_value(*a_first),
            fmt_value(*a_last)
        ));
    }
    if let (Some(c_first), Some(c_last)) = (traj.c.first(), traj.c.last()) {
        out.push_str(&format!(
            "Consumption: c(1) = {} -> c(T) = {}\n",
            fmt_value(*c_first),
            fmt_value(*c_last)
        ));
    }

    if !run.finite {
        out.push_str("Warning: the solution contains non-finite values (is ρ close to zero?).\n");
    }

    out
}

/// Format the trajectory as a table, printing every `every`-th step and the last one.
pub fn format_trajectory_table(traj: &Trajectory, every: usize) -> String {
    let every = every.max(1);
    let mut out = String::new();

    out.push_str(&format!("{:>5} {:>16} {:>16}\n", "t", "a(t)", "c(t)"));
    out.push_str(&format!("{:->5} {:->16} {:->16}\n", "", "", ""));

    let last = traj.len().saturating_sub(1);
    for (i, ((t, a), c)) in traj.t.iter().zip(&traj.a).zip(&traj.c).enumerate() {
        if i % every != 0 && i != last {
            continue;
        }
        out.push_str(&format!("{:>5} {:>16} {:>16}\n", t, fmt_value(*a), fmt_value(*c)));
    }

    out
}

fn fmt_value(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v != 0.0 && (v.abs() < 1e-4 || v.abs() >= 1e6) {
        format!("{v:.6e}")
    } else {
        format!("{v:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_model;

    fn small_traj() -> Trajectory {
        Trajectory {
            c0: 0.5,
            t: vec![1, 2, 3],
            a: vec![0.75, 0.25, 0.0],
            c: vec![0.5, 0.5, 0.5],
        }
    }

    #[test]
    fn table_golden_snapshot_small() {
        let txt = format_trajectory_table(&small_traj(), 2);
        let expected = concat!(
            "    t             a(t)             c(t)\n",
            "----- ---------------- ----------------\n",
            "    1         0.750000         0.500000\n",
            "    3         0.000000         0.500000\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn table_every_zero_prints_all_rows() {
        let txt = format_trajectory_table(&small_traj(), 0);
        assert_eq!(txt.lines().count(), 5);
    }

    #[test]
    fn summary_mentions_parameters_and_c0() {
        let run = run_model(&ModelParameters::with_controls(0.05, 0.06, 5));
        let txt = format_run_summary(&run);
        assert!(txt.contains("ρ=0.05 r=0.06 T=5"));
        assert!(txt.contains("c0 = 0.226041"));
        assert!(!txt.contains("Warning"));
    }

    #[test]
    fn summary_flags_degenerate_runs() {
        let run = run_model(&ModelParameters::with_controls(0.0, 0.06, 5));
        let txt = format_run_summary(&run);
        assert!(txt.contains("NaN"));
        assert!(txt.contains("Warning"));
    }

    #[test]
    fn values_switch_to_scientific_when_tiny_or_huge() {
        assert_eq!(fmt_value(0.0), "0.000000");
        assert_eq!(fmt_value(1.5e-7), "1.500000e-7");
        assert_eq!(fmt_value(f64::INFINITY), "inf");
    }
}
