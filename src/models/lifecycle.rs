//! Analytical solution of the finite-horizon consumption/savings problem.
//!
//! Assets accumulate as `da/dt = r·a − c` and optimal consumption grows as
//! `dc/dt = (r − ρ)·c`. With boundary conditions `a(0) = a0` and `a(T) = aT`
//! the system has a unique solution:
//!
//! - `c0   = ρ (aT·e^{-rT} − a0) / (e^{-ρT} − 1)`
//! - `a(t) = e^{rt} (c0/ρ · e^{-ρt} + a0 − c0/ρ)`
//! - `c(t) = c0 · e^{(r−ρ)t}`
//!
//! Numerical notes:
//! - Nothing is clamped or rounded. Negative or very large values are part of
//!   the model, not errors.
//! - `ρ = 0` makes the denominator of `c0` zero; the resulting inf/NaN is
//!   propagated through every value. Input surfaces keep `ρ` away from zero.

use crate::domain::{ModelParameters, Trajectory};

/// Optimal initial consumption `c0`.
pub fn initial_consumption(params: &ModelParameters) -> f64 {
    let horizon = f64::from(params.horizon);
    let numer = params.rho * (params.a_t * (-params.r * horizon).exp() - params.a0);
    let denom = (-params.rho * horizon).exp() - 1.0;
    numer / denom
}

/// Asset level `a(t)` given `c0`.
pub fn assets_at(params: &ModelParameters, c0: f64, t: f64) -> f64 {
    let scaled = c0 / params.rho;
    (params.r * t).exp() * (scaled * (-params.rho * t).exp() + params.a0 - scaled)
}

/// Consumption level `c(t)` given `c0`.
pub fn consumption_at(params: &ModelParameters, c0: f64, t: f64) -> f64 {
    c0 * (params.growth_rate() * t).exp()
}

/// Evaluate the optimal paths on `t = 1..=T`.
pub fn calculate_trajectory(params: &ModelParameters) -> Trajectory {
    let c0 = initial_consumption(params);
    let t: Vec<u32> = (1..=params.horizon).collect();
    let a = t.iter().map(|&ti| assets_at(params, c0, f64::from(ti))).collect();
    let c = t.iter().map(|&ti| consumption_at(params, c0, f64::from(ti))).collect();

    Trajectory { c0, t, a, c }
}

/// `a(T)` reconstructed from the closed form. Should equal `aT` up to rounding.
pub fn terminal_assets(params: &ModelParameters) -> f64 {
    let c0 = initial_consumption(params);
    assets_at(params, c0, f64::from(params.horizon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const TOL: f64 = 1e-9;

    fn params(rho: f64, r: f64, a0: f64, a_t: f64, horizon: u32) -> ModelParameters {
        ModelParameters {
            rho,
            r,
            a0,
            a_t,
            horizon,
        }
    }

    #[test]
    fn small_horizon_matches_reference_values() {
        let p = params(0.05, 0.06, 1.0, 0.0, 5);
        let traj = calculate_trajectory(&p);

        assert_eq!(traj.t, vec![1, 2, 3, 4, 5]);
        assert_eq!(traj.a.len(), 5);
        assert_eq!(traj.c.len(), 5);

        assert!((traj.c0 - 0.22604058320938994).abs() < TOL, "c0 = {}", traj.c0);
        assert!((traj.a[0] - 0.8277200782311491).abs() < TOL, "a(1) = {}", traj.a[0]);
        assert!((traj.c[0] - 0.22831232883844707).abs() < TOL, "c(1) = {}", traj.c[0]);

        // Same values straight from the formulas.
        let c0 = 0.05 * (0.0 * (-0.06_f64 * 5.0).exp() - 1.0) / ((-0.05_f64 * 5.0).exp() - 1.0);
        let a1 = (0.06_f64).exp() * (c0 / 0.05 * (-0.05_f64).exp() + 1.0 - c0 / 0.05);
        let c1 = c0 * (0.01_f64).exp();
        assert!((traj.a[0] - a1).abs() < TOL);
        assert!((traj.c[0] - c1).abs() < TOL);
    }

    #[test]
    fn default_parameters_are_finite() {
        let traj = calculate_trajectory(&ModelParameters::default());
        assert_eq!(traj.len(), 100);
        assert!(traj.is_finite());
        assert!((traj.c0 - 0.050339182745315215).abs() < TOL);
    }

    #[test]
    fn terminal_assets_hit_boundary() {
        let p = ModelParameters::default();
        assert!(terminal_assets(&p).abs() < 1e-6);

        let traj = calculate_trajectory(&p);
        let last = traj.a.last().copied().unwrap_or(f64::NAN);
        assert!((last - p.a_t).abs() < 1e-6, "a(T) = {last}");

        let bequest = params(0.03, 0.07, 2.0, 0.5, 40);
        assert!((terminal_assets(&bequest) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn equal_rates_give_flat_consumption() {
        let p = params(0.04, 0.04, 1.0, 0.0, 30);
        let traj = calculate_trajectory(&p);
        for &c in &traj.c {
            assert!((c - traj.c0).abs() < 1e-12, "c = {c}, c0 = {}", traj.c0);
        }
    }

    #[test]
    fn zero_discount_rate_propagates_non_finite_values() {
        let p = params(0.0, 0.06, 1.0, 0.0, 10);
        let traj = calculate_trajectory(&p);
        assert_eq!(traj.len(), 10);
        assert!(!traj.c0.is_finite());
        assert!(!traj.is_finite());
    }

    #[test]
    fn doubling_initial_assets_doubles_everything() {
        let base = params(0.05, 0.06, 1.0, 0.0, 50);
        let doubled = params(0.05, 0.06, 2.0, 0.0, 50);
        let x = calculate_trajectory(&base);
        let y = calculate_trajectory(&doubled);

        assert!((y.c0 - 2.0 * x.c0).abs() < TOL);
        for i in 0..x.len() {
            assert!((y.a[i] - 2.0 * x.a[i]).abs() < TOL);
            assert!((y.c[i] - 2.0 * x.c[i]).abs() < TOL);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_lengths_and_grid(rho_step in 1u32..=10, r_step in 1u32..=10, horizon in 2u32..=100) {
            let p = params(f64::from(rho_step) * 0.01, f64::from(r_step) * 0.01, 1.0, 0.0, horizon);
            let traj = calculate_trajectory(&p);

            prop_assert_eq!(traj.t.len(), horizon as usize);
            prop_assert_eq!(traj.a.len(), horizon as usize);
            prop_assert_eq!(traj.c.len(), horizon as usize);
            prop_assert!(traj.t.iter().copied().eq(1..=horizon));
            prop_assert!(traj.is_finite());
        }

        #[test]
        fn prop_terminal_condition(rho_step in 1u32..=10, r_step in 1u32..=10, horizon in 2u32..=100) {
            let p = params(f64::from(rho_step) * 0.01, f64::from(r_step) * 0.01, 1.0, 0.0, horizon);
            let a_end = terminal_assets(&p);
            prop_assert!(a_end.abs() < 1e-6, "a(T) = {}", a_end);
        }

        #[test]
        fn prop_homogeneous_in_initial_assets(
            rho_step in 1u32..=10,
            r_step in 1u32..=10,
            horizon in 2u32..=60,
            scale in 0.5f64..4.0,
        ) {
            let rho = f64::from(rho_step) * 0.01;
            let r = f64::from(r_step) * 0.01;
            let x = calculate_trajectory(&params(rho, r, 1.0, 0.0, horizon));
            let y = calculate_trajectory(&params(rho, r, scale, 0.0, horizon));
            for i in 0..x.len() {
                let tol = 1e-9 * (1.0 + x.c[i].abs() * scale);
                prop_assert!((y.c[i] - scale * x.c[i]).abs() < tol);
            }
        }
    }
}
