//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the calculator and front-ends
//! - exported to JSON/CSV
//! - reloaded later for plotting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Tolerance used when checking a float against slider bounds.
const BOUND_EPS: f64 = 1e-9;

/// A bounded, stepped input control.
///
/// The range and step bound `ρ` away from zero so the closed form never divides
/// by `exp(-ρT) - 1 = 0` in normal operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

/// Discount rate control.
pub const RHO_SLIDER: Slider = Slider {
    label: "ρ (rho)",
    min: 0.01,
    max: 0.10,
    step: 0.01,
    default: 0.05,
};

/// Interest rate control.
pub const RATE_SLIDER: Slider = Slider {
    label: "r",
    min: 0.01,
    max: 0.10,
    step: 0.01,
    default: 0.06,
};

/// Time horizon control (integer steps).
pub const HORIZON_SLIDER: Slider = Slider {
    label: "T (time horizon)",
    min: 2.0,
    max: 100.0,
    step: 1.0,
    default: 100.0,
};

/// Initial assets. Not exposed as an input.
pub const DEFAULT_INITIAL_ASSETS: f64 = 1.0;

/// Terminal assets (zero bequest). Not exposed as an input.
pub const DEFAULT_TERMINAL_ASSETS: f64 = 0.0;

impl Slider {
    /// Whether `value` lies inside `[min, max]` (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min - BOUND_EPS && value <= self.max + BOUND_EPS
    }

    /// Move `value` by `delta` steps, snapping to the step grid and clamping into range.
    pub fn step_by(&self, value: f64, delta: i32) -> f64 {
        let k = (value / self.step).round() + f64::from(delta);
        (k * self.step).clamp(self.min, self.max)
    }

    fn check(&self, value: f64) -> Result<(), AppError> {
        if self.contains(value) {
            return Ok(());
        }
        Err(AppError::new(
            2,
            format!(
                "{} = {value} is outside the allowed range [{}, {}].",
                self.label, self.min, self.max
            ),
        ))
    }
}

/// Inputs to the life-cycle consumption problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Subjective discount rate `ρ`.
    pub rho: f64,
    /// Interest rate `r` earned on assets.
    pub r: f64,
    /// Initial assets `a(0)`.
    pub a0: f64,
    /// Terminal assets `a(T)`.
    pub a_t: f64,
    /// Horizon `T` (number of integer time steps).
    pub horizon: u32,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            rho: RHO_SLIDER.default,
            r: RATE_SLIDER.default,
            a0: DEFAULT_INITIAL_ASSETS,
            a_t: DEFAULT_TERMINAL_ASSETS,
            horizon: HORIZON_SLIDER.default as u32,
        }
    }
}

impl ModelParameters {
    /// Parameters with the fixed boundary assets and the given controls.
    pub fn with_controls(rho: f64, r: f64, horizon: u32) -> Self {
        Self {
            rho,
            r,
            horizon,
            ..Self::default()
        }
    }

    /// Check the user-facing controls against their slider ranges.
    ///
    /// The calculator itself never validates; only input surfaces call this.
    pub fn validate(&self) -> Result<(), AppError> {
        RHO_SLIDER.check(self.rho)?;
        RATE_SLIDER.check(self.r)?;
        HORIZON_SLIDER.check(f64::from(self.horizon))?;
        Ok(())
    }

    /// Consumption growth rate `r - ρ`.
    pub fn growth_rate(&self) -> f64 {
        self.r - self.rho
    }
}

/// Optimal asset and consumption paths on the grid `t = 1..=T`.
///
/// `t`, `a` and `c` are parallel and always have length `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Optimal initial consumption.
    pub c0: f64,
    pub t: Vec<u32>,
    pub a: Vec<f64>,
    pub c: Vec<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// `(t, a(t))` pairs for plotting.
    pub fn asset_series(&self) -> Vec<(f64, f64)> {
        self.t.iter().map(|&t| f64::from(t)).zip(self.a.iter().copied()).collect()
    }

    /// `(t, c(t))` pairs for plotting.
    pub fn consumption_series(&self) -> Vec<(f64, f64)> {
        self.t.iter().map(|&t| f64::from(t)).zip(self.c.iter().copied()).collect()
    }

    /// Whether every asset and consumption value is finite.
    pub fn is_finite(&self) -> bool {
        self.c0.is_finite()
            && self.a.iter().all(|v| v.is_finite())
            && self.c.iter().all(|v| v.is_finite())
    }
}

/// A saved trajectory file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub parameters: ModelParameters,
    pub terminal_assets: f64,
    pub trajectory: Trajectory,
}
