//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - model inputs (`ModelParameters`) and their input controls (`Slider`)
//! - computed outputs (`Trajectory`)
//! - the exported JSON schema (`TrajectoryFile`)

pub mod types;

pub use types::*;
