//! Closed-form life-cycle consumption model.
//!
//! The model is implemented as small, pure functions so that front-ends can
//! evaluate single points or whole trajectories without sharing state.

pub mod lifecycle;

pub use lifecycle::*;
