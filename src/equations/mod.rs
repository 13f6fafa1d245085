//! Problem definitions: initial condition and velocity field.

pub mod oil;

pub use oil::{initial_oil, speed, velocity, SPILL_CENTER, SPILL_WIDTH};
