//! Finite-volume transport solver.
//!
//! [`update`] holds the per-cell explicit update; [`transport`] holds the
//! orchestrator that owns a mesh and advances the whole field step by step.

mod transport;
mod update;

pub use transport::{Region, TransportSolver};
pub use update::{advance_cell, area_time_factor, TransportError};
