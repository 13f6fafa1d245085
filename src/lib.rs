//! # fv-rs
//!
//! A finite-volume solver for oil transport on unstructured 2D meshes.
//!
//! This crate provides the building blocks for simulating a scalar
//! contaminant advected by a steady current:
//! - Mesh representation (triangular control volumes, boundary segments,
//!   adjacency and outward edge-scaled normals)
//! - The oil transport problem (Gaussian initial spill, analytic velocity)
//! - Upwind numerical flux
//! - Explicit time stepping with a region-of-interest diagnostic
//! - Stability (Courant) diagnostics
//! - Restart and VTK snapshot I/O
//! - A TOML-configured run workflow

pub mod analysis;
pub mod config;
pub mod equations;
pub mod flux;
pub mod io;
pub mod mesh;
pub mod simulation;
pub mod solver;

// Re-export main types for convenience
pub use analysis::{cfl_report, CflReport};
pub use config::{ConfigError, RunConfig};
pub use equations::{initial_oil, velocity};
pub use flux::upwind_flux;
pub use io::{read_restart_field, write_restart_field, write_vtk_snapshot};
pub use mesh::{Cell, CellConnectivity, CellKind, Mesh, MeshError, Point};
pub use simulation::{run, RunError, RunReport};
pub use solver::{advance_cell, area_time_factor, Region, TransportError, TransportSolver};
