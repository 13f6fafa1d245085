//! Mesh representation.
//!
//! Provides the geometric model for the finite-volume scheme:
//! - 2D points, shared through a single per-mesh table
//! - Triangle and Line cells with cached midpoints and adjacency lists
//! - Outward edge-scaled normals for flux integrals
//! - Gmsh mesh file reading
//! - A structured unit-square triangulation for tests and benchmarks

mod cell;
pub mod gmsh;
mod mesh2d;
mod point;

pub use cell::{Cell, CellKind};
pub use gmsh::{read_gmsh_mesh, GmshError};
pub use mesh2d::{CellConnectivity, Mesh, MeshError};
pub use point::Point;
