//! Snapshot persistence: restart text files and VTK output.

mod restart;
mod vtk;

pub use restart::{read_restart_field, write_restart_field, RestartError};
pub use vtk::{write_vtk_snapshot, VtkError};
