//! Explicit per-cell update for the finite-volume scheme.

use thiserror::Error;

use crate::equations::velocity;
use crate::flux::upwind_flux;
use crate::mesh::Mesh;

/// Error type for the transport scheme.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A triangle subjected to the update has zero or negative area.
    /// Fatal to the step that produced it; never silently handled.
    #[error("degenerate geometry: cell area {area} is zero or negative")]
    DegenerateArea { area: f64 },

    /// The update was asked to advance a boundary segment.
    #[error("cell {index} is a boundary segment and cannot be advanced")]
    NotATriangle { index: usize },
}

/// The explicit time-stepping factor `dt / area`.
///
/// Computed separately from the flux loop so degenerate geometry is caught
/// at the single point that divides by the area.
pub fn area_time_factor(area: f64, dt: f64) -> Result<f64, TransportError> {
    if area <= 0.0 {
        return Err(TransportError::DegenerateArea { area });
    }
    Ok(dt / area)
}

/// Advance one triangular cell by `dt`, reading field values through `field`.
///
/// The owner value is updated in place across the neighbor loop, so each
/// successive flux is computed against the progressively-updated owner
/// state; reordering the neighbor loop changes the result.
pub(crate) fn advance_cell_with(
    mesh: &Mesh,
    index: usize,
    dt: f64,
    field: impl Fn(usize) -> f64,
) -> Result<f64, TransportError> {
    let cell = &mesh.cells[index];
    let area = cell
        .area(&mesh.points)
        .ok_or(TransportError::NotATriangle { index })?;
    let factor = area_time_factor(area, dt)?;

    let mut u_new = field(index);
    let v_owner = velocity(cell.midpoint.x, cell.midpoint.y);
    let normals = mesh.calculate_normals(index);

    for (&neighbor_index, &normal) in cell.neighbors.iter().zip(normals.iter()) {
        if neighbor_index >= mesh.cells.len() {
            continue;
        }
        let neighbor = &mesh.cells[neighbor_index];

        // Boundary segments contribute zero state across the shared edge
        let u_neighbor = if neighbor.is_triangle() {
            field(neighbor_index)
        } else {
            0.0
        };
        let v_neighbor = velocity(neighbor.midpoint.x, neighbor.midpoint.y);

        let flux = upwind_flux(u_new, u_neighbor, normal, v_owner, v_neighbor);
        u_new -= factor * flux;
    }

    Ok(u_new)
}

/// Explicit forward update for one triangular cell.
///
/// Reads the current field values held by the mesh. The result is not
/// clamped; flooring at zero is the solver's per-step policy.
pub fn advance_cell(mesh: &Mesh, index: usize, dt: f64) -> Result<f64, TransportError> {
    advance_cell_with(mesh, index, dt, |i| mesh.cells[i].u)
}
