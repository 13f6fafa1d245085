//! Time-stepping orchestrator for the oil field.

use crate::mesh::{Mesh, Point};

use super::update::{advance_cell, TransportError};

/// Axis-aligned region of interest ("fishing grounds").
///
/// A cell counts toward the region diagnostic when its midpoint lies
/// strictly inside the rectangle; midpoints on the border are excluded.
#[derive(Clone, Copy, Debug)]
pub struct Region {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Region {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Build from `[[x_min, x_max], [y_min, y_max]]` as configured.
    pub fn from_borders(borders: [[f64; 2]; 2]) -> Self {
        Self::new(borders[0][0], borders[0][1], borders[1][0], borders[1][1])
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.x_min < p.x && p.x < self.x_max && self.y_min < p.y && p.y < self.y_max
    }
}

/// Owns a mesh and advances its oil field one explicit step at a time.
///
/// Each step updates every triangle, floors the result at zero (negative
/// concentrations are physically invalid), records a fresh snapshot of the
/// whole field, and reports the amount of oil inside the region of
/// interest. There is no upper-bound clamp: staying below 1 depends on the
/// caller choosing `dt` small relative to cell area and velocity, which
/// [`crate::analysis::cfl_report`] helps check.
pub struct TransportSolver {
    mesh: Mesh,
    time: f64,
    oil: Vec<f64>,
    region: Region,
}

impl TransportSolver {
    /// Start a simulation from the constructor-seeded field.
    pub fn new(mesh: Mesh, region: Region) -> Self {
        Self::with_restart(mesh, region, Vec::new(), 0.0)
    }

    /// Start from a restart snapshot.
    ///
    /// With `restart_time == 0.0` the snapshot is taken from each cell's
    /// seeded value and `restart_field` is ignored. Otherwise
    /// `restart_field` becomes the reported snapshot verbatim; it is
    /// assumed to be ordered by cell index and is not validated against
    /// the mesh.
    pub fn with_restart(
        mesh: Mesh,
        region: Region,
        restart_field: Vec<f64>,
        restart_time: f64,
    ) -> Self {
        let oil = if restart_time == 0.0 {
            mesh.cells.iter().map(|c| c.u).collect()
        } else {
            restart_field
        };
        Self {
            mesh,
            time: restart_time,
            oil,
            region,
        }
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Latest field snapshot, one value per cell in index order.
    pub fn field(&self) -> &[f64] {
        &self.oil
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Advance the field by one explicit step of size `dt`.
    ///
    /// Triangles are updated in index order and committed immediately, so
    /// later cells see earlier cells' post-update values within the same
    /// step; line cells are left untouched. Returns the sum of the field
    /// over cells whose midpoint lies strictly inside the region.
    pub fn step(&mut self, dt: f64) -> Result<f64, TransportError> {
        self.time += dt;

        for index in 0..self.mesh.cells.len() {
            if self.mesh.cells[index].is_triangle() {
                let u_new = advance_cell(&self.mesh, index, dt)?;
                self.mesh.cells[index].u = u_new.max(0.0);
            }
        }

        Ok(self.record_snapshot())
    }

    /// Advance the field by one simultaneous step of size `dt`.
    ///
    /// Every cell reads the pre-step field, and results are committed only
    /// after all updates are computed, so the update behaves as if fully
    /// parallel. Numerically different from [`step`](Self::step), which
    /// lets earlier cells' updates feed later ones within the same pass.
    #[cfg(feature = "parallel")]
    pub fn step_parallel(&mut self, dt: f64) -> Result<f64, TransportError> {
        use rayon::prelude::*;

        use super::update::advance_cell_with;

        self.time += dt;

        let prev: Vec<f64> = self.mesh.cells.iter().map(|c| c.u).collect();
        let updated: Vec<Option<f64>> = (0..self.mesh.cells.len())
            .into_par_iter()
            .map(|index| {
                if self.mesh.cells[index].is_triangle() {
                    advance_cell_with(&self.mesh, index, dt, |i| prev[i])
                        .map(|u| Some(u.max(0.0)))
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<_, TransportError>>()?;

        for (cell, u_new) in self.mesh.cells.iter_mut().zip(updated) {
            if let Some(u) = u_new {
                cell.u = u;
            }
        }

        Ok(self.record_snapshot())
    }

    /// Record the post-step snapshot and total the region of interest.
    fn record_snapshot(&mut self) -> f64 {
        let mut in_region = 0.0;
        self.oil.clear();
        self.oil.reserve(self.mesh.cells.len());
        for cell in &self.mesh.cells {
            self.oil.push(cell.u);
            if self.region.contains(cell.midpoint) {
                in_region += cell.u;
            }
        }
        in_region
    }
}
