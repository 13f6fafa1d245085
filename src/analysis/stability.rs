//! Stability diagnostics for the explicit scheme.
//!
//! The scheme enforces no CFL condition: a too-large `dt` simply produces
//! garbage. This module exposes the quantities that bound stability (cell
//! areas, velocity magnitudes, the per-cell Courant estimate) so callers
//! and test harnesses can check Courant-number bounds explicitly before
//! committing to a time step.

use crate::equations::{speed, velocity};
use crate::mesh::Mesh;

/// Stability-relevant quantities for a mesh and a candidate `dt`.
#[derive(Clone, Copy, Debug)]
pub struct CflReport {
    /// The time step the report was computed for.
    pub dt: f64,
    /// Smallest triangle area in the mesh.
    pub min_area: f64,
    /// Largest velocity magnitude over triangle midpoints.
    pub max_speed: f64,
    /// Largest per-cell Courant estimate: `dt/area * Σ_edges |v · n|`,
    /// where the normals carry the edge lengths. Infinite if any triangle
    /// is degenerate.
    pub max_courant: f64,
}

impl CflReport {
    /// Whether every cell's Courant estimate is at or below `limit`
    /// (1.0 is the usual explicit-scheme bound).
    pub fn is_within(&self, limit: f64) -> bool {
        self.max_courant <= limit
    }
}

/// Compute the stability report for `mesh` at time step `dt`.
pub fn cfl_report(mesh: &Mesh, dt: f64) -> CflReport {
    let mut min_area = f64::INFINITY;
    let mut max_speed: f64 = 0.0;
    let mut max_courant: f64 = 0.0;

    for cell in mesh.cells.iter().filter(|c| c.is_triangle()) {
        let area = cell.area(&mesh.points).unwrap_or(0.0);
        min_area = min_area.min(area);
        max_speed = max_speed.max(speed(cell.midpoint.x, cell.midpoint.y));

        let v = velocity(cell.midpoint.x, cell.midpoint.y);
        let outflow_weight: f64 = mesh
            .calculate_normals(cell.index)
            .iter()
            .map(|n| (v.0 * n.0 + v.1 * n.1).abs())
            .sum();

        let courant = if area > 0.0 {
            dt / area * outflow_weight
        } else {
            f64::INFINITY
        };
        max_courant = max_courant.max(courant);
    }

    CflReport {
        dt,
        min_area,
        max_speed,
        max_courant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::initial_oil;
    use crate::mesh::{Mesh, Point};

    fn spill_init(p: Point) -> f64 {
        initial_oil(p.x, p.y)
    }

    #[test]
    fn test_report_on_unit_square() {
        let n = 4;
        let mesh = Mesh::unit_square(n, spill_init);
        let report = cfl_report(&mesh, 0.001);

        // Each quad splits into two triangles of area 1/(2 n^2)
        let expected_area = 1.0 / (2.0 * (n * n) as f64);
        assert!((report.min_area - expected_area).abs() < 1e-12);
        assert!(report.max_speed > 0.0);
        assert!(report.max_courant.is_finite());
        assert!(report.max_courant > 0.0);
    }

    #[test]
    fn test_courant_scales_linearly_with_dt() {
        let mesh = Mesh::unit_square(3, spill_init);
        let small = cfl_report(&mesh, 0.001);
        let large = cfl_report(&mesh, 0.01);
        assert!((large.max_courant - 10.0 * small.max_courant).abs() < 1e-10);
    }

    #[test]
    fn test_is_within() {
        let mesh = Mesh::unit_square(3, spill_init);
        let report = cfl_report(&mesh, 1e-9);
        assert!(report.is_within(1.0));

        let report = cfl_report(&mesh, 1e9);
        assert!(!report.is_within(1.0));
    }
}
