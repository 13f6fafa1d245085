//! Cell types for the finite-volume mesh.
//!
//! A cell is a control volume: triangles are the interior elements the
//! transport scheme advances, lines are boundary segments that carry a
//! field value but never exchange flux. Cells store vertex *indices* into
//! the mesh point table, so "shared vertex" is plain index equality.

use super::point::Point;

/// The two cell kinds the mesh supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Interior element (3 vertices), advanced by the transport scheme.
    Triangle,
    /// Boundary segment (2 vertices), never advanced, never a flux owner.
    Line,
}

impl CellKind {
    /// Number of vertices a cell of this kind must reference.
    pub fn n_vertices(&self) -> usize {
        match self {
            CellKind::Triangle => 3,
            CellKind::Line => 2,
        }
    }
}

/// A single cell in the mesh.
#[derive(Clone, Debug)]
pub struct Cell {
    /// Unique index within the mesh, assigned in creation order.
    pub index: usize,
    /// Triangle or Line.
    pub kind: CellKind,
    /// Indices into the mesh point table (3 for Triangle, 2 for Line).
    pub vertices: Vec<usize>,
    /// Geometric center, cached at construction and never recomputed.
    pub midpoint: Point,
    /// Indices of neighboring cells, resolved in one pass after assembly.
    pub neighbors: Vec<usize>,
    /// Oil concentration. Seeded at construction, mutated only by the
    /// transport solver (and only for triangles).
    pub u: f64,
}

impl Cell {
    /// Construct a cell. The midpoint is computed once here; `u` is seeded
    /// from `init` evaluated at that midpoint.
    pub(super) fn new(
        index: usize,
        kind: CellKind,
        vertices: Vec<usize>,
        points: &[Point],
        init: &dyn Fn(Point) -> f64,
    ) -> Self {
        let midpoint = midpoint_of(&vertices, points);
        let u = init(midpoint);
        Self {
            index,
            kind,
            vertices,
            midpoint,
            neighbors: Vec::new(),
            u,
        }
    }

    pub fn is_triangle(&self) -> bool {
        self.kind == CellKind::Triangle
    }

    /// Unsigned area of a triangular cell, by the cross-product formula.
    ///
    /// Returns `None` for line cells. Degenerate (collinear) triangles
    /// yield 0.0 here; the time-stepping factor `dt/area` is where that
    /// becomes an error, since it is the only consumer that divides.
    pub fn area(&self, points: &[Point]) -> Option<f64> {
        match self.kind {
            CellKind::Line => None,
            CellKind::Triangle => {
                let p1 = points[self.vertices[0]];
                let p2 = points[self.vertices[1]];
                let p3 = points[self.vertices[2]];
                Some(0.5 * ((p1.x - p3.x) * (p2.y - p1.y) - (p1.x - p2.x) * (p3.y - p1.y)).abs())
            }
        }
    }
}

/// Coordinate-wise mean of the referenced points.
fn midpoint_of(vertices: &[usize], points: &[Point]) -> Point {
    let n = vertices.len() as f64;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &v| (sx + points[v].x, sy + points[v].y));
    Point::new(sx / n, sy / n)
}
