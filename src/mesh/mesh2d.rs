//! Unstructured 2D mesh of triangular control volumes and boundary lines.
//!
//! The mesh stores:
//! - A shared point table (every vertex appears exactly once)
//! - An ordered cell list (indices assigned in creation order)
//!
//! Adjacency is resolved in a single pass right after assembly: a triangle
//! is a neighbor of any other cell it shares at least two vertex indices
//! with. Line cells never look for neighbors. After construction only the
//! per-cell field value mutates; cells are never re-indexed or destroyed.

use std::path::Path;

use thiserror::Error;

use super::cell::{Cell, CellKind};
use super::gmsh::{self, GmshError};
use super::point::Point;

/// Error type for mesh construction.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The mesh file could not be read or parsed.
    #[error("failed to read mesh file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: GmshError,
    },

    /// A connectivity record references a point outside the point table.
    #[error("cell {cell}: vertex index {vertex} out of range ({n_points} points)")]
    VertexOutOfRange {
        cell: usize,
        vertex: usize,
        n_points: usize,
    },

    /// A connectivity record has the wrong number of vertices for its kind.
    #[error("cell {cell}: {kind:?} cell needs {expected} vertices, got {got}")]
    WrongVertexCount {
        cell: usize,
        kind: CellKind,
        expected: usize,
        got: usize,
    },
}

/// A typed cell-connectivity record, as supplied by mesh readers.
#[derive(Clone, Debug)]
pub struct CellConnectivity {
    pub kind: CellKind,
    pub vertices: Vec<usize>,
}

impl CellConnectivity {
    pub fn new(kind: CellKind, vertices: Vec<usize>) -> Self {
        Self { kind, vertices }
    }
}

/// Unstructured mesh: shared point table plus ordered cells.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex coordinates. Cells reference these by index.
    pub points: Vec<Point>,
    /// All cells in index order.
    pub cells: Vec<Cell>,
}

impl Mesh {
    /// Build a mesh from a point table and typed connectivity records.
    ///
    /// Cell indices follow record order. Each cell's field value is seeded
    /// from `init` evaluated at its midpoint, and neighbor lists are
    /// resolved before the mesh is returned.
    pub fn from_connectivity(
        points: Vec<Point>,
        records: Vec<CellConnectivity>,
        init: impl Fn(Point) -> f64,
    ) -> Result<Self, MeshError> {
        let mut cells = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let expected = record.kind.n_vertices();
            if record.vertices.len() != expected {
                return Err(MeshError::WrongVertexCount {
                    cell: index,
                    kind: record.kind,
                    expected,
                    got: record.vertices.len(),
                });
            }
            if let Some(&vertex) = record.vertices.iter().find(|&&v| v >= points.len()) {
                return Err(MeshError::VertexOutOfRange {
                    cell: index,
                    vertex,
                    n_points: points.len(),
                });
            }
            cells.push(Cell::new(index, record.kind, record.vertices, &points, &init));
        }

        let mut mesh = Self { points, cells };
        mesh.find_neighbors();
        Ok(mesh)
    }

    /// Read a Gmsh MSH 2.2 file and build the mesh from it.
    ///
    /// Any failure is reported as a single error naming the offending file;
    /// no partially constructed mesh is ever returned.
    pub fn from_file(path: &Path, init: impl Fn(Point) -> f64) -> Result<Self, MeshError> {
        let (points, records) = gmsh::read_gmsh_mesh(path).map_err(|source| MeshError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connectivity(points, records, init)
    }

    /// Structured triangulation of the unit square: `n × n` quads, each
    /// split into two triangles, with line cells along the four boundaries.
    ///
    /// Triangles come first in index order, then the boundary lines.
    pub fn unit_square(n: usize, init: impl Fn(Point) -> f64) -> Self {
        assert!(n > 0, "Need at least one quad in each direction");

        let h = 1.0 / n as f64;
        let mut points = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            for i in 0..=n {
                points.push(Point::new(i as f64 * h, j as f64 * h));
            }
        }

        let vid = |i: usize, j: usize| j * (n + 1) + i;
        let mut records = Vec::with_capacity(2 * n * n + 4 * n);

        for j in 0..n {
            for i in 0..n {
                let v00 = vid(i, j);
                let v10 = vid(i + 1, j);
                let v01 = vid(i, j + 1);
                let v11 = vid(i + 1, j + 1);
                records.push(CellConnectivity::new(CellKind::Triangle, vec![v00, v10, v11]));
                records.push(CellConnectivity::new(CellKind::Triangle, vec![v00, v11, v01]));
            }
        }

        for i in 0..n {
            records.push(CellConnectivity::new(CellKind::Line, vec![vid(i, 0), vid(i + 1, 0)]));
            records.push(CellConnectivity::new(CellKind::Line, vec![vid(i, n), vid(i + 1, n)]));
            records.push(CellConnectivity::new(CellKind::Line, vec![vid(0, i), vid(0, i + 1)]));
            records.push(CellConnectivity::new(CellKind::Line, vec![vid(n, i), vid(n, i + 1)]));
        }

        // Generated connectivity is valid by construction
        Self::from_connectivity(points, records, init)
            .expect("unit_square produced invalid connectivity")
    }

    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn n_triangles(&self) -> usize {
        self.cells.iter().filter(|c| c.is_triangle()).count()
    }

    /// Resolve every cell's neighbor list in mesh iteration order.
    ///
    /// A triangle's neighbors are all other cells (of any kind) sharing at
    /// least two vertex indices with it; line cells get no neighbors.
    fn find_neighbors(&mut self) {
        let mut all_neighbors: Vec<Vec<usize>> = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            let neighbors = match cell.kind {
                CellKind::Line => Vec::new(),
                CellKind::Triangle => self
                    .cells
                    .iter()
                    .filter(|other| {
                        other.index != cell.index && shared_vertices(cell, other).len() >= 2
                    })
                    .map(|other| other.index)
                    .collect(),
            };
            all_neighbors.push(neighbors);
        }
        for (cell, neighbors) in self.cells.iter_mut().zip(all_neighbors) {
            cell.neighbors = neighbors;
        }
    }

    /// Outward scaled normals from `index` to each of its neighbors, in
    /// neighbor-list order.
    ///
    /// Each normal is the shared edge rotated 90°; its length equals the
    /// edge length, so flux terms approximate the edge integral directly.
    /// Neighbors without exactly two shared vertices are skipped, so the
    /// returned list can be shorter than the neighbor list; consumers pair
    /// the two positionally.
    pub fn calculate_normals(&self, index: usize) -> Vec<(f64, f64)> {
        let cell = &self.cells[index];
        let mut normals = Vec::with_capacity(cell.neighbors.len());

        for &neighbor_index in &cell.neighbors {
            if neighbor_index >= self.cells.len() {
                continue;
            }
            let neighbor = &self.cells[neighbor_index];

            let shared = shared_vertices(cell, neighbor);
            if shared.len() != 2 {
                continue;
            }
            let p1 = self.points[shared[0]];
            let p2 = self.points[shared[1]];

            // Edge rotated 90 degrees, scaled by edge length
            let (ex, ey) = p2.delta(&p1);
            let mut normal = (-ey, ex);

            // Orient outward: flip if it points back toward the midpoint
            let (mx, my) = p2.delta(&cell.midpoint);
            if mx * normal.0 + my * normal.1 < 0.0 {
                normal = (-normal.0, -normal.1);
            }

            normals.push(normal);
        }

        normals
    }
}

/// Vertex indices present in both cells, in `cell`'s vertex order.
fn shared_vertices(cell: &Cell, other: &Cell) -> Vec<usize> {
    cell.vertices
        .iter()
        .filter(|v| other.vertices.contains(v))
        .copied()
        .collect()
}
