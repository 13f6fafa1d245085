//! Gmsh mesh file reading.
//!
//! Supports Gmsh MSH format version 2.2 (ASCII), the most widely supported
//! format for Gmsh meshes.
//!
//! ## Supported Element Types
//! - 2 = Triangle (3-node interior element)
//! - 1 = Line (2-node boundary segment)
//!
//! Any other element type is skipped silently, the way unknown connectivity
//! blocks are skipped during mesh assembly.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use super::cell::CellKind;
use super::mesh2d::CellConnectivity;
use super::point::Point;

/// Error type for Gmsh reading.
#[derive(Debug, Error)]
pub enum GmshError {
    /// File could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file content.
    #[error("parse error: {0}")]
    Parse(String),

    /// Unsupported mesh format version.
    #[error("unsupported Gmsh version: {0}")]
    UnsupportedVersion(String),

    /// Missing required section.
    #[error("missing section: {0}")]
    MissingSection(String),
}

/// Read a Gmsh MSH file (format 2.2).
///
/// Returns the point table and the typed connectivity records in file
/// order, ready for mesh assembly.
pub fn read_gmsh_mesh(path: &Path) -> Result<(Vec<Point>, Vec<CellConnectivity>), GmshError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = reader.lines();
    let mut points: Vec<Point> = Vec::new();
    let mut records: Vec<CellConnectivity> = Vec::new();

    while let Some(line_result) = lines.next() {
        let line = line_result?;
        let line = line.trim();

        if line.starts_with("$MeshFormat") {
            parse_mesh_format(&mut lines)?;
        } else if line.starts_with("$Nodes") {
            points = parse_nodes(&mut lines)?;
        } else if line.starts_with("$Elements") {
            records = parse_elements(&mut lines)?;
        }
    }

    if points.is_empty() {
        return Err(GmshError::MissingSection("Nodes".to_string()));
    }
    if records.is_empty() {
        return Err(GmshError::MissingSection("Elements".to_string()));
    }

    Ok((points, records))
}

/// Parse the $MeshFormat section.
fn parse_mesh_format<I>(lines: &mut I) -> Result<(), GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    if let Some(line_result) = lines.next() {
        let line = line_result?;
        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            return Err(GmshError::Parse("empty MeshFormat line".to_string()));
        }

        let version = parts[0];
        if !version.starts_with("2.") {
            return Err(GmshError::UnsupportedVersion(version.to_string()));
        }

        for line_result in lines.by_ref() {
            let line = line_result?;
            if line.trim().starts_with("$EndMeshFormat") {
                break;
            }
        }
    }
    Ok(())
}

/// Parse the $Nodes section.
fn parse_nodes<I>(lines: &mut I) -> Result<Vec<Point>, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let n_nodes = match lines.next() {
        Some(Ok(line)) => line
            .trim()
            .parse::<usize>()
            .map_err(|_| GmshError::Parse("invalid node count".to_string()))?,
        _ => return Err(GmshError::Parse("missing node count".to_string())),
    };

    let mut points = Vec::with_capacity(n_nodes);

    for _ in 0..n_nodes {
        if let Some(line_result) = lines.next() {
            let line = line_result?;
            let parts: Vec<&str> = line.trim().split_whitespace().collect();
            if parts.len() < 4 {
                return Err(GmshError::Parse(format!("invalid node line: {}", line)));
            }

            // Format: node_id x y z (z ignored for 2D)
            let x: f64 = parts[1]
                .parse()
                .map_err(|_| GmshError::Parse(format!("invalid x coordinate: {}", parts[1])))?;
            let y: f64 = parts[2]
                .parse()
                .map_err(|_| GmshError::Parse(format!("invalid y coordinate: {}", parts[2])))?;

            points.push(Point::new(x, y));
        }
    }

    for line_result in lines.by_ref() {
        let line = line_result?;
        if line.trim().starts_with("$EndNodes") {
            break;
        }
    }

    Ok(points)
}

/// Parse the $Elements section into connectivity records, in file order.
fn parse_elements<I>(lines: &mut I) -> Result<Vec<CellConnectivity>, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let n_elements = match lines.next() {
        Some(Ok(line)) => line
            .trim()
            .parse::<usize>()
            .map_err(|_| GmshError::Parse("invalid element count".to_string()))?,
        _ => return Err(GmshError::Parse("missing element count".to_string())),
    };

    let mut records = Vec::with_capacity(n_elements);

    for _ in 0..n_elements {
        if let Some(line_result) = lines.next() {
            let line = line_result?;
            let parts: Vec<&str> = line.trim().split_whitespace().collect();
            if parts.len() < 3 {
                return Err(GmshError::Parse(format!("invalid element line: {}", line)));
            }

            // Format: elem_id elem_type n_tags tag1 ... tagN node1 node2 ...
            let elem_type: i32 = parts[1]
                .parse()
                .map_err(|_| GmshError::Parse(format!("invalid element type: {}", parts[1])))?;
            let n_tags: usize = parts[2]
                .parse()
                .map_err(|_| GmshError::Parse(format!("invalid tag count: {}", parts[2])))?;

            let node_start = 3 + n_tags;
            let kind = match elem_type {
                1 => CellKind::Line,
                2 => CellKind::Triangle,
                // Quads, tetrahedra, points, ... are not control volumes here
                _ => continue,
            };

            let n_vertices = kind.n_vertices();
            if parts.len() < node_start + n_vertices {
                return Err(GmshError::Parse(format!(
                    "{:?} element needs {} nodes: {}",
                    kind, n_vertices, line
                )));
            }

            // Gmsh uses 1-based node indexing
            let mut vertices = Vec::with_capacity(n_vertices);
            for part in &parts[node_start..node_start + n_vertices] {
                let node: usize = part
                    .parse()
                    .map_err(|_| GmshError::Parse(format!("invalid node index: {}", part)))?;
                if node == 0 {
                    return Err(GmshError::Parse(format!("node index 0 in: {}", line)));
                }
                vertices.push(node - 1);
            }

            records.push(CellConnectivity::new(kind, vertices));
        }
    }

    for line_result in lines.by_ref() {
        let line = line_result?;
        if line.trim().starts_with("$EndElements") {
            break;
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_MSH: &str = "\
$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
1 0.0 0.0 0
2 1.0 0.0 0
3 0.0 1.0 0
4 1.0 1.0 0
$EndNodes
$Elements
4
1 1 2 0 1 1 2
2 2 2 0 1 1 2 3
3 2 2 0 1 2 4 3
4 15 2 0 1 1
$EndElements
";

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_sample_mesh() {
        let path = write_temp("fv_rs_gmsh_sample.msh", SAMPLE_MSH);
        let (points, records) = read_gmsh_mesh(&path).unwrap();

        assert_eq!(points.len(), 4);
        assert!((points[3].x - 1.0).abs() < 1e-14);
        assert!((points[3].y - 1.0).abs() < 1e-14);

        // Point element (type 15) is skipped; line + two triangles remain
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].kind, CellKind::Line);
        assert_eq!(records[0].vertices, vec![0, 1]);
        assert_eq!(records[1].kind, CellKind::Triangle);
        assert_eq!(records[1].vertices, vec![0, 1, 2]);
        assert_eq!(records[2].vertices, vec![1, 3, 2]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_gmsh_mesh(Path::new("/no/such/mesh.msh")).unwrap_err();
        assert!(matches!(err, GmshError::Io(_)));
    }

    #[test]
    fn test_unsupported_version() {
        let contents = "$MeshFormat\n4.1 0 8\n$EndMeshFormat\n";
        let path = write_temp("fv_rs_gmsh_v41.msh", contents);
        let err = read_gmsh_mesh(&path).unwrap_err();
        assert!(matches!(err, GmshError::UnsupportedVersion(_)));
    }

    #[test]
    fn test_missing_elements_section() {
        let contents = "\
$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
1
1 0.0 0.0 0
$EndNodes
";
        let path = write_temp("fv_rs_gmsh_noelem.msh", contents);
        let err = read_gmsh_mesh(&path).unwrap_err();
        assert!(matches!(err, GmshError::MissingSection(_)));
    }
}
