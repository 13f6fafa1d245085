//! VTK output for field snapshots.
//!
//! Writes VTU (XML UnstructuredGrid) files for visualization in ParaView
//! and other VTK-compatible tools. Triangles and boundary lines are both
//! emitted as cells, with the oil field attached as per-cell data, so a
//! snapshot file lines up one-to-one with the solver's field vector.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::mesh::{CellKind, Mesh};

/// Error type for VTK operations.
#[derive(Debug, Error)]
pub enum VtkError {
    /// I/O error during file operations.
    #[error("VTK I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Field length does not match the mesh.
    #[error("field has {got} values but the mesh has {expected} cells")]
    FieldLengthMismatch { expected: usize, got: usize },
}

// VTK linear cell type ids
const VTK_LINE: u8 = 3;
const VTK_TRIANGLE: u8 = 5;

/// Write one field snapshot as a VTU file.
///
/// `field` must hold one value per cell in index order; `time` is stored
/// as VTK field data so series of snapshots carry their simulation times.
pub fn write_vtk_snapshot(
    path: &Path,
    mesh: &Mesh,
    field: &[f64],
    time: f64,
) -> Result<(), VtkError> {
    if field.len() != mesh.n_cells() {
        return Err(VtkError::FieldLengthMismatch {
            expected: mesh.n_cells(),
            got: field.len(),
        });
    }

    let file = File::create(path)?;
    let mut w = VtkWriter::new(file);

    w.header()?;
    w.open("UnstructuredGrid", &[])?;

    w.open("FieldData", &[])?;
    w.open(
        "DataArray",
        &[
            ("type", "Float64"),
            ("Name", "TimeValue"),
            ("NumberOfTuples", "1"),
            ("format", "ascii"),
        ],
    )?;
    w.line(&format!("{}", time))?;
    w.close("DataArray")?;
    w.close("FieldData")?;

    let n_points = mesh.points.len().to_string();
    let n_cells = mesh.n_cells().to_string();
    w.open(
        "Piece",
        &[
            ("NumberOfPoints", n_points.as_str()),
            ("NumberOfCells", n_cells.as_str()),
        ],
    )?;

    // Points (VTK wants 3 components; z = 0)
    w.open("Points", &[])?;
    w.open(
        "DataArray",
        &[
            ("type", "Float64"),
            ("NumberOfComponents", "3"),
            ("format", "ascii"),
        ],
    )?;
    for p in &mesh.points {
        w.line(&format!("{} {} 0", p.x, p.y))?;
    }
    w.close("DataArray")?;
    w.close("Points")?;

    // Cell connectivity, offsets and types
    w.open("Cells", &[])?;
    w.open(
        "DataArray",
        &[("type", "Int64"), ("Name", "connectivity"), ("format", "ascii")],
    )?;
    for cell in &mesh.cells {
        let ids: Vec<String> = cell.vertices.iter().map(|v| v.to_string()).collect();
        w.line(&ids.join(" "))?;
    }
    w.close("DataArray")?;

    w.open(
        "DataArray",
        &[("type", "Int64"), ("Name", "offsets"), ("format", "ascii")],
    )?;
    let mut offset = 0usize;
    for cell in &mesh.cells {
        offset += cell.vertices.len();
        w.line(&offset.to_string())?;
    }
    w.close("DataArray")?;

    w.open(
        "DataArray",
        &[("type", "UInt8"), ("Name", "types"), ("format", "ascii")],
    )?;
    for cell in &mesh.cells {
        let id = match cell.kind {
            CellKind::Triangle => VTK_TRIANGLE,
            CellKind::Line => VTK_LINE,
        };
        w.line(&id.to_string())?;
    }
    w.close("DataArray")?;
    w.close("Cells")?;

    // The oil field, one value per cell
    w.open("CellData", &[("Scalars", "oil")])?;
    w.open(
        "DataArray",
        &[("type", "Float64"), ("Name", "oil"), ("format", "ascii")],
    )?;
    for value in field {
        w.line(&format!("{}", value))?;
    }
    w.close("DataArray")?;
    w.close("CellData")?;

    w.close("Piece")?;
    w.close("UnstructuredGrid")?;
    w.footer()?;

    Ok(())
}

/// Minimal indenting XML writer for VTK files.
struct VtkWriter<W: Write> {
    writer: BufWriter<W>,
    indent: usize,
}

impl<W: Write> VtkWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            indent: 0,
        }
    }

    fn write_indent(&mut self) -> std::io::Result<()> {
        for _ in 0..self.indent {
            write!(self.writer, "  ")?;
        }
        Ok(())
    }

    fn header(&mut self) -> std::io::Result<()> {
        writeln!(self.writer, "<?xml version=\"1.0\"?>")?;
        writeln!(
            self.writer,
            "<VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">"
        )?;
        self.indent += 1;
        Ok(())
    }

    fn footer(&mut self) -> std::io::Result<()> {
        self.indent -= 1;
        writeln!(self.writer, "</VTKFile>")?;
        self.writer.flush()?;
        Ok(())
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> std::io::Result<()> {
        self.write_indent()?;
        write!(self.writer, "<{}", name)?;
        for (key, value) in attrs {
            write!(self.writer, " {}=\"{}\"", key, value)?;
        }
        writeln!(self.writer, ">")?;
        self.indent += 1;
        Ok(())
    }

    fn close(&mut self, name: &str) -> std::io::Result<()> {
        self.indent -= 1;
        self.write_indent()?;
        writeln!(self.writer, "</{}>", name)?;
        Ok(())
    }

    fn line(&mut self, content: &str) -> std::io::Result<()> {
        self.write_indent()?;
        writeln!(self.writer, "{}", content)?;
        Ok(())
    }
}
