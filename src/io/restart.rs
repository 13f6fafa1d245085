//! Restart-file persistence for field snapshots.
//!
//! The format is deliberately plain: one field value per line, in cell
//! index order. A file written by [`write_restart_field`] can be handed
//! back to a later run as its restart field.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for restart-file operations.
#[derive(Debug, Error)]
pub enum RestartError {
    /// The file could not be read.
    #[error("failed to read restart file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be written.
    #[error("failed to write restart file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line did not parse as a floating-point value.
    #[error("restart file {path}, line {line}: invalid value {value:?}")]
    Parse {
        path: PathBuf,
        line: usize,
        value: String,
    },
}

/// Read a field snapshot, one value per line in cell index order.
pub fn read_restart_field(path: &Path) -> Result<Vec<f64>, RestartError> {
    let read_err = |source| RestartError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let reader = BufReader::new(file);

    let mut field = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(read_err)?;
        let value = line.trim();
        if value.is_empty() {
            continue;
        }
        let parsed: f64 = value.parse().map_err(|_| RestartError::Parse {
            path: path.to_path_buf(),
            line: line_no + 1,
            value: value.to_string(),
        })?;
        field.push(parsed);
    }

    Ok(field)
}

/// Write a field snapshot, one value per line in cell index order.
pub fn write_restart_field(path: &Path, field: &[f64]) -> Result<(), RestartError> {
    let write_err = |source| RestartError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    for value in field {
        writeln!(writer, "{}", value).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let path = std::env::temp_dir().join("fv_rs_restart_roundtrip.txt");
        let field = vec![0.0, 0.25, 1.0, 1e-12, 0.9999999999999];

        write_restart_field(&path, &field).unwrap();
        let read_back = read_restart_field(&path).unwrap();
        assert_eq!(read_back, field);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = read_restart_field(Path::new("/no/such/solution.txt")).unwrap_err();
        assert!(err.to_string().contains("/no/such/solution.txt"));
    }

    #[test]
    fn test_bad_value_names_line() {
        let path = std::env::temp_dir().join("fv_rs_restart_bad.txt");
        std::fs::write(&path, "0.5\nnot-a-number\n0.25\n").unwrap();

        let err = read_restart_field(&path).unwrap_err();
        assert!(matches!(err, RestartError::Parse { line: 2, .. }));
    }
}
