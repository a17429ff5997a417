//! Structure-file input for receptors and ligands
//!
//! Receptors and ligands arrive as fixed-column PDB/PDBQT text. Only the
//! atom coordinates matter for search-box placement, so parsing extracts the
//! coordinate triple from each `ATOM`/`HETATM` record and nothing else.

use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a structure file
#[derive(Error, Debug)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no valid atom coordinates found in {0}")]
    EmptyStructure(String),
}

/// Byte-offset layout of the coordinate fields in a fixed-column atom record.
///
/// PDB columns are 1-indexed in the format specification; the ranges here are
/// the equivalent 0-indexed byte ranges (x: columns 31-38, y: 39-46, z: 47-54).
#[derive(Debug, Clone)]
pub struct CoordinateColumns {
    pub x: Range<usize>,
    pub y: Range<usize>,
    pub z: Range<usize>,
}

/// Column layout shared by PDB and PDBQT atom records.
pub const COORDINATE_COLUMNS: CoordinateColumns = CoordinateColumns {
    x: 30..38,
    y: 38..46,
    z: 46..54,
};

impl CoordinateColumns {
    /// Extract one fixed-width field and parse it as a float.
    ///
    /// Returns `None` when the line is too short for the field or the field
    /// does not parse as a number.
    fn field(&self, line: &str, range: &Range<usize>) -> Option<f64> {
        line.get(range.clone())?.trim().parse::<f64>().ok()
    }

    /// Extract the (x, y, z) triple from an atom record.
    pub fn coordinates(&self, line: &str) -> Option<Vector3<f64>> {
        let x = self.field(line, &self.x)?;
        let y = self.field(line, &self.y)?;
        let z = self.field(line, &self.z)?;
        Some(Vector3::new(x, y, z))
    }
}

/// Is this line an atomic coordinate record?
pub fn is_coordinate_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

/// Parse a structure file into an ordered sequence of atom coordinates.
///
/// Coordinate records whose numeric fields are malformed are skipped without
/// aborting the file. A file that yields no coordinates at all is an error,
/// signaled after the whole file has been read.
pub fn parse_structure<P: AsRef<Path>>(path: P) -> Result<Vec<Vector3<f64>>, IoError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut coordinates = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if !is_coordinate_record(&line) {
            continue;
        }
        if let Some(position) = COORDINATE_COLUMNS.coordinates(&line) {
            coordinates.push(position);
        }
    }

    if coordinates.is_empty() {
        return Err(IoError::EmptyStructure(
            path.as_ref().display().to_string(),
        ));
    }

    Ok(coordinates)
}
