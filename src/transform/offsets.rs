//! Per-class displacement input.
//!
//! Recentering consumes a mapping from class label to a signed pixel
//! displacement measured on the 2D class averages. The measurement itself
//! happens outside this crate; it arrives here as a headered CSV file with
//! `class`, `dx`, and `dy` columns, displacements in class-average pixels.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::TransformError;

const CLASS: &str = "class";
const DX: &str = "dx";
const DY: &str = "dy";

/// Mapping from class label to a measured (dx, dy) pixel displacement.
#[derive(Debug, Clone, Default)]
pub struct OffsetMap {
    by_class: HashMap<String, (f64, f64)>,
}

impl OffsetMap {
    /// Read an offset map from a CSV file on disk.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, TransformError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        Self::from_csv(reader)
    }

    /// Read an offset map from headered CSV text.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TransformError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, TransformError> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let position = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| TransformError::OffsetColumnMissing(name.to_string()))
        };
        let class_pos = position(CLASS)?;
        let dx_pos = position(DX)?;
        let dy_pos = position(DY)?;

        let mut by_class = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let class = record.get(class_pos).unwrap_or_default().to_string();
            let dx = parse_displacement(&class, record.get(dx_pos).unwrap_or_default())?;
            let dy = parse_displacement(&class, record.get(dy_pos).unwrap_or_default())?;
            if by_class.insert(class.clone(), (dx, dy)).is_some() {
                return Err(TransformError::DuplicateClass(class));
            }
        }

        Ok(Self { by_class })
    }

    /// Build an offset map from in-memory pairs. Later entries for the same
    /// class label overwrite earlier ones.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, (f64, f64))>,
    {
        Self {
            by_class: pairs.into_iter().collect(),
        }
    }

    /// Displacement measured for a class label, if any.
    pub fn get(&self, class: &str) -> Option<(f64, f64)> {
        self.by_class.get(class).copied()
    }

    /// Number of measured classes.
    pub fn len(&self) -> usize {
        self.by_class.len()
    }

    /// True when no class was measured.
    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }
}

fn parse_displacement(class: &str, token: &str) -> Result<f64, TransformError> {
    token.parse().map_err(|_| TransformError::InvalidOffset {
        class: class.to_string(),
        value: token.to_string(),
    })
}

/// Rotate a displacement measured on the class average into the particle's
/// micrograph frame using its in-plane rotation angle in degrees.
pub(crate) fn rotate(dx: f64, dy: f64, psi_degrees: f64) -> (f64, f64) {
    let (sin, cos) = psi_degrees.to_radians().sin_cos();
    (dx * cos + dy * sin, dy * cos - dx * sin)
}
