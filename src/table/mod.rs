//! # Particle Table
//!
//! In-memory model of one `data_particles` (or legacy `data_`) block: a
//! column registry, positional rows of typed cells, and an index keyed by the
//! particle identity column `rlnImageName`.
//!
//! ## Cell Model
//!
//! Cells are [`CellValue`] variants chosen by per-column type inference at
//! load time. String cells keep their token verbatim, so paths and image
//! references survive a read/write cycle byte for byte. Numeric cells
//! re-render in the fixed formats RELION itself emits.
//!
//! ## Identity Index
//!
//! Every row is reachable by its identity value through a hash index, which
//! makes row selection and joins independent of table order. Uniqueness of
//! the identity column is enforced at construction; every operation that
//! produces a new table preserves it.

use std::collections::HashMap;
use std::fmt;

use crate::schema::{columns, ColumnKind, ColumnRegistry};

mod error;
mod filter;
mod join;
mod query;


pub use error::{JoinError, TableError};
pub use join::JoinTable;
pub use query::ColumnStats;

/// One typed value in a particle table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Integer cell
    Int(i64),
    /// Floating-point cell
    Float(f64),
    /// String cell, kept verbatim as read
    Str(String),
}

impl CellValue {
    /// Materialize a token under the kind its column inferred.
    ///
    /// Inference has already proven every token of the column parses under
    /// `kind`, so the fallbacks here are unreachable in practice.
    pub(crate) fn from_token(kind: ColumnKind, token: &str) -> Self {
        match kind {
            ColumnKind::Int => token
                .parse()
                .map(CellValue::Int)
                .unwrap_or_else(|_| CellValue::Str(token.to_string())),
            ColumnKind::Float => token
                .parse()
                .map(CellValue::Float)
                .unwrap_or_else(|_| CellValue::Str(token.to_string())),
            ColumnKind::Str => CellValue::Str(token.to_string()),
        }
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Str(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    /// Renders the cell the way the writer emits it: integers bare, floats
    /// with six decimal places, strings verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v:.6}"),
            CellValue::Str(v) => f.write_str(v),
        }
    }
}

/// An identity-indexed table of particle metadata rows.
#[derive(Debug, Clone)]
pub struct ParticleTable {
    registry: ColumnRegistry,
    rows: Vec<Vec<CellValue>>,
    identity_ordinal: usize,
    index: HashMap<String, usize>,
}

impl ParticleTable {
    /// Build a table from a registry and materialized rows, enforcing the
    /// presence and uniqueness of the identity column.
    pub(crate) fn from_parts(
        registry: ColumnRegistry,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, TableError> {
        let identity_ordinal = registry
            .ordinal(columns::IMAGE_NAME)
            .ok_or(TableError::IndexColumnMissing)?;

        let mut index = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            let key = row[identity_ordinal].to_string();
            if index.insert(key.clone(), pos).is_some() {
                return Err(TableError::DuplicateIdentity(key));
            }
        }

        Ok(Self {
            registry,
            rows,
            identity_ordinal,
            index,
        })
    }

    /// Rebuild without uniqueness checks. Callers guarantee the rows came
    /// from an existing table and the identity column survived.
    fn assemble(
        registry: ColumnRegistry,
        rows: Vec<Vec<CellValue>>,
        identity_ordinal: usize,
    ) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(pos, row)| (row[identity_ordinal].to_string(), pos))
            .collect();
        Self {
            registry,
            rows,
            identity_ordinal,
            index,
        }
    }

    /// Column registry describing names, ordinals, and inferred kinds.
    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Number of particle rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Identity values in row order.
    pub fn identities(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row[self.identity_ordinal].to_string())
            .collect()
    }

    /// True when a particle with the given identity exists.
    pub fn contains_identity(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Cell at the intersection of an identity key and a column name.
    pub fn cell(&self, key: &str, column: &str) -> Option<&CellValue> {
        let row = *self.index.get(key)?;
        let ordinal = self.registry.ordinal(column)?;
        Some(&self.rows[row][ordinal])
    }

    pub(crate) fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub(crate) fn identity_ordinal(&self) -> usize {
        self.identity_ordinal
    }

    /// Rebuild this table around replacement contents that kept the
    /// identity column in place, as the recentering transform does.
    pub(crate) fn with_contents(
        &self,
        registry: ColumnRegistry,
        rows: Vec<Vec<CellValue>>,
    ) -> ParticleTable {
        ParticleTable::assemble(registry, rows, self.identity_ordinal)
    }
}
