//! Error types for table construction, row selection, and joins.

use thiserror::Error;

use crate::schema::columns;

/// Errors raised while building a particle table or selecting rows from it
#[derive(Debug, Error)]
pub enum TableError {
    /// The identity column is not declared in the table
    #[error("index column {} is not declared in the table", columns::IMAGE_NAME)]
    IndexColumnMissing,

    /// Two rows carry the same identity value
    #[error("duplicate identity key: {0}")]
    DuplicateIdentity(String),

    /// Row selection requested identities the table does not contain
    #[error("{missing} of {requested} requested identity keys not present in table")]
    KeySubsetViolation {
        /// Number of requested keys with no matching row
        missing: usize,
        /// Total number of requested keys
        requested: usize,
    },
}

/// Errors raised while joining a secondary table onto the particle table
#[derive(Debug, Error)]
pub enum JoinError {
    /// The join column is absent from one of the two tables
    #[error("join column {column} not present in {table} table")]
    JoinKeyMissing {
        /// Column the join was requested on
        column: String,
        /// Which side is missing it, `"particle"` or `"secondary"`
        table: &'static str,
    },

    /// The secondary table repeats a join key, making the match ambiguous
    #[error("duplicate join key in secondary table: {0}")]
    DuplicateKey(String),

    /// An appended column is already present in the particle table
    #[error("column already present in particle table: {0}")]
    DuplicateColumn(String),

    /// The secondary table could not be read
    #[error("failed to read secondary table: {0}")]
    Csv(#[from] csv::Error),
}
