use crate::schema::OpticsError;
use crate::table::TableError;

/// Errors that can occur while reading a STAR file
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The header does not describe a readable particle table
    #[error("malformed header at line {line}: {reason}")]
    MalformedHeader {
        /// 1-based line number the parser gave up on
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A data row does not match the declared column count
    #[error("row at line {line} has {found} values, header declares {expected}")]
    RecordShapeMismatch {
        /// 1-based line number of the offending row
        line: usize,
        /// Number of declared columns
        expected: usize,
        /// Number of values found on the row
        found: usize,
    },

    /// The optics block could not be interpreted
    #[error("optics error: {0}")]
    Optics(#[from] OpticsError),

    /// The loaded rows do not form a valid identity-keyed table
    #[error("table error: {0}")]
    Table(#[from] TableError),
}
