/// Errors raised while recentering particles
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// The table lacks a column the transform reads or rewrites
    #[error("required column not present in table: {0}")]
    MissingColumn(String),

    /// A cell the transform needs is not numeric
    #[error("column {column} holds non-numeric value '{value}'")]
    NonNumericCell {
        /// Column the cell belongs to
        column: String,
        /// Offending token
        value: String,
    },

    /// A legacy file was recentered without an explicit downscale factor
    #[error("legacy STAR file requires an explicit downscale factor")]
    DownscaleRequired,

    /// The offsets file could not be read
    #[error("failed to read offsets file: {0}")]
    Csv(#[from] csv::Error),

    /// The offsets file lacks a required column
    #[error("offsets file is missing required column: {0}")]
    OffsetColumnMissing(String),

    /// A displacement in the offsets file could not be parsed
    #[error("offsets file has unparseable value '{value}' for class {class}")]
    InvalidOffset {
        /// Class label the bad record belongs to
        class: String,
        /// Offending token
        value: String,
    },

    /// A class label appears twice in the offsets file
    #[error("duplicate class label in offsets file: {0}")]
    DuplicateClass(String),
}
