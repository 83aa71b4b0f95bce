use std::path::PathBuf;

/// Errors that can occur while writing a STAR file
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Refusing to overwrite an existing output file
    #[error("output file already exists: {0}")]
    OutputExists(PathBuf),
}
