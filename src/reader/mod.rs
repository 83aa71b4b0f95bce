//! # STAR Reader Module
//!
//! This module loads a RELION particle STAR file into a [`StarFile`]: the
//! version-specific optics context plus the identity-indexed particle table.
//!
//! ## Loading
//!
//! Reading is a single pass over the lines for the header, then two passes
//! over the data region: one to tokenize rows and infer per-column kinds,
//! one to materialize typed cells. Inference widens along
//! `Int -> Float -> Str`, so a column holding `1` and `2.5` loads as floats
//! and a column holding any non-numeric token stays verbatim text.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cryostar::star::StarFile;
//!
//! let star = StarFile::open("run_data.star")?;
//! println!(
//!     "RELION {} file with {} particles",
//!     star.optics().version(),
//!     star.particles().len()
//! );
//! # Ok::<(), cryostar::reader::ReadError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::schema::{ColumnKind, ColumnRegistry, Optics, OpticsGroup, StarVersion};
use crate::star::StarFile;
use crate::table::{CellValue, ParticleTable};

mod error;
mod header;

#[cfg(test)]
mod tests;

pub use error::ReadError;

/// Load a STAR file from disk.
pub fn read_path(path: impl AsRef<Path>) -> Result<StarFile, ReadError> {
    let path = path.as_ref();
    log::debug!("reading STAR file: {}", path.display());
    let file = File::open(path)?;
    read_from(BufReader::new(file))
}

/// Load a STAR file from any buffered source.
pub fn read_from<R: BufRead>(reader: R) -> Result<StarFile, ReadError> {
    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
    let header = header::parse_header(&lines)?;

    let optics = match header.version {
        StarVersion::Relion31 => Optics::Group(OpticsGroup::parse(&header.optics_lines)?),
        StarVersion::Relion30 => Optics::Legacy,
    };

    let expected = header.column_names.len();
    let mut kinds = vec![ColumnKind::Int; expected];
    let mut tokenized: Vec<Vec<&str>> = Vec::new();
    for (offset, line) in lines[header.data_start..].iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.starts_with("data_") {
            return Err(ReadError::MalformedHeader {
                line: header.data_start + offset + 1,
                reason: "unexpected data block after particle rows".to_string(),
            });
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != expected {
            return Err(ReadError::RecordShapeMismatch {
                line: header.data_start + offset + 1,
                expected,
                found: tokens.len(),
            });
        }
        for (slot, token) in kinds.iter_mut().zip(&tokens) {
            *slot = slot.widen(ColumnKind::of_token(token));
        }
        tokenized.push(tokens);
    }

    let registry = ColumnRegistry::from_parts(header.column_names, kinds.clone());
    let rows: Vec<Vec<CellValue>> = tokenized
        .into_iter()
        .map(|tokens| {
            tokens
                .into_iter()
                .zip(&kinds)
                .map(|(token, kind)| CellValue::from_token(*kind, token))
                .collect()
        })
        .collect();

    let table = ParticleTable::from_parts(registry, rows)?;
    log::debug!(
        "loaded RELION {} table: {} particles, {} columns",
        header.version,
        table.len(),
        table.registry().len()
    );

    Ok(StarFile::new(optics, table))
}
