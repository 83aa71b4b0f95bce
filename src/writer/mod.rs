//! # STAR Writer Module
//!
//! This module serializes a [`StarFile`] back to the on-disk text format.
//!
//! ## Design Principles
//!
//! 1. **Deterministic layout**: the header is reconstructed the same way
//!    every time. The identity column is always declared first and numbered
//!    `#1`; the remaining columns follow in table order.
//!
//! 2. **Verbatim optics pass-through**: for 3.1 files the optics block is
//!    re-emitted exactly as it was read, so constants and extra optics
//!    columns survive untouched.
//!
//! 3. **Fixed numeric formatting**: floats render with six decimal places,
//!    integers bare, strings verbatim, matching what RELION itself writes.
//!
//! 4. **No clobbering**: writing to a path that already exists fails rather
//!    than silently replacing a prior result.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::schema::Optics;
use crate::star::StarFile;

mod error;


pub use error::WriteError;

/// Write a STAR document to a new file at `path`.
pub fn write_path(star: &StarFile, path: impl AsRef<Path>) -> Result<(), WriteError> {
    let path = path.as_ref();
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Err(WriteError::OutputExists(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    let mut sink = BufWriter::new(file);
    write_to(star, &mut sink)?;
    sink.flush()?;
    log::info!(
        "wrote {} particles to {}",
        star.particles().len(),
        path.display()
    );
    Ok(())
}

/// Write a STAR document to any sink.
pub fn write_to<W: Write>(star: &StarFile, mut sink: W) -> Result<(), WriteError> {
    match star.optics() {
        Optics::Group(group) => {
            for line in group.raw_lines() {
                writeln!(sink, "{line}")?;
            }
            writeln!(sink)?;
            writeln!(sink, "data_particles")?;
        }
        Optics::Legacy => {
            writeln!(sink, "data_")?;
        }
    }
    writeln!(sink, "loop_")?;

    let table = star.particles();
    let registry = table.registry();
    let identity = table.identity_ordinal();

    writeln!(sink, "_{} #1", registry.names()[identity])?;
    let mut number = 2;
    for (ordinal, name) in registry.names().iter().enumerate() {
        if ordinal == identity {
            continue;
        }
        writeln!(sink, "_{name} #{number}")?;
        number += 1;
    }

    for row in table.rows() {
        write!(sink, "{}", row[identity])?;
        for (ordinal, cell) in row.iter().enumerate() {
            if ordinal == identity {
                continue;
            }
            write!(sink, " {cell}")?;
        }
        writeln!(sink)?;
    }

    Ok(())
}
