//! # STAR Document
//!
//! [`StarFile`] ties the two halves of a loaded file together: the optics
//! context that fixes version-specific behavior, and the particle table the
//! curation operations work on.
//!
//! Table operations themselves are pure and live on
//! [`ParticleTable`](crate::table::ParticleTable); the methods here are the
//! committing forms that replace the held table with the result, which is
//! what the command-line workflows want.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::reader::{self, ReadError};
use crate::schema::{columns, Optics, OpticsError, StarVersion};
use crate::table::{JoinError, JoinTable, ParticleTable, TableError};
use crate::writer::{self, WriteError};

mod summary;


pub use summary::StarSummary;

/// A loaded STAR file: optics context plus particle table.
#[derive(Debug, Clone)]
pub struct StarFile {
    optics: Optics,
    particles: ParticleTable,
}

impl StarFile {
    pub(crate) fn new(optics: Optics, particles: ParticleTable) -> Self {
        Self { optics, particles }
    }

    /// Load a STAR file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        reader::read_path(path)
    }

    /// Load a STAR file from any buffered source.
    pub fn from_reader<R: BufRead>(source: R) -> Result<Self, ReadError> {
        reader::read_from(source)
    }

    /// Version-specific optics context.
    pub fn optics(&self) -> &Optics {
        &self.optics
    }

    /// Format revision of the loaded file.
    pub fn version(&self) -> StarVersion {
        self.optics.version()
    }

    /// The particle table.
    pub fn particles(&self) -> &ParticleTable {
        &self.particles
    }

    /// Particle pixel size.
    ///
    /// 3.1 files carry this in the optics block. Legacy files derive it as
    /// the detector pixel size over the magnification, both read from the
    /// first row.
    pub fn pixel_size(&self) -> Result<f64, OpticsError> {
        match &self.optics {
            Optics::Group(group) => Ok(group.image_pixel_size),
            Optics::Legacy => {
                let detector = self.first_numeric(columns::DETECTOR_PIXEL_SIZE)?;
                let magnification = self.first_numeric(columns::MAGNIFICATION)?;
                Ok(detector / magnification)
            }
        }
    }

    fn first_numeric(&self, column: &str) -> Result<f64, OpticsError> {
        let cells = self
            .particles
            .column(column)
            .ok_or_else(|| OpticsError::MissingField(column.to_string()))?;
        let first = cells
            .first()
            .ok_or_else(|| OpticsError::MissingField(column.to_string()))?;
        first.as_f64().ok_or_else(|| OpticsError::InvalidValue {
            field: column.to_string(),
            value: first.to_string(),
        })
    }

    /// Keep exactly the particles named by `keys`, in the requested order.
    pub fn subset(&mut self, keys: &[&str]) -> Result<(), TableError> {
        self.particles = self.particles.keep_rows(keys)?;
        Ok(())
    }

    /// Drop every particle whose value in `column` appears in `excluded`;
    /// unmatched values are ignored.
    pub fn exclude(&mut self, column: &str, excluded: &[&str]) {
        self.particles = self.particles.drop_rows(column, excluded);
    }

    /// Keep the identity column plus the named columns.
    pub fn keep_columns(&mut self, names: &[&str]) {
        self.particles = self.particles.keep_columns(names);
    }

    /// Drop the named columns; the identity column always survives.
    pub fn drop_columns(&mut self, names: &[&str]) {
        self.particles = self.particles.drop_columns(names);
    }

    /// Inner-join a secondary table onto the particles.
    pub fn merge(&mut self, secondary: &JoinTable) -> Result<(), JoinError> {
        self.particles = self.particles.join(secondary)?;
        Ok(())
    }

    /// Summary of the loaded file for display or JSON output.
    pub fn summary(&self) -> StarSummary {
        StarSummary::of(self)
    }

    /// Write the document to a new file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WriteError> {
        writer::write_path(self, path)
    }

    /// Write the document to any sink.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<(), WriteError> {
        writer::write_to(self, sink)
    }

    pub(crate) fn replace_particles(&mut self, particles: ParticleTable) {
        self.particles = particles;
    }
}
