use std::fmt;

use serde::Serialize;

use crate::schema::columns;
use crate::table::ColumnStats;

use super::StarFile;

/// Summary statistics about a STAR file
#[derive(Debug, Clone, Serialize)]
pub struct StarSummary {
    /// RELION format revision, `"3.0"` or `"3.1"`
    pub version: String,
    /// Number of particle rows
    pub particle_count: usize,
    /// Declared column names in table order
    pub columns: Vec<String>,
    /// Number of distinct micrographs, if the column is present
    pub micrograph_count: Option<usize>,
    /// Number of distinct classification classes, if the column is present
    pub class_count: Option<usize>,
    /// Particle pixel size in angstroms, if derivable
    pub pixel_size: Option<f64>,
    /// Defocus statistics, if the column is present and numeric
    pub defocus: Option<ColumnStats>,
}

impl StarSummary {
    pub(super) fn of(star: &StarFile) -> Self {
        let table = star.particles();
        Self {
            version: star.version().to_string(),
            particle_count: table.len(),
            columns: table.registry().names().to_vec(),
            micrograph_count: table.unique_count(columns::MICROGRAPH_NAME),
            class_count: table.unique_count(columns::CLASS_NUMBER),
            pixel_size: star.pixel_size().ok(),
            defocus: table.column_stats(columns::DEFOCUS_U),
        }
    }
}

impl fmt::Display for StarSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "STAR File Summary")?;
        writeln!(f, "=================")?;
        writeln!(f, "RELION version: {}", self.version)?;
        writeln!(f, "Particles: {}", self.particle_count)?;
        if let Some(micrographs) = self.micrograph_count {
            writeln!(f, "Micrographs: {micrographs}")?;
        }
        if let Some(classes) = self.class_count {
            writeln!(f, "Classes: {classes}")?;
        }
        if let Some(pixel_size) = self.pixel_size {
            writeln!(f, "Pixel size: {pixel_size:.4} A/px")?;
        }
        if let Some(defocus) = self.defocus {
            writeln!(
                f,
                "DefocusU: {:.1} - {:.1} (median {:.1})",
                defocus.min, defocus.max, defocus.median
            )?;
        }
        writeln!(f, "Columns ({}):", self.columns.len())?;
        for column in &self.columns {
            writeln!(f, "  {column}")?;
        }
        Ok(())
    }
}
