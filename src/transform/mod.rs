//! # Recentering Transform
//!
//! Folds a per-class displacement measured on 2D class averages back into
//! each particle's picked micrograph coordinate, so a re-extraction centers
//! the particle properly.
//!
//! For every row whose class label was measured, the displacement is scaled
//! from class-average pixels to micrograph pixels, rotated by the row's
//! in-plane angle, and subtracted from the coordinate together with the
//! row's accumulated origin shift. Corrected coordinates are clamped into
//! the caller's bounds so boundary particles stay extractable, and the
//! origin shifts are zeroed because their effect now lives in the
//! coordinate. Rows of unmeasured classes pass through untouched, though an
//! integer coordinate column that takes corrected values widens to the
//! float kind as a whole, untouched rows included.
//!
//! The unit handling is version-aware: legacy files store origin shifts in
//! pixels and need a caller-supplied downscale factor, 3.1 files store them
//! in angstroms and carry both the pixel size and the downscale factor in
//! their optics block.

use crate::schema::{columns, ColumnKind, ColumnRegistry, Optics};
use crate::star::StarFile;
use crate::table::{CellValue, ParticleTable};

mod error;
mod offsets;


pub use error::TransformError;
pub use offsets::OffsetMap;

/// Clamp bounds and the legacy downscale factor for one recentering run.
#[derive(Debug, Clone, Copy)]
pub struct RecenterParams {
    /// Smallest allowed X coordinate
    pub min_x: f64,
    /// Smallest allowed Y coordinate
    pub min_y: f64,
    /// Largest allowed X coordinate
    pub max_x: f64,
    /// Largest allowed Y coordinate
    pub max_y: f64,
    /// Class-average to micrograph pixel ratio; required for legacy files,
    /// ignored for 3.1 files whose optics block already carries it
    pub downscale: Option<i64>,
}

/// Recenter the particles of a loaded file, returning the corrected table
/// and the number of rows that were touched.
pub fn recentered(
    star: &StarFile,
    offsets: &OffsetMap,
    params: &RecenterParams,
) -> Result<(ParticleTable, usize), TransformError> {
    let table = star.particles();
    let registry = table.registry();

    let coord_x = require(registry, columns::COORDINATE_X)?;
    let coord_y = require(registry, columns::COORDINATE_Y)?;
    let psi_col = require(registry, columns::ANGLE_PSI)?;
    let class_col = require(registry, columns::CLASS_NUMBER)?;

    let (origin_x_name, origin_y_name, origin_to_pixels, downscale) = match star.optics() {
        Optics::Group(group) => (
            columns::ORIGIN_X_ANGST,
            columns::ORIGIN_Y_ANGST,
            1.0 / group.image_pixel_size,
            group.downscale_factor,
        ),
        Optics::Legacy => (
            columns::ORIGIN_X,
            columns::ORIGIN_Y,
            1.0,
            params.downscale.ok_or(TransformError::DownscaleRequired)?,
        ),
    };
    let origin_x = require(registry, origin_x_name)?;
    let origin_y = require(registry, origin_y_name)?;
    let scale = downscale as f64;

    let mut rows = table.rows().to_vec();
    let mut corrected = 0usize;
    for row in &mut rows {
        let class = row[class_col].to_string();
        let Some((dx, dy)) = offsets.get(&class) else {
            continue;
        };

        let psi = numeric(&row[psi_col], columns::ANGLE_PSI)?;
        let (offset_x, offset_y) = offsets::rotate(dx * scale, dy * scale, psi);

        let x = numeric(&row[coord_x], columns::COORDINATE_X)?;
        let y = numeric(&row[coord_y], columns::COORDINATE_Y)?;
        let shift_x = numeric(&row[origin_x], origin_x_name)? * origin_to_pixels;
        let shift_y = numeric(&row[origin_y], origin_y_name)? * origin_to_pixels;

        let new_x = (x - (shift_x + offset_x)).max(params.min_x).min(params.max_x);
        let new_y = (y - (shift_y + offset_y)).max(params.min_y).min(params.max_y);

        row[coord_x] = CellValue::Float(new_x);
        row[coord_y] = CellValue::Float(new_y);
        row[origin_x] = zero_of(registry.kind_at(origin_x));
        row[origin_y] = zero_of(registry.kind_at(origin_y));
        corrected += 1;
    }

    let mut registry = registry.clone();
    if corrected > 0 {
        // Untouched integer cells follow their column into the float kind,
        // so a written coordinate column never mixes formats.
        for ordinal in [coord_x, coord_y] {
            registry.widen_kind(ordinal, ColumnKind::Float);
            float_cells(&mut rows, ordinal);
        }
    }

    Ok((table.with_contents(registry, rows), corrected))
}

impl StarFile {
    /// Recenter in place, returning the number of corrected rows.
    pub fn recenter(
        &mut self,
        offsets: &OffsetMap,
        params: &RecenterParams,
    ) -> Result<usize, TransformError> {
        let (table, corrected) = recentered(self, offsets, params)?;
        self.replace_particles(table);
        log::info!("recentered {corrected} particles");
        Ok(corrected)
    }
}

fn require(registry: &ColumnRegistry, column: &str) -> Result<usize, TransformError> {
    registry
        .ordinal(column)
        .ok_or_else(|| TransformError::MissingColumn(column.to_string()))
}

fn numeric(cell: &CellValue, column: &str) -> Result<f64, TransformError> {
    cell.as_f64().ok_or_else(|| TransformError::NonNumericCell {
        column: column.to_string(),
        value: cell.to_string(),
    })
}

fn zero_of(kind: ColumnKind) -> CellValue {
    match kind {
        ColumnKind::Int => CellValue::Int(0),
        _ => CellValue::Float(0.0),
    }
}

fn float_cells(rows: &mut [Vec<CellValue>], ordinal: usize) {
    for row in rows {
        if let CellValue::Int(value) = row[ordinal] {
            row[ordinal] = CellValue::Float(value as f64);
        }
    }
}
