use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::columns;

/// STAR format revision detected from the header layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarVersion {
    /// Single flat data block; instrument parameters live in per-row columns
    Relion30,
    /// Separate `data_optics` block referenced by the particle table
    Relion31,
}

impl fmt::Display for StarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarVersion::Relion30 => write!(f, "3.0"),
            StarVersion::Relion31 => write!(f, "3.1"),
        }
    }
}

/// Per-version instrument context, derived once at load and immutable after.
///
/// Every consumer that needs version-specific behavior (pixel-size lookup,
/// origin-shift units, header shape on write) matches on this tag instead of
/// re-testing header strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Optics {
    /// Pre-3.1 file: no optics block exists
    Legacy,
    /// 3.1-era file: constants parsed from the `data_optics` block
    Group(OpticsGroup),
}

impl Optics {
    /// Format revision this context belongs to.
    pub fn version(&self) -> StarVersion {
        match self {
            Optics::Legacy => StarVersion::Relion30,
            Optics::Group(_) => StarVersion::Relion31,
        }
    }

    /// Borrow the optics constants, failing on legacy files that have none.
    pub fn group(&self) -> Result<&OpticsGroup, OpticsError> {
        match self {
            Optics::Legacy => Err(OpticsError::LegacyContext),
            Optics::Group(group) => Ok(group),
        }
    }
}

/// Instrument constants carried by a `data_optics` block.
///
/// All fields are required; a block missing any of them fails to parse, so a
/// constructed group is always complete. Constants are read from the first
/// value row of the block; the raw block lines are retained so files with
/// additional optics groups still round-trip verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpticsGroup {
    /// Pixel size of the raw micrographs, in angstroms
    pub micrograph_pixel_size: f64,
    /// Pixel size of the extracted particle images, in angstroms
    pub image_pixel_size: f64,
    /// Ratio of image over micrograph pixel size, floored to an integer
    pub downscale_factor: i64,
    /// Particle box size in pixels
    pub image_size: i64,
    /// Image dimensionality (2 or 3)
    pub image_dimensionality: i64,
    /// Acceleration voltage in kV
    pub voltage: f64,
    /// Spherical aberration in millimeters
    pub spherical_aberration: f64,
    /// Amplitude contrast fraction
    pub amplitude_contrast: f64,
    #[serde(skip)]
    raw_lines: Vec<String>,
}

impl OpticsGroup {
    /// Parse the constants out of the raw `data_optics` block lines.
    ///
    /// Declaration lines (`_rlnVoltage #4`) are paired positionally with the
    /// whitespace-split tokens of the first value row that follows them.
    pub(crate) fn parse(lines: &[String]) -> Result<Self, OpticsError> {
        let mut fields: Vec<&str> = Vec::new();
        let mut values: Option<Vec<&str>> = None;

        for line in lines {
            let trimmed = line.trim();
            if let Some(declaration) = trimmed.strip_prefix('_') {
                if let Some(name) = declaration.split_whitespace().next() {
                    fields.push(name);
                }
            } else if values.is_none()
                && !trimmed.is_empty()
                && !trimmed.starts_with("data_")
                && !trimmed.starts_with("loop_")
                && !trimmed.starts_with('#')
            {
                values = Some(trimmed.split_whitespace().collect());
            }
        }

        let values = values.unwrap_or_default();
        let by_name: HashMap<&str, &str> = fields
            .iter()
            .zip(values.iter())
            .map(|(f, v)| (*f, *v))
            .collect();

        let micrograph_pixel_size =
            float_field(&by_name, columns::MICROGRAPH_ORIGINAL_PIXEL_SIZE)?;
        let image_pixel_size = float_field(&by_name, columns::IMAGE_PIXEL_SIZE)?;

        Ok(Self {
            micrograph_pixel_size,
            image_pixel_size,
            downscale_factor: (image_pixel_size / micrograph_pixel_size).floor() as i64,
            image_size: int_field(&by_name, columns::IMAGE_SIZE)?,
            image_dimensionality: int_field(&by_name, columns::IMAGE_DIMENSIONALITY)?,
            voltage: float_field(&by_name, columns::VOLTAGE)?,
            spherical_aberration: float_field(&by_name, columns::SPHERICAL_ABERRATION)?,
            amplitude_contrast: float_field(&by_name, columns::AMPLITUDE_CONTRAST)?,
            raw_lines: lines.to_vec(),
        })
    }

    /// Raw block lines as read from the file, re-emitted verbatim on write.
    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }
}

fn raw_field<'a>(
    by_name: &HashMap<&str, &'a str>,
    field: &str,
) -> Result<&'a str, OpticsError> {
    by_name
        .get(field)
        .copied()
        .ok_or_else(|| OpticsError::MissingField(field.to_string()))
}

fn float_field(by_name: &HashMap<&str, &str>, field: &str) -> Result<f64, OpticsError> {
    let value = raw_field(by_name, field)?;
    value.parse().map_err(|_| OpticsError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn int_field(by_name: &HashMap<&str, &str>, field: &str) -> Result<i64, OpticsError> {
    let value = raw_field(by_name, field)?;
    value.parse().map_err(|_| OpticsError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Errors raised while deriving or consulting the optics context
#[derive(Debug, thiserror::Error)]
pub enum OpticsError {
    /// A required instrument constant is not declared in the optics block
    #[error("data_optics block is missing required field: {0}")]
    MissingField(String),

    /// A declared constant could not be parsed as a number
    #[error("optics field {field} has unparseable value '{value}'")]
    InvalidValue {
        /// Field whose value failed to parse
        field: String,
        /// Offending token
        value: String,
    },

    /// Optics constants were requested from a legacy file that carries none
    #[error("legacy STAR file carries no data_optics block")]
    LegacyContext,
}
