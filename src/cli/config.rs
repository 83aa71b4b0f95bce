//! TOML configuration file support for recurring recenter geometry.
//!
//! Instead of passing the same geometry flags on every run, users can keep
//! them in a config file:
//!
//! ```toml
//! # cryostar.toml
//! [micrograph]
//! width = 5760
//! height = 4092
//!
//! [particle]
//! box_size = 64
//!
//! [recenter]
//! downscale = 4
//! ```
//!
//! Flags given on the command line always win over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for cryostar.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Micrograph geometry.
    #[serde(default)]
    pub micrograph: MicrographConfig,

    /// Particle geometry.
    #[serde(default)]
    pub particle: ParticleConfig,

    /// Recenter-specific settings.
    #[serde(default)]
    pub recenter: RecenterConfig,
}

/// Micrograph dimensions in pixels.
#[derive(Debug, Default, Deserialize)]
pub struct MicrographConfig {
    /// Micrograph width.
    pub width: Option<i64>,

    /// Micrograph height.
    pub height: Option<i64>,
}

/// Particle extraction geometry.
#[derive(Debug, Default, Deserialize)]
pub struct ParticleConfig {
    /// Extracted box edge length.
    pub box_size: Option<i64>,
}

/// Settings for the recenter command.
#[derive(Debug, Default, Deserialize)]
pub struct RecenterConfig {
    /// Class-average downscale factor for legacy 3.0 files.
    pub downscale: Option<i64>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
