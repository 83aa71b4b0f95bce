use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use cryostar::schema::Optics;
use cryostar::star::StarFile;
use cryostar::transform::{OffsetMap, RecenterParams};

use super::config::Config;

/// Fold per-class displacements back into particle coordinates
#[allow(clippy::too_many_arguments)]
pub fn run(
    input: PathBuf,
    output: PathBuf,
    offsets: PathBuf,
    micsx: Option<i64>,
    micsy: Option<i64>,
    box_size: Option<i64>,
    downscale: Option<i64>,
    config: Option<PathBuf>,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if output.exists() {
        anyhow::bail!("Output file already exists: {}", output.display());
    }

    let config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    // Flags win over config file values.
    let micsx = micsx
        .or(config.micrograph.width)
        .context("Micrograph width is required (--micsx or [micrograph] width)")?;
    let micsy = micsy
        .or(config.micrograph.height)
        .context("Micrograph height is required (--micsy or [micrograph] height)")?;
    let box_size = box_size.or(config.particle.box_size);
    let downscale = downscale.or(config.recenter.downscale);

    let offsets = OffsetMap::from_csv_path(&offsets).context("Failed to load class offsets")?;
    info!("Loaded offsets for {} classes", offsets.len());

    let mut star = StarFile::open(&input)
        .with_context(|| format!("Failed to read STAR file: {}", input.display()))?;

    // A 3.1 optics block carries the box size; legacy files must be told.
    let box_size = match box_size {
        Some(size) => size,
        None => match star.optics() {
            Optics::Group(group) => group.image_size,
            Optics::Legacy => anyhow::bail!(
                "Box size is required for legacy 3.0 files (--box-size or [particle] box_size)"
            ),
        },
    };

    let half_box = (box_size / 2) as f64;
    let params = RecenterParams {
        min_x: half_box,
        min_y: half_box,
        max_x: micsx as f64 - half_box,
        max_y: micsy as f64 - half_box,
        downscale,
    };
    info!(
        "Coordinates clamped to [{}, {}] x [{}, {}]",
        params.min_x, params.max_x, params.min_y, params.max_y
    );

    let total = star.particles().len();
    let corrected = star
        .recenter(&offsets, &params)
        .context("Recentering failed")?;

    star.save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Recentered {} of {} particles", corrected, total);
    println!("Saved to {}", output.display());

    Ok(())
}
