use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use cryostar::star::StarFile;

/// Keep only the particles named by a reference STAR file
pub fn run(input: PathBuf, output: PathBuf, keep: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if output.exists() {
        anyhow::bail!("Output file already exists: {}", output.display());
    }

    let mut star = StarFile::open(&input)
        .with_context(|| format!("Failed to read STAR file: {}", input.display()))?;
    let reference = StarFile::open(&keep)
        .with_context(|| format!("Failed to read reference STAR file: {}", keep.display()))?;

    let total = star.particles().len();
    let keys = reference.particles().identities();
    info!("Selecting {} of {} particles", keys.len(), total);

    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
    star.subset(&keys)
        .context("Reference names particles that are missing from the input")?;

    star.save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Kept {} of {} particles", star.particles().len(), total);
    println!("Saved to {}", output.display());

    Ok(())
}
