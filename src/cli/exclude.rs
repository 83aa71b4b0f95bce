use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use cryostar::star::StarFile;

/// Drop particles whose column value appears in any reference STAR file
pub fn run(input: PathBuf, output: PathBuf, reference: Vec<PathBuf>, on: String) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if output.exists() {
        anyhow::bail!("Output file already exists: {}", output.display());
    }

    let mut star = StarFile::open(&input)
        .with_context(|| format!("Failed to read STAR file: {}", input.display()))?;

    let mut excluded: Vec<String> = Vec::new();
    for path in &reference {
        let other = StarFile::open(path)
            .with_context(|| format!("Failed to read reference STAR file: {}", path.display()))?;
        let values = other
            .particles()
            .unique_values(&on)
            .with_context(|| format!("Column {} not present in {}", on, path.display()))?;
        info!("{}: {} distinct {} values", path.display(), values.len(), on);
        excluded.extend(values);
    }

    let total = star.particles().len();
    let values: Vec<&str> = excluded.iter().map(String::as_str).collect();
    star.exclude(&on, &values);

    star.save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Excluded {} of {} particles",
        total - star.particles().len(),
        total
    );
    println!("Saved to {}", output.display());

    Ok(())
}
