use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use cryostar::star::StarFile;
use cryostar::table::JoinTable;

/// Append columns from a CSV table by inner join
pub fn run(input: PathBuf, output: PathBuf, csv: PathBuf, on: String) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if output.exists() {
        anyhow::bail!("Output file already exists: {}", output.display());
    }

    let secondary = JoinTable::from_csv_path(&csv, &on)
        .with_context(|| format!("Failed to read CSV table: {}", csv.display()))?;
    info!(
        "CSV table: {} rows, {} appended columns",
        secondary.len(),
        secondary.columns().len()
    );

    let mut star = StarFile::open(&input)
        .with_context(|| format!("Failed to read STAR file: {}", input.display()))?;

    let total = star.particles().len();
    star.merge(&secondary).context("Merge failed")?;

    star.save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Merged {} columns onto {} of {} particles",
        secondary.columns().len(),
        star.particles().len(),
        total
    );
    println!("Saved to {}", output.display());

    Ok(())
}
