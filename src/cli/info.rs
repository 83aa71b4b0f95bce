use anyhow::{Context, Result};
use std::path::PathBuf;

use cryostar::star::StarFile;

/// Display information about a STAR file
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let star = StarFile::open(&file)
        .with_context(|| format!("Failed to read STAR file: {}", file.display()))?;
    let summary = star.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!();
    print!("{summary}");

    Ok(())
}
