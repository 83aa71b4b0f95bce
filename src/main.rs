//! # cryostar CLI
//!
//! A command-line toolkit for RELION particle STAR files.
//!
//! ## Usage
//!
//! ```bash
//! # Keep only the particles named by a picked subset
//! cryostar subset run_data.star subset.star --keep picked.star
//!
//! # Drop every particle from known-bad micrographs
//! cryostar exclude run_data.star clean.star --reference bad.star
//!
//! # Fold class-average displacements back into coordinates
//! cryostar recenter run_data.star recentered.star \
//!     --offsets offsets.csv --micsx 5760 --micsy 4092
//!
//! # Append CSV annotations by inner join
//! cryostar merge run_data.star merged.star --csv scores.csv
//!
//! # Inspect a file
//! cryostar info run_data.star --json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
