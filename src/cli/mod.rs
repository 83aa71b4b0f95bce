use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cryostar::schema::columns;

mod config;
mod exclude;
mod info;
mod merge;
mod recenter;
mod subset;

/// cryostar - RELION Particle Metadata Toolkit
#[derive(Parser)]
#[command(name = "cryostar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep only the particles named by a reference STAR file
    Subset {
        /// Input STAR file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output STAR file path (must not exist)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// STAR file whose particles select the subset
        #[arg(long, value_name = "FILE")]
        keep: PathBuf,
    },

    /// Drop particles whose column value appears in any reference STAR file
    Exclude {
        /// Input STAR file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output STAR file path (must not exist)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Reference STAR files naming the particles to drop (repeatable)
        #[arg(long, value_name = "FILE", required = true)]
        reference: Vec<PathBuf>,

        /// Column whose values drive the exclusion
        #[arg(long, value_name = "COLUMN", default_value = columns::MICROGRAPH_NAME)]
        on: String,
    },

    /// Fold per-class displacements back into particle coordinates
    Recenter {
        /// Input STAR file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output STAR file path (must not exist)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// CSV file of class,dx,dy displacement rows
        #[arg(long, value_name = "FILE")]
        offsets: PathBuf,

        /// Micrograph width in pixels
        #[arg(long, value_name = "PIXELS")]
        micsx: Option<i64>,

        /// Micrograph height in pixels
        #[arg(long, value_name = "PIXELS")]
        micsy: Option<i64>,

        /// Particle box size in pixels (defaults to the optics image size)
        #[arg(long, value_name = "PIXELS")]
        box_size: Option<i64>,

        /// Class-average downscale factor (required for legacy 3.0 files)
        #[arg(long, value_name = "FACTOR")]
        downscale: Option<i64>,

        /// Load geometry from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Append columns from a CSV table by inner join
    Merge {
        /// Input STAR file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output STAR file path (must not exist)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// CSV file supplying the appended columns
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,

        /// Key column shared by both tables
        #[arg(long, value_name = "COLUMN", default_value = columns::IMAGE_NAME)]
        on: String,
    },

    /// Display information about a STAR file
    Info {
        /// Input STAR file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Subset {
            input,
            output,
            keep,
        } => subset::run(input, output, keep),
        Commands::Exclude {
            input,
            output,
            reference,
            on,
        } => exclude::run(input, output, reference, on),
        Commands::Recenter {
            input,
            output,
            offsets,
            micsx,
            micsy,
            box_size,
            downscale,
            config,
        } => recenter::run(input, output, offsets, micsx, micsy, box_size, downscale, config),
        Commands::Merge {
            input,
            output,
            csv,
            on,
        } => merge::run(input, output, csv, on),
        Commands::Info { file, json } => info::run(file, json),
    }
}
