//! # cryostar - RELION Particle Metadata Engine
//!
//! `cryostar` reads, filters, transforms, and writes the STAR particle files
//! produced by RELION single-particle refinement, covering both the legacy
//! 3.0 single-block layout and the 3.1 optics-group layout.
//!
//! ## Key Features
//!
//! - **Version-Aware Parsing**: Detects 3.0 vs 3.1 files from the block
//!   structure and exposes one table model for both.
//!
//! - **Identity-Indexed Table**: Every particle is addressable by its
//!   `rlnImageName` ("000001@stack.mrcs"), giving O(1) membership checks
//!   for subset selection.
//!
//! - **Set Operations**: Keep or drop particles by identity or by the value
//!   of any column, collected from reference STAR files.
//!
//! - **Class-Average Recentering**: Folds 2D displacements measured on class
//!   averages back into micrograph coordinates, rotating each offset by the
//!   particle's in-plane angle and clearing stale refinement origins.
//!
//! - **CSV Join**: Appends external per-particle annotations by inner join
//!   on a shared key column.
//!
//! - **Faithful Output**: Deterministic layout with the identity column
//!   declared first, a verbatim optics block round-trip, and a refusal to
//!   overwrite existing files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cryostar::star::StarFile;
//!
//! let mut star = StarFile::open("run_data.star")?;
//! println!("{} particles ({})", star.particles().len(), star.version());
//!
//! // Keep the first hundred particles.
//! let keys = star.particles().identities();
//! let keep: Vec<&str> = keys.iter().take(100).map(String::as_str).collect();
//! star.subset(&keep)?;
//!
//! star.save("subset.star")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`reader`]: line-oriented STAR parser with two-pass type inference
//! - [`schema`]: column vocabulary, kind registry, and the optics model
//! - [`star`]: the in-memory document and its summary view
//! - [`table`]: identity-indexed particle table with filter, query, and join
//! - [`transform`]: class-average displacement recentering
//! - [`writer`]: deterministic STAR serialization
//!
//! ## Version Differences
//!
//! | Concern | 3.0 legacy | 3.1 |
//! |---------|------------|-----|
//! | Blocks | single `data_` | `data_optics` + `data_particles` |
//! | Refinement origins | `rlnOriginX`/`Y` (pixels) | `rlnOriginXAngst`/`YAngst` (Angstrom) |
//! | Pixel size | `rlnDetectorPixelSize` / `rlnMagnification` | `rlnImagePixelSize` |
//! | Box size | not recorded | `rlnImageSize` |

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
// Allow some patterns common in scientific code
#![allow(clippy::too_many_arguments)]

pub mod reader;
pub mod schema;
pub mod star;
pub mod table;
pub mod transform;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::reader::ReadError;
    pub use crate::schema::{
        columns, ColumnKind, ColumnRegistry, Optics, OpticsError, OpticsGroup, StarVersion,
    };
    pub use crate::star::{StarFile, StarSummary};
    pub use crate::table::{
        CellValue, ColumnStats, JoinError, JoinTable, ParticleTable, TableError,
    };
    pub use crate::transform::{OffsetMap, RecenterParams, TransformError};
    pub use crate::writer::WriteError;
}
