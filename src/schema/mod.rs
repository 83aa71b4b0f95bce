//! # STAR Schema Model
//!
//! This module defines the column-level schema of a particle table and the
//! version-specific optics context that travels with it.
//!
//! ## Design Rationale
//!
//! A STAR file never announces column types; every value is a bare token.
//! Types are therefore inferred per column while loading: a column is `Int`
//! only if every token parses as an integer, `Float` if every token parses as
//! a number, and `Str` otherwise. The [`ColumnRegistry`] records the outcome
//! together with each column's ordinal, so lookups by `rln` label are O(1)
//! and row storage can stay positional.
//!
//! ## Version Context
//!
//! RELION 3.1 moved instrument parameters out of the particle rows into a
//! dedicated `data_optics` block. The [`Optics`] tag captures which world a
//! file belongs to, and [`OpticsGroup`] holds the parsed constants for 3.1-era
//! files. Code that needs version-specific behavior matches on the tag once
//! instead of re-deriving it from header strings.

pub mod columns;
mod optics;
mod registry;


pub use optics::{Optics, OpticsError, OpticsGroup, StarVersion};
pub use registry::{ColumnKind, ColumnRegistry};
