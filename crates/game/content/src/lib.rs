//! Data-driven content for the tower.
//!
//! This crate reads the static data a game session is built from:
//! - Tile dictionary (RON)
//! - Enemy unit templates (RON)
//! - Floor templates, one file per floor (RON)
//! - Game configuration (TOML)
//!
//! Content is turned into `tower-core` types directly with serde and never
//! appears in saved state. A sample data set ships under `data/`.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, FloorLoader, TileLoader, UnitLoader};

/// Directory of the bundled sample data set.
pub const SAMPLE_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
