//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into `tower-core` types;
//! [`ContentFactory`] knows the directory layout and bundles them.

pub mod config;
pub mod factory;
pub mod floor;
pub mod tiles;
pub mod units;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use floor::FloorLoader;
pub use tiles::TileLoader;
pub use units::UnitLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
