//! Game configuration loader.

use std::path::Path;

use tower_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`]. Zero-sized cells are
    /// rejected since every pixel position is derived from them.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config: GameConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.unit_width == 0 || config.unit_height == 0 {
            anyhow::bail!(
                "Invalid config {}: unit size must be non-zero (got {}x{})",
                path.display(),
                config.unit_width,
                config.unit_height
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "unit_width = 16\nunit_height = 16\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.unit_width, 16);
        assert_eq!(config.screen_width, GameConfig::default().screen_width);
    }

    #[test]
    fn zero_unit_size_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "unit_width = 0\n").unwrap();

        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("unit size"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.toml"));
    }
}
