//! Tile dictionary loader.

use std::path::Path;

use tower_core::{TileClass, TileDictionary};

use crate::loaders::{LoadResult, read_file};

/// Loader for the tile dictionary from RON files.
///
/// RON format: a map from tile number to definition.
///
/// ```ron
/// {
///     1: (id: "yellowWall", class: Terrain, pass: false,
///         animate: Some((texture: "terrains", frames: [(x: 0, y: 0, width: 32, height: 32)]))),
///     201: (id: "greenSlime", class: Enemy, pass: false),
/// }
/// ```
pub struct TileLoader;

impl TileLoader {
    pub fn load(path: &Path) -> LoadResult<TileDictionary> {
        let content = read_file(path)?;
        let dictionary: TileDictionary = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tile dictionary RON: {}", e))?;

        for (number, definition) in dictionary.iter() {
            if number.0 == 0 {
                anyhow::bail!("Tile '{}' uses reserved number 0", definition.id);
            }
            if definition.class == TileClass::Autotile
                && definition.animate.as_ref().is_some_and(|a| a.frames.is_empty())
            {
                anyhow::bail!("Autotile '{}' ({}) has an empty frame strip", definition.id, number);
            }
        }

        Ok(dictionary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tower_core::TileNumber;

    #[test]
    fn loads_classes_and_animations() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tiles.ron");
        std::fs::write(
            &path,
            r#"{
                1: (id: "yellowWall", class: Terrain, pass: false,
                    animate: Some((texture: "terrains", frames: [(x: 0, y: 32, width: 32, height: 32)]))),
                201: (id: "greenSlime", class: Enemy, pass: false),
            }"#,
        )
        .unwrap();

        let dictionary = TileLoader::load(&path).unwrap();
        assert_eq!(dictionary.len(), 2);
        let wall = dictionary.get(TileNumber(1)).unwrap();
        assert_eq!(wall.class, TileClass::Terrain);
        assert_eq!(wall.animate.as_ref().and_then(|a| a.first_frame()).map(|f| f.y), Some(32));
        assert!(dictionary.get(TileNumber(201)).unwrap().animate.is_none());
    }

    #[test]
    fn reserved_number_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tiles.ron");
        std::fs::write(&path, r#"{ 0: (id: "ghost", class: Terrain, pass: true) }"#).unwrap();

        assert!(TileLoader::load(&path).is_err());
    }
}
