//! Enemy template loader.

use std::collections::BTreeSet;
use std::path::Path;

use tower_core::{EnemyTemplate, UnitCatalog};

use crate::loaders::{LoadResult, read_file};

/// Loader for enemy unit templates from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load the unit catalog from a RON file.
    ///
    /// RON format: `Vec<EnemyTemplate>`. Ids must be unique; optional fields
    /// (`name`, `special`, `vertical`, `use_loop`, `extra`) may be omitted.
    pub fn load(path: &Path) -> LoadResult<UnitCatalog> {
        let content = read_file(path)?;
        let templates: Vec<EnemyTemplate> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                anyhow::bail!("Duplicate enemy template id '{}'", template.id);
            }
        }

        Ok(templates.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tower_core::TileNumber;

    #[test]
    fn optional_fields_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("enemies.ron");
        std::fs::write(
            &path,
            r#"[
                (id: "greenSlime", number: 201, hp: 35, atk: 18, def: 1),
                (id: "bat", number: 205, name: Some("Bat"), hp: 35, atk: 38, def: 3,
                 special: [1, 4], extra: { "n": 2 }),
            ]"#,
        )
        .unwrap();

        let catalog = UnitLoader::load(&path).unwrap();
        let slime = catalog.enemy("greenSlime").unwrap();
        assert_eq!(slime.number, TileNumber(201));
        assert!(slime.special.is_empty());
        assert_eq!(slime.use_loop, None);

        let bat = catalog.enemy("bat").unwrap();
        assert_eq!(bat.special.as_slice(), &[1, 4]);
        assert_eq!(bat.extra.get("n"), Some(&2));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("enemies.ron");
        std::fs::write(
            &path,
            r#"[
                (id: "bat", number: 205, hp: 35, atk: 38, def: 3),
                (id: "bat", number: 206, hp: 60, atk: 60, def: 5),
            ]"#,
        )
        .unwrap();

        let err = UnitLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("bat"));
    }
}
