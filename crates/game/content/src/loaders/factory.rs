//! Content factory for building a game session from data files.

use std::path::{Path, PathBuf};

use tower_core::{Catalog, FloorId, FloorTemplate, GameConfig, Hero, Position, TileClass};

use crate::loaders::{ConfigLoader, FloorLoader, LoadResult, TileLoader, UnitLoader, read_file};

/// On-disk shape of `hero.ron`.
#[derive(Debug, serde::Deserialize)]
struct HeroSpec {
    id: String,
    position: Position,
    hp: i64,
    atk: i64,
    def: i64,
    #[serde(default)]
    mdef: i64,
    #[serde(default)]
    money: i64,
    #[serde(default)]
    exp: i64,
}

impl From<HeroSpec> for Hero {
    fn from(spec: HeroSpec) -> Self {
        let mut hero = Hero::new(spec.id, spec.position, spec.hp, spec.atk, spec.def);
        hero.mdef = spec.mdef;
        hero.money = spec.money;
        hero.exp = spec.exp;
        hero
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tiles.ron
/// ├── enemies.ron
/// ├── hero.ron
/// └── floors/
///     ├── MT1.ron
///     └── MT2.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the tile dictionary and enemy templates into one catalog.
    ///
    /// Every enemy-class tile must have a template with the same id and number.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let dictionary = TileLoader::load(&self.data_dir.join("tiles.ron"))?;
        let units = UnitLoader::load(&self.data_dir.join("enemies.ron"))?;

        for (number, definition) in dictionary.iter() {
            if definition.class != TileClass::Enemy {
                continue;
            }
            let Some(template) = units.enemy(&definition.id) else {
                anyhow::bail!(
                    "Enemy tile {} ('{}') has no template in enemies.ron",
                    number,
                    definition.id
                );
            };
            if template.number != number {
                anyhow::bail!(
                    "Enemy template '{}' has number {}, tile dictionary says {}",
                    template.id,
                    template.number,
                    number
                );
            }
        }

        Ok(Catalog::new(dictionary, units))
    }

    /// Load the starting hero from `hero.ron`.
    ///
    /// `mdef`, `money` and `exp` default to zero when omitted.
    pub fn load_hero(&self) -> LoadResult<Hero> {
        let content = read_file(&self.data_dir.join("hero.ron"))?;
        let spec: HeroSpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero RON: {}", e))?;
        if spec.hp <= 0 {
            anyhow::bail!("Hero '{}' starts with {} hp", spec.id, spec.hp);
        }
        Ok(spec.into())
    }

    /// Load a floor template from `floors/{floor_id}.ron`.
    pub fn load_floor(&self, floor_id: &FloorId) -> LoadResult<FloorTemplate> {
        let path = self.floors_dir().join(format!("{}.ron", floor_id));
        FloorLoader::load(&path)
    }

    /// Ids of every floor file, sorted.
    pub fn floor_ids(&self) -> LoadResult<Vec<FloorId>> {
        let dir = self.floors_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(FloorId::new(stem));
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn floors_dir(&self) -> PathBuf {
        self.data_dir.join("floors")
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
