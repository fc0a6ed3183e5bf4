//! Unit templates keyed by class and id.
//!
//! Templates are the source of an enemy's initial stats. Fields beyond the
//! fixed combat schema go into the typed `extra` map instead of being copied
//! onto the instance ad hoc.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::TileNumber;

/// Special-ability codes carried by an enemy, in declaration order.
pub type Specials = ArrayVec<u32, { GameConfig::MAX_SPECIALS }>;

/// Initial stats of an enemy kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub number: TileNumber,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub special: Specials,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vertical: bool,
    /// Unset in most templates; an enemy built from such a template does not loop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub use_loop: Option<bool>,
    /// Template-specific modifiers, e.g. `"n": 3` for a multi-hit count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra: BTreeMap<String, i64>,
}

impl EnemyTemplate {
    pub fn new(id: impl Into<String>, number: TileNumber, hp: i64, atk: i64, def: i64) -> Self {
        Self {
            id: id.into(),
            number,
            name: None,
            hp,
            atk,
            def,
            special: Specials::new(),
            vertical: false,
            use_loop: None,
            extra: BTreeMap::new(),
        }
    }

    /// Adds a special-ability code (builder pattern). Codes past capacity are dropped.
    #[must_use]
    pub fn with_special(mut self, code: u32) -> Self {
        let _ = self.special.try_push(code);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: i64) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Unit template tables. Only the `enemy` class carries templates today.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitCatalog {
    #[cfg_attr(feature = "serde", serde(default))]
    enemies: BTreeMap<String, EnemyTemplate>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_enemy(&mut self, template: EnemyTemplate) {
        self.enemies.insert(template.id.clone(), template);
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.enemies.values()
    }
}

impl FromIterator<EnemyTemplate> for UnitCatalog {
    fn from_iter<T: IntoIterator<Item = EnemyTemplate>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for template in iter {
            catalog.insert_enemy(template);
        }
        catalog
    }
}
