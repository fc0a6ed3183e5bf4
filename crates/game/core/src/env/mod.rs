//! Read-only content shared by every floor.
//!
//! The [`Catalog`] bundles the tile dictionary and the unit templates so a
//! floor can classify map ids and instantiate enemies without reaching for
//! process-wide tables. Floors hold it behind an `Arc`.
mod dictionary;
mod units;

pub use dictionary::{Animation, FrameRect, TileClass, TileDefinition, TileDictionary};
pub use units::{EnemyTemplate, Specials, UnitCatalog};

/// Tile dictionary plus unit templates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub dictionary: TileDictionary,
    pub units: UnitCatalog,
}

impl Catalog {
    pub fn new(dictionary: TileDictionary, units: UnitCatalog) -> Self {
        Self { dictionary, units }
    }
}
