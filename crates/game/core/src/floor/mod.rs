//! One game level: layered map data and the live blocks parsed from it.
//!
//! A [`Floor`] is built from a [`FloorTemplate`] and the shared [`Catalog`].
//! [`Floor::extract`] turns raw tile ids into [`Block`]s, stamping the
//! [`Cell::RESOLVED`] sentinel into parsed cells. Movement and interaction
//! drivers then go through the lookup API (`get_block`, `pass`,
//! `can_arrive`, `remove_block`, `trigger`).
//!
//! Most operations come in two forms: the short one targets the floor's
//! event layer, the `_on` form takes an explicit [`Layer`].

mod draw;
mod error;
mod extract;
mod grid;
mod lookup;

pub use draw::{SpriteCache, SpriteLayer};
pub use error::FloorError;
pub use grid::{Cell, LayerGrid};
pub use lookup::Passability;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::entity::{Block, Enemy};
use crate::env::Catalog;
use crate::state::{FloorId, Layer, Position};

/// Static description of a floor, as authored in content files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorTemplate {
    pub floor_id: FloorId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    /// Layer targeted by lookups when none is given.
    pub event_layer: Layer,
    /// Row-major grids of raw tile ids, keyed by layer.
    pub map: BTreeMap<Layer, Vec<Vec<i32>>>,
}

/// Cached damage preview for one enemy cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DamagePreview {
    /// `None` when the hero cannot win; shown as `???`.
    pub damage: Option<i64>,
    pub critical: Option<i64>,
}

impl DamagePreview {
    /// Value written at extraction time, before any calculation.
    pub const fn reset() -> Self {
        Self {
            damage: Some(0),
            critical: None,
        }
    }
}

/// Live state of one game level.
#[derive(Clone, Debug)]
pub struct Floor {
    floor_id: FloorId,
    title: Option<String>,
    width: u32,
    height: u32,
    event: Layer,
    config: GameConfig,
    catalog: Arc<Catalog>,

    map: BTreeMap<Layer, LayerGrid>,
    blocks: BTreeMap<Layer, BTreeMap<Position, Block>>,
    damages: BTreeMap<Position, DamagePreview>,
    sprites: SpriteCache,
}

impl Floor {
    /// Builds a floor from its template.
    ///
    /// Width and height come from the base (lowest) layer; every other layer
    /// must match them. Blocks are not parsed until [`Floor::extract`].
    pub fn new(
        template: FloorTemplate,
        catalog: Arc<Catalog>,
        config: GameConfig,
    ) -> Result<Self, FloorError> {
        let FloorTemplate {
            floor_id,
            title,
            event_layer,
            map,
        } = template;

        let map: BTreeMap<Layer, LayerGrid> = map
            .into_iter()
            .map(|(layer, rows)| (layer, LayerGrid::new(rows)))
            .collect();

        let Some(base) = map.values().next() else {
            return Err(FloorError::EmptyMap { floor: floor_id });
        };
        let expected = (base.width(), base.height());
        if expected.0 == 0 || expected.1 == 0 {
            return Err(FloorError::EmptyMap { floor: floor_id });
        }

        for (layer, grid) in &map {
            if let Some((row, found)) = grid.ragged_row() {
                return Err(FloorError::RaggedLayer {
                    floor: floor_id,
                    layer: *layer,
                    row,
                    expected: expected.0,
                    found,
                });
            }
            let found = (grid.width(), grid.height());
            if found != expected {
                return Err(FloorError::DimensionMismatch {
                    floor: floor_id,
                    layer: *layer,
                    expected,
                    found,
                });
            }
        }

        if !map.contains_key(&event_layer) {
            return Err(FloorError::UnknownLayer {
                floor: floor_id,
                layer: event_layer,
            });
        }

        Ok(Self {
            floor_id,
            title,
            width: u32::try_from(expected.0).unwrap_or(u32::MAX),
            height: u32::try_from(expected.1).unwrap_or(u32::MAX),
            event: event_layer,
            config,
            catalog,
            map,
            blocks: BTreeMap::new(),
            damages: BTreeMap::new(),
            sprites: SpriteCache::default(),
        })
    }

    pub fn floor_id(&self) -> &FloorId {
        &self.floor_id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn unit_width(&self) -> u32 {
        self.config.unit_width
    }

    pub fn unit_height(&self) -> u32 {
        self.config.unit_height
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn event_layer(&self) -> Layer {
        self.event
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.map.keys().copied()
    }

    pub fn grid(&self, layer: Layer) -> Option<&LayerGrid> {
        self.map.get(&layer)
    }

    /// Raw cell value, including the `-2` sentinel.
    pub fn cell(&self, layer: Layer, position: Position) -> Option<i32> {
        self.map.get(&layer)?.get(position)
    }

    /// Parsed blocks of a layer. Only non-trivial cells are present.
    pub fn blocks(&self, layer: Layer) -> Option<&BTreeMap<Position, Block>> {
        self.blocks.get(&layer)
    }

    /// Live enemies across all layers.
    pub fn enemies(&self) -> impl Iterator<Item = (Layer, &Enemy)> + '_ {
        self.blocks.iter().flat_map(|(layer, cells)| {
            cells
                .values()
                .filter_map(move |block| block.as_enemy().map(|enemy| (*layer, enemy)))
        })
    }

    pub fn damages(&self) -> &BTreeMap<Position, DamagePreview> {
        &self.damages
    }

    pub fn damage_preview(&self, position: Position) -> Option<&DamagePreview> {
        self.damages.get(&position)
    }

    /// Overwrites the preview of an extracted enemy cell. Other cells are ignored.
    pub fn set_damage_preview(&mut self, position: Position, preview: DamagePreview) {
        if let Some(slot) = self.damages.get_mut(&position) {
            *slot = preview;
        }
    }

    pub fn sprites(&self) -> &SpriteCache {
        &self.sprites
    }
}
