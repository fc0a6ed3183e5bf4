//! Tile dictionary: numeric map ids to tile definitions.

use std::collections::BTreeMap;

use crate::state::TileNumber;

/// Class of a tile, selecting how a floor parses, draws, and triggers it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TileClass {
    /// Combat unit; materialized as an [`Enemy`](crate::entity::Enemy) block at parse time.
    Enemy,
    /// Neighbour-aware tile; materialized as an [`Autotile`](crate::entity::Autotile) block.
    Autotile,
    /// Plain ground, walls, decoration.
    Terrain,
    Item,
    Npc,
    Event,
}

impl TileClass {
    /// Returns true if cells of this class get a live block during extraction.
    pub const fn is_materialized(self) -> bool {
        matches!(self, Self::Enemy | Self::Autotile)
    }
}

/// Source rectangle of one frame inside a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Texture reference plus its animation strip.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    pub texture: String,
    pub frames: Vec<FrameRect>,
}

impl Animation {
    pub fn first_frame(&self) -> Option<FrameRect> {
        self.frames.first().copied()
    }
}

/// Immutable description of a tile id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileDefinition {
    /// Template id, e.g. `"greenSlime"`. For enemies this keys the unit catalog.
    pub id: String,
    pub class: TileClass,
    pub pass: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub animate: Option<Animation>,
}

impl TileDefinition {
    pub fn new(id: impl Into<String>, class: TileClass, pass: bool) -> Self {
        Self {
            id: id.into(),
            class,
            pass,
            animate: None,
        }
    }

    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animate = Some(animation);
        self
    }

    /// Definition used for empty (`0`) cells, which have no dictionary entry.
    pub fn empty() -> Self {
        Self::new("empty", TileClass::Terrain, true)
    }
}

/// Shared id → definition table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TileDictionary {
    entries: BTreeMap<TileNumber, TileDefinition>,
}

impl TileDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, number: TileNumber, definition: TileDefinition) {
        self.entries.insert(number, definition);
    }

    pub fn get(&self, number: TileNumber) -> Option<&TileDefinition> {
        self.entries.get(&number)
    }

    /// Looks up a raw map cell value. Non-positive values have no entry.
    pub fn get_cell(&self, cell: i32) -> Option<&TileDefinition> {
        u32::try_from(cell)
            .ok()
            .and_then(|raw| self.get(TileNumber(raw)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileNumber, &TileDefinition)> {
        self.entries.iter().map(|(number, def)| (*number, def))
    }
}

impl FromIterator<(TileNumber, TileDefinition)> for TileDictionary {
    fn from_iter<T: IntoIterator<Item = (TileNumber, TileDefinition)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
