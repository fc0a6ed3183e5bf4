//! Converts recorded scene nodes back into a cell grid for the terminal.
//!
//! The floor draws into a [`RecordingScene`] in pixel space. Sprites are
//! anchored at the bottom centre of their cell and damage labels at the
//! bottom left, so `floor(x / unit_w), floor((y - 1) / unit_h)` recovers the
//! cell for both.

use std::collections::BTreeMap;

use tower_core::GameConfig;
use tower_core::env::{Catalog, FrameRect, TileClass};
use tower_core::render::recording::{NodeKind, RecordingScene};

/// Identity of the tile a sprite shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRef {
    pub id: String,
    pub class: TileClass,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageLabel {
    pub text: String,
    pub color: String,
}

/// Top-most tile and damage label of one cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellView {
    pub tile: Option<TileRef>,
    pub damage: Option<DamageLabel>,
    z_index: i32,
}

type FrameKey = (String, u32, u32, u32, u32);

fn frame_key(texture: &str, frame: FrameRect) -> FrameKey {
    (texture.to_owned(), frame.x, frame.y, frame.width, frame.height)
}

/// Reverse lookup from texture frames to the tiles that use them.
#[derive(Clone, Debug, Default)]
pub struct SpriteIndex {
    frames: BTreeMap<FrameKey, TileRef>,
}

impl SpriteIndex {
    pub fn new(catalog: &Catalog) -> Self {
        let mut frames = BTreeMap::new();
        for (_, definition) in catalog.dictionary.iter() {
            let Some(animation) = &definition.animate else {
                continue;
            };
            for frame in &animation.frames {
                frames
                    .entry(frame_key(&animation.texture, *frame))
                    .or_insert_with(|| TileRef {
                        id: definition.id.clone(),
                        class: definition.class,
                    });
            }
        }
        Self { frames }
    }

    pub fn lookup(&self, texture: &str, frame: FrameRect) -> Option<&TileRef> {
        self.frames.get(&frame_key(texture, frame))
    }
}

/// Cell grid rebuilt from the scene.
#[derive(Clone, Debug)]
pub struct Raster {
    width: u32,
    height: u32,
    cells: Vec<CellView>,
}

impl Raster {
    pub fn from_scene(
        scene: &RecordingScene,
        index: &SpriteIndex,
        config: &GameConfig,
        width: u32,
        height: u32,
    ) -> Self {
        let mut raster = Self {
            width,
            height,
            cells: vec![CellView::default(); (width * height) as usize],
        };
        if config.unit_width == 0 || config.unit_height == 0 {
            return raster;
        }

        for (id, node) in scene.nodes() {
            let Some(slot) = raster.slot(config, node.position) else {
                continue;
            };
            match &node.kind {
                NodeKind::Sprite { texture, frame, .. } => {
                    let z_index = scene.z_index_of(id);
                    let cell = &mut raster.cells[slot];
                    if cell.tile.is_some() && cell.z_index > z_index {
                        continue;
                    }
                    if let Some(tile) = index.lookup(texture, *frame) {
                        cell.tile = Some(tile.clone());
                        cell.z_index = z_index;
                    }
                }
                NodeKind::Text { text, style } => {
                    raster.cells[slot].damage = Some(DamageLabel {
                        text: text.clone(),
                        color: style.fill.clone(),
                    });
                }
                NodeKind::Container { .. } => {}
            }
        }
        raster
    }

    fn slot(&self, config: &GameConfig, (px, py): (f32, f32)) -> Option<usize> {
        let x = (px / config.unit_width as f32).floor();
        let y = ((py - 1.0) / config.unit_height as f32).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell(&self, x: u32, y: u32) -> Option<&CellView> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get((y * self.width + x) as usize)
    }
}
