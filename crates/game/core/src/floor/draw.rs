//! Drawing a floor through the scene adapter.
//!
//! Each layer gets its own `_map{n}` container at z-index `n * 10`; damage
//! labels live in a single `damage` container above every layer. Nodes are
//! cached per cell so removal can take them down individually.

use std::collections::BTreeMap;

use crate::combat::DamageCalculator;
use crate::entity::BlockPayload;
use crate::env::{Animation, FrameRect};
use crate::render::{NodeId, SceneGraph, TextRenderer, TextStyle, Viewport};
use crate::state::{Hero, Layer, Position, TileNumber};

use super::{Cell, Floor, FloorError};

/// Cache slot a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpriteLayer {
    Map(Layer),
    Damage,
}

/// Scene nodes a floor created, keyed by slot and cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpriteCache {
    nodes: BTreeMap<SpriteLayer, BTreeMap<Position, NodeId>>,
    containers: BTreeMap<SpriteLayer, NodeId>,
}

impl SpriteCache {
    pub fn get(&self, slot: SpriteLayer, position: Position) -> Option<NodeId> {
        self.nodes.get(&slot)?.get(&position).copied()
    }

    pub fn container(&self, slot: SpriteLayer) -> Option<NodeId> {
        self.containers.get(&slot).copied()
    }

    /// Number of cached cell nodes in a slot.
    pub fn len(&self, slot: SpriteLayer) -> usize {
        self.nodes.get(&slot).map_or(0, BTreeMap::len)
    }

    fn insert(&mut self, slot: SpriteLayer, position: Position, node: NodeId) {
        self.nodes.entry(slot).or_default().insert(position, node);
    }

    pub(crate) fn take(&mut self, slot: SpriteLayer, position: Position) -> Option<NodeId> {
        self.nodes.get_mut(&slot)?.remove(&position)
    }

    /// Forgets every cell node of a slot, returning them.
    fn clear(&mut self, slot: SpriteLayer) -> Vec<NodeId> {
        self.nodes
            .remove(&slot)
            .map(|cells| cells.into_values().collect())
            .unwrap_or_default()
    }
}

impl Floor {
    /// Forgets every node this floor placed.
    ///
    /// Node ids belong to the scene that allocated them; call this before
    /// drawing into a different scene.
    pub fn detach_scene(&mut self) {
        self.sprites = SpriteCache::default();
    }

    /// Full redraw.
    ///
    /// The main view follows the hero first. The floor is then re-extracted,
    /// damage previews are recalculated and every layer is rebuilt.
    pub fn draw<S>(
        &mut self,
        view: &mut Viewport,
        hero: &Hero,
        calculator: &dyn DamageCalculator,
        scene: &mut S,
    ) -> Result<(), FloorError>
    where
        S: SceneGraph + TextRenderer + ?Sized,
    {
        if view.is_main() {
            view.center_on(hero.position, self.width, self.height, &self.config);
        }
        let root = scene.root();
        scene.set_scale(root, view.scale);
        scene.set_position(root, -view.x, -view.y);

        self.extract()?;
        self.draw_damage(hero, calculator, scene);

        let layers: Vec<Layer> = self.map.keys().copied().collect();
        for layer in layers {
            self.draw_one_layer(layer, scene);
        }
        Ok(())
    }

    /// Rebuilds the container of one layer from scratch.
    pub fn draw_one_layer<S>(&mut self, layer: Layer, scene: &mut S)
    where
        S: SceneGraph + ?Sized,
    {
        let slot = SpriteLayer::Map(layer);
        if let Some(old) = self.sprites.containers.remove(&slot) {
            scene.destroy(old, true);
        }
        self.sprites.clear(slot);

        let container = scene.create_container(&format!("_map{}", layer.0), layer.z_index());
        scene.add_child(scene.root(), container);
        self.sprites.containers.insert(slot, container);

        self.draw_content(layer, container, scene);
    }

    fn draw_content<S>(&mut self, layer: Layer, container: NodeId, scene: &mut S)
    where
        S: SceneGraph + ?Sized,
    {
        let Some(grid) = self.map.get(&layer) else {
            return;
        };

        let mut drawn = Vec::new();
        for (position, raw) in grid.cells() {
            let node = match Cell::classify(raw) {
                Cell::Empty | Cell::Invalid(_) => None,
                Cell::Tile(number) => self.draw_one(number, position, scene),
                Cell::Resolved => {
                    match self.blocks.get(&layer).and_then(|cells| cells.get(&position)) {
                        Some(block) => match block.data() {
                            BlockPayload::Autotile(_) => self.draw_autotile(layer, position, scene),
                            _ => block
                                .number()
                                .and_then(|number| self.draw_one(number, position, scene)),
                        },
                        None => None,
                    }
                }
            };
            if let Some(node) = node {
                drawn.push((position, node));
            }
        }

        for (position, node) in drawn {
            scene.add_child(container, node);
            self.sprites.insert(SpriteLayer::Map(layer), position, node);
        }
    }

    /// Places a sprite for `number` at a cell.
    ///
    /// Tiles without an animation entry are not drawn.
    pub fn draw_one<S>(&self, number: TileNumber, position: Position, scene: &mut S) -> Option<NodeId>
    where
        S: SceneGraph + ?Sized,
    {
        let animation = self.catalog.dictionary.get(number)?.animate.as_ref()?;
        let frame = animation.first_frame()?;
        Some(self.place_sprite(animation, frame, number, position, scene))
    }

    /// Places the connection-dependent frame of an autotile block.
    pub fn draw_autotile<S>(&self, layer: Layer, position: Position, scene: &mut S) -> Option<NodeId>
    where
        S: SceneGraph + ?Sized,
    {
        let tile = self.blocks.get(&layer)?.get(&position)?.as_autotile()?;
        let animation = self.catalog.dictionary.get(tile.number())?.animate.as_ref()?;
        let frame = tile.frame(animation)?;
        Some(self.place_sprite(animation, frame, tile.number(), position, scene))
    }

    fn place_sprite<S>(
        &self,
        animation: &Animation,
        frame: FrameRect,
        number: TileNumber,
        position: Position,
        scene: &mut S,
    ) -> NodeId
    where
        S: SceneGraph + ?Sized,
    {
        let unit_w = self.config.unit_width as f32;
        let unit_h = self.config.unit_height as f32;

        let label = format!("{}@{},{}", number.0, position.x, position.y);
        let node = scene.create_sprite(&animation.texture, frame, &label);
        scene.set_anchor(node, 0.5, 1.0);
        scene.set_position(
            node,
            position.x as f32 * unit_w + unit_w / 2.0,
            position.y as f32 * unit_h + unit_h,
        );

        // Oversized cells scale the frame up, never down.
        if frame.width > 0 && frame.height > 0 {
            let sx = unit_w / frame.width as f32;
            let sy = unit_h / frame.height as f32;
            if sx > 1.0 && sy > 1.0 {
                scene.set_scale(node, sx.min(sy));
            }
        }
        node
    }

    /// Recalculates and redraws every damage label.
    pub fn draw_damage<S>(&mut self, hero: &Hero, calculator: &dyn DamageCalculator, scene: &mut S)
    where
        S: SceneGraph + TextRenderer + ?Sized,
    {
        for node in self.sprites.clear(SpriteLayer::Damage) {
            scene.destroy(node, true);
        }

        let container = match self.sprites.container(SpriteLayer::Damage) {
            Some(container) => container,
            None => {
                let z_index = self.map.len() as i32 * 10 + 20;
                let container = scene.create_container("damage", z_index);
                scene.add_child(scene.root(), container);
                self.sprites.containers.insert(SpriteLayer::Damage, container);
                container
            }
        };

        calculator.calculate_all(self, hero);

        let unit_w = self.config.unit_width as f32;
        let unit_h = self.config.unit_height as f32;
        let previews: Vec<_> = self.damages.iter().map(|(p, d)| (*p, *d)).collect();
        for (position, preview) in previews {
            let style = calculator.damage_style(preview.damage, hero);
            let text_style = TextStyle {
                font_size: unit_w / 3.0,
                font_family: "Arial".to_owned(),
                fill: style.color,
                stroke: "#000000".to_owned(),
                stroke_thickness: 2.0,
                anchor: (0.0, 1.0),
            };
            let node = scene.create_text(
                &style.text,
                2.0 + unit_w * position.x as f32,
                unit_h * (position.y + 1) as f32 - 2.0,
                &text_style,
            );
            scene.add_child(container, node);
            self.sprites.insert(SpriteLayer::Damage, position, node);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::combat::StandardFormula;
    use crate::config::GameConfig;
    use crate::env::{Catalog, EnemyTemplate, TileClass, TileDefinition, TileDictionary, UnitCatalog};
    use crate::floor::FloorTemplate;
    use crate::render::recording::{NodeKind, RecordingScene};

    fn strip(texture: &str, frames: u32) -> Animation {
        Animation {
            texture: texture.to_owned(),
            frames: (0..frames).map(|i| FrameRect::new(i * 32, 0, 32, 32)).collect(),
        }
    }

    fn floor() -> Floor {
        let dictionary: TileDictionary = [
            (
                TileNumber(1),
                TileDefinition::new("wall", TileClass::Terrain, false).with_animation(strip("terrains", 1)),
            ),
            (
                TileNumber(151),
                TileDefinition::new("water", TileClass::Autotile, false).with_animation(strip("autotile", 16)),
            ),
            (
                TileNumber(201),
                TileDefinition::new("greenSlime", TileClass::Enemy, false).with_animation(strip("enemys", 2)),
            ),
        ]
        .into_iter()
        .collect();
        let units: UnitCatalog = [EnemyTemplate::new("greenSlime", TileNumber(201), 20, 30, 2)]
            .into_iter()
            .collect();

        let template = FloorTemplate {
            floor_id: "MT1".into(),
            title: None,
            event_layer: Layer(1),
            map: [
                (Layer(0), vec![vec![1, 1, 1], vec![1, 0, 1]]),
                (Layer(1), vec![vec![0, 201, 0], vec![151, 151, 0]]),
            ]
            .into_iter()
            .collect(),
        };
        let catalog = Arc::new(Catalog::new(dictionary, units));
        Floor::new(template, catalog, GameConfig::default()).expect("valid floor")
    }

    fn hero() -> Hero {
        Hero::new("hero", Position::ORIGIN, 100, 12, 10)
    }

    #[test]
    fn draw_builds_one_container_per_layer() {
        let mut floor = floor();
        let mut scene = RecordingScene::new();
        let mut view = Viewport::main();

        floor.draw(&mut view, &hero(), &StandardFormula, &mut scene).expect("draw");

        let base = scene.container("_map0").expect("base layer");
        let event = scene.container("_map1").expect("event layer");
        let damage = scene.container("damage").expect("damage container");
        assert_eq!(scene.z_index_of(base), 0);
        assert_eq!(scene.z_index_of(event), 10);
        assert_eq!(scene.z_index_of(damage), 40);

        assert_eq!(floor.sprites().len(SpriteLayer::Map(Layer(0))), 5);
        assert_eq!(floor.sprites().len(SpriteLayer::Map(Layer(1))), 3);
        assert_eq!(scene.sprites().count(), 8);
    }

    #[test]
    fn sprites_are_anchored_at_cell_bottom_centre() {
        let mut floor = floor();
        let mut scene = RecordingScene::new();
        floor.draw(&mut Viewport::main(), &hero(), &StandardFormula, &mut scene).expect("draw");

        let node = floor
            .sprites()
            .get(SpriteLayer::Map(Layer(1)), Position::new(1, 0))
            .and_then(|id| scene.node(id))
            .expect("enemy sprite");
        assert_eq!(node.anchor, (0.5, 1.0));
        assert_eq!(node.position, (48.0, 32.0));
        let NodeKind::Sprite { label, .. } = &node.kind else {
            panic!("expected sprite");
        };
        assert_eq!(label, "201@1,0");
    }

    #[test]
    fn autotile_sprite_uses_connection_frame() {
        let mut floor = floor();
        let mut scene = RecordingScene::new();
        floor.draw(&mut Viewport::main(), &hero(), &StandardFormula, &mut scene).expect("draw");

        let node = floor
            .sprites()
            .get(SpriteLayer::Map(Layer(1)), Position::new(0, 1))
            .and_then(|id| scene.node(id))
            .expect("autotile sprite");
        let NodeKind::Sprite { frame, .. } = &node.kind else {
            panic!("expected sprite");
        };
        // East neighbour only.
        assert_eq!(frame.x, 2 * 32);
    }

    #[test]
    fn redraw_replaces_damage_labels() {
        let mut floor = floor();
        let mut scene = RecordingScene::new();
        let mut view = Viewport::main();

        floor.draw(&mut view, &hero(), &StandardFormula, &mut scene).expect("draw");
        floor.draw(&mut view, &hero(), &StandardFormula, &mut scene).expect("redraw");

        let texts: Vec<_> = scene.texts().collect();
        assert_eq!(texts.len(), 1);
        let (_, node) = texts[0];
        let NodeKind::Text { text, style } = &node.kind else {
            panic!("expected text");
        };
        assert_eq!(text, "20");
        assert_eq!(style.anchor, (0.0, 1.0));
        assert_eq!(node.position, (34.0, 30.0));
        assert_eq!(floor.damage_preview(Position::new(1, 0)).and_then(|d| d.damage), Some(20));
    }

    #[test]
    fn remove_block_takes_down_cell_sprites() {
        let mut floor = floor();
        let mut scene = RecordingScene::new();
        floor.draw(&mut Viewport::main(), &hero(), &StandardFormula, &mut scene).expect("draw");

        let sprite = floor
            .sprites()
            .get(SpriteLayer::Map(Layer(1)), Position::new(1, 0))
            .expect("enemy sprite");
        floor.remove_block(1, 0, &mut scene).expect("in range");

        assert!(!scene.contains(sprite));
        assert_eq!(scene.texts().count(), 0);
        assert!(floor.damages().is_empty());
    }

    #[test]
    fn detached_floor_redraws_into_a_fresh_scene() {
        let mut floor = floor();
        let mut view = Viewport::main();
        let mut first = RecordingScene::new();
        floor.draw(&mut view, &hero(), &StandardFormula, &mut first).expect("draw");

        floor.detach_scene();
        assert_eq!(floor.sprites().container(SpriteLayer::Damage), None);

        let mut second = RecordingScene::new();
        floor.draw(&mut view, &hero(), &StandardFormula, &mut second).expect("redraw");

        let damage = second.container("damage").expect("damage container");
        assert_eq!(floor.sprites().container(SpriteLayer::Damage), Some(damage));
        assert_eq!(second.z_index_of(damage), 40);
        let texts: Vec<_> = second.texts().collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].1.parent, Some(damage));
        assert_eq!(second.sprites().count(), 8);
    }
}
