//! Lookup, passability, removal, and interaction.

use std::borrow::Cow;

use crate::entity::{Block, GenericUnit, TriggerContext, TriggerOutcome};
use crate::env::TileDefinition;
use crate::render::SceneGraph;
use crate::state::{Layer, Position, TileNumber};

use super::{Cell, Floor, FloorError, SpriteLayer};

/// Enumerated result of a passability query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Passability {
    OutOfMap,
    /// Raw cell is `0`.
    Empty,
    Open,
    Blocked,
    /// Non-empty cell with nothing to resolve it against.
    Unresolved,
}

impl Passability {
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Empty | Self::Open)
    }
}

impl Floor {
    /// Strict half-open bounds check.
    pub fn in_map(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn locate(&self, x: i32, y: i32, layer: Layer) -> Result<Position, FloorError> {
        let position = Position::new(x, y);
        if !self.in_map(x, y) {
            return Err(FloorError::OutOfRange {
                floor: self.floor_id.clone(),
                layer,
                position,
            });
        }
        if !self.map.contains_key(&layer) {
            return Err(FloorError::UnknownLayer {
                floor: self.floor_id.clone(),
                layer,
            });
        }
        Ok(position)
    }

    pub fn get_block(&self, x: i32, y: i32) -> Result<Cow<'_, Block>, FloorError> {
        self.get_block_on(x, y, self.event)
    }

    /// Block at a cell.
    ///
    /// Parsed cells return the stored block. Anything else gets a transient
    /// block synthesized from the dictionary; it is never written back.
    pub fn get_block_on(&self, x: i32, y: i32, layer: Layer) -> Result<Cow<'_, Block>, FloorError> {
        let position = self.locate(x, y, layer)?;

        if let Some(block) = self.blocks.get(&layer).and_then(|cells| cells.get(&position)) {
            return Ok(Cow::Borrowed(block));
        }

        let raw = self.cell(layer, position).unwrap_or(Cell::EMPTY);
        let floor_id = self.floor_id.clone();
        let unit = match Cell::classify(raw) {
            Cell::Empty => {
                GenericUnit::from_definition(&TileDefinition::empty(), raw, position, layer, floor_id)
            }
            Cell::Tile(number) => match self.catalog.dictionary.get(number) {
                Some(definition) => {
                    GenericUnit::from_definition(definition, raw, position, layer, floor_id)
                }
                None => {
                    tracing::warn!(floor = %self.floor_id, %layer, %position, raw, "tile id not in dictionary");
                    GenericUnit::unresolved(raw, position, layer, floor_id)
                }
            },
            Cell::Resolved | Cell::Invalid(_) => {
                tracing::warn!(floor = %self.floor_id, %layer, %position, raw, "cell has no block");
                GenericUnit::unresolved(raw, position, layer, floor_id)
            }
        };

        Ok(Cow::Owned(Block::generate(unit)))
    }

    /// Stored block at a cell, for in-place mutation.
    pub fn get_block_mut(&mut self, x: i32, y: i32, layer: Layer) -> Option<&mut Block> {
        self.blocks.get_mut(&layer)?.get_mut(&Position::new(x, y))
    }

    pub fn passability(&self, x: i32, y: i32) -> Passability {
        self.passability_on(x, y, self.event)
    }

    pub fn passability_on(&self, x: i32, y: i32, layer: Layer) -> Passability {
        if !self.in_map(x, y) {
            return Passability::OutOfMap;
        }
        let position = Position::new(x, y);
        let Some(raw) = self.cell(layer, position) else {
            return Passability::Unresolved;
        };

        let pass = match Cell::classify(raw) {
            Cell::Empty => return Passability::Empty,
            Cell::Resolved => self
                .blocks
                .get(&layer)
                .and_then(|cells| cells.get(&position))
                .map(Block::pass),
            Cell::Tile(number) => self
                .blocks
                .get(&layer)
                .and_then(|cells| cells.get(&position))
                .map(Block::pass)
                .or_else(|| self.catalog.dictionary.get(number).map(|def| def.pass)),
            Cell::Invalid(_) => None,
        };

        match pass {
            Some(true) => Passability::Open,
            Some(false) => Passability::Blocked,
            None => Passability::Unresolved,
        }
    }

    pub fn pass(&self, x: i32, y: i32) -> bool {
        self.pass_on(x, y, self.event)
    }

    /// Unresolved cells count as impassable.
    pub fn pass_on(&self, x: i32, y: i32, layer: Layer) -> bool {
        self.passability_on(x, y, layer).is_passable()
    }

    pub fn can_arrive(&self, x: i32, y: i32) -> bool {
        self.can_arrive_on(x, y, self.event)
    }

    pub fn can_arrive_on(&self, x: i32, y: i32, layer: Layer) -> bool {
        self.in_map(x, y) && self.pass_on(x, y, layer)
    }

    pub fn tile_number(&self, x: i32, y: i32) -> Option<TileNumber> {
        self.tile_number_on(x, y, self.event)
    }

    /// Dictionary number shown at a cell, looking through the `-2` sentinel.
    pub fn tile_number_on(&self, x: i32, y: i32, layer: Layer) -> Option<TileNumber> {
        let position = Position::new(x, y);
        match self.grid(layer)?.cell(position)? {
            Cell::Tile(number) => Some(number),
            Cell::Resolved => self.blocks.get(&layer)?.get(&position)?.number(),
            Cell::Empty | Cell::Invalid(_) => None,
        }
    }

    pub fn remove_block<S>(&mut self, x: i32, y: i32, scene: &mut S) -> Result<Option<Block>, FloorError>
    where
        S: SceneGraph + ?Sized,
    {
        self.remove_block_on(x, y, self.event, scene)
    }

    /// Returns a cell to empty.
    ///
    /// Drops the stored block (if any) and its damage preview, writes `0` into
    /// the map, and destroys the cell's cached sprites. Works on cells without
    /// a block too.
    pub fn remove_block_on<S>(
        &mut self,
        x: i32,
        y: i32,
        layer: Layer,
        scene: &mut S,
    ) -> Result<Option<Block>, FloorError>
    where
        S: SceneGraph + ?Sized,
    {
        let position = self.locate(x, y, layer)?;

        let removed = self
            .blocks
            .get_mut(&layer)
            .and_then(|cells| cells.remove(&position));
        if let Some(grid) = self.map.get_mut(&layer) {
            grid.set(position, Cell::EMPTY);
        }

        if let Some(node) = self.sprites.take(SpriteLayer::Map(layer), position) {
            scene.destroy(node, true);
        }
        if removed.as_ref().is_some_and(|block| block.as_enemy().is_some()) {
            self.damages.remove(&position);
            if let Some(node) = self.sprites.take(SpriteLayer::Damage, position) {
                scene.destroy(node, true);
            }
        }

        if removed.as_ref().is_some_and(|block| block.as_autotile().is_some()) {
            self.resolve_autotiles(layer);
        }

        tracing::debug!(floor = %self.floor_id, %layer, %position, removed = removed.is_some(), "block removed");
        Ok(removed)
    }

    pub fn trigger<S>(
        &mut self,
        x: i32,
        y: i32,
        ctx: &mut TriggerContext<'_>,
        scene: &mut S,
    ) -> Result<TriggerOutcome, FloorError>
    where
        S: SceneGraph + ?Sized,
    {
        self.trigger_on(x, y, self.event, ctx, scene)
    }

    /// Triggers the stored block at a cell and clears the cell once the block
    /// ends up destroyed. Cells without a stored block do nothing.
    pub fn trigger_on<S>(
        &mut self,
        x: i32,
        y: i32,
        layer: Layer,
        ctx: &mut TriggerContext<'_>,
        scene: &mut S,
    ) -> Result<TriggerOutcome, FloorError>
    where
        S: SceneGraph + ?Sized,
    {
        let position = self.locate(x, y, layer)?;
        let Some(block) = self
            .blocks
            .get_mut(&layer)
            .and_then(|cells| cells.get_mut(&position))
        else {
            return Ok(TriggerOutcome::Nothing);
        };

        let outcome = block.trigger(ctx)?;
        if block.is_destroyed() {
            self.remove_block_on(x, y, layer, scene)?;
        }

        if let TriggerOutcome::Battle(report) = &outcome {
            tracing::info!(
                floor = %self.floor_id,
                enemy = %report.enemy,
                %position,
                hp_lost = report.hp_lost(),
                hero_hp = report.hero_hp,
                "battle resolved"
            );
        }
        Ok(outcome)
    }
}
