//! Parsing raw tile ids into live blocks.

use std::collections::BTreeMap;

use crate::entity::{Autotile, Block, BlockPayload, Enemy};
use crate::env::TileClass;
use crate::state::{Layer, Position, TileNumber};

use super::{Cell, DamagePreview, Floor, FloorError};

impl Floor {
    /// Re-parses every layer.
    ///
    /// Destructive: all previously parsed blocks (and their mutated state) are
    /// discarded and rebuilt from tile ids. Cells already holding the `-2`
    /// sentinel are rebuilt from the tile number of the block they held, so
    /// repeated extraction yields the same registry. On error the floor is
    /// left exactly as it was.
    pub fn extract(&mut self) -> Result<&mut Self, FloorError> {
        let layers: Vec<Layer> = self.map.keys().copied().collect();
        let previous = std::mem::take(&mut self.blocks);
        let previews = std::mem::take(&mut self.damages);
        let grids = self.map.clone();

        for layer in layers {
            let old = previous.get(&layer).cloned().unwrap_or_default();
            if let Err(err) = self.extract_layer_from(layer, &old) {
                // Resolved cells can only be rebuilt from the blocks they held.
                self.blocks = previous;
                self.damages = previews;
                self.map = grids;
                return Err(err);
            }
        }

        tracing::debug!(
            floor = %self.floor_id,
            blocks = self.blocks.values().map(BTreeMap::len).sum::<usize>(),
            enemies = self.damages.len(),
            "floor extracted"
        );
        Ok(self)
    }

    /// Re-parses a single layer. Unknown layers are skipped.
    pub fn extract_layer(&mut self, layer: Layer) -> Result<&mut Self, FloorError> {
        let old = self.blocks.remove(&layer).unwrap_or_default();
        for (position, block) in &old {
            if block.as_enemy().is_some() {
                self.damages.remove(position);
            }
        }
        self.extract_layer_from(layer, &old)?;
        Ok(self)
    }

    fn extract_layer_from(
        &mut self,
        layer: Layer,
        previous: &BTreeMap<Position, Block>,
    ) -> Result<(), FloorError> {
        let Some(grid) = self.map.get(&layer) else {
            return Ok(());
        };
        self.blocks.insert(layer, BTreeMap::new());

        let cells: Vec<(Position, i32)> = grid.cells().collect();
        for (position, raw) in cells {
            let number = match Cell::classify(raw) {
                Cell::Empty => continue,
                Cell::Tile(number) => number,
                Cell::Resolved => match previous.get(&position).and_then(Block::number) {
                    Some(number) => number,
                    None => {
                        tracing::warn!(
                            floor = %self.floor_id,
                            %layer,
                            %position,
                            "resolved cell has no block to rebuild from"
                        );
                        continue;
                    }
                },
                Cell::Invalid(raw) => {
                    return Err(FloorError::UnknownTile {
                        floor: self.floor_id.clone(),
                        layer,
                        position,
                        number: raw,
                    });
                }
            };

            let Some(definition) = self.catalog.dictionary.get(number) else {
                return Err(FloorError::UnknownTile {
                    floor: self.floor_id.clone(),
                    layer,
                    position,
                    number: raw,
                });
            };

            match definition.class {
                TileClass::Enemy => {
                    let id = definition.id.clone();
                    self.extract_enemy(&id, layer, position)?;
                }
                TileClass::Autotile => {
                    let pass = definition.pass;
                    self.extract_autotile(number, position, layer, pass);
                }
                TileClass::Terrain | TileClass::Item | TileClass::Npc | TileClass::Event => {}
            }

            let placed = self
                .blocks
                .get(&layer)
                .is_some_and(|cells| cells.contains_key(&position));
            if placed && let Some(grid) = self.map.get_mut(&layer) {
                grid.set(position, Cell::RESOLVED);
            }
        }

        self.resolve_autotiles(layer);
        Ok(())
    }

    /// Places an enemy block. No-op when the layer does not exist.
    fn extract_enemy(&mut self, id: &str, layer: Layer, position: Position) -> Result<(), FloorError> {
        if !self.map.contains_key(&layer) {
            return Ok(());
        }

        let Some(template) = self.catalog.units.enemy(id) else {
            return Err(FloorError::UnknownEnemy {
                floor: self.floor_id.clone(),
                layer,
                position,
                id: id.to_owned(),
            });
        };

        let enemy = Enemy::from_template(template, position, layer, self.floor_id.clone());
        let block = Block::new(BlockPayload::Enemy(enemy), position);
        self.blocks.entry(layer).or_default().insert(position, block);
        self.damages.insert(position, DamagePreview::reset());
        Ok(())
    }

    /// Places an autotile block. No-op when the layer does not exist.
    fn extract_autotile(&mut self, number: TileNumber, position: Position, layer: Layer, pass: bool) {
        if !self.map.contains_key(&layer) {
            return;
        }

        let tile = Autotile::new(number, position, layer, self.floor_id.clone(), pass);
        let block = Block::new(BlockPayload::Autotile(tile), position);
        self.blocks.entry(layer).or_default().insert(position, block);
    }

    /// Recomputes neighbour connections of every autotile on `layer`.
    pub(crate) fn resolve_autotiles(&mut self, layer: Layer) {
        let Some(grid) = self.map.get(&layer) else {
            return;
        };
        let numbers: BTreeMap<Position, TileNumber> = grid
            .cells()
            .filter_map(|(position, _)| {
                let number = self.tile_number_on(position.x, position.y, layer)?;
                Some((position, number))
            })
            .collect();

        let Some(cells) = self.blocks.get_mut(&layer) else {
            return;
        };
        for block in cells.values_mut() {
            if let BlockPayload::Autotile(tile) = block.data_mut() {
                tile.resolve(|neighbour| numbers.get(&neighbour).copied());
            }
        }
    }
}
