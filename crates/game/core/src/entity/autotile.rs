//! Tiles whose appearance depends on matching neighbours.
//!
//! An autotile picks one of 16 frames from its animation strip according to
//! which of its four orthogonal neighbours carry the same tile number.

use bitflags::bitflags;

use crate::env::{Animation, FrameRect};
use crate::state::{FloorId, Layer, Position, TileNumber};

bitflags! {
    /// Orthogonal neighbours that connect to an autotile.
    ///
    /// The raw bits double as the frame index in the autotile strip.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Connections: u8 {
        const NORTH = 1 << 0;
        const EAST  = 1 << 1;
        const SOUTH = 1 << 2;
        const WEST  = 1 << 3;
    }
}

impl Connections {
    /// Direction flags paired with their grid offsets.
    pub const OFFSETS: [(Connections, i32, i32); 4] = [
        (Connections::NORTH, 0, -1),
        (Connections::EAST, 1, 0),
        (Connections::SOUTH, 0, 1),
        (Connections::WEST, -1, 0),
    ];

    pub fn frame_index(self) -> usize {
        usize::from(self.bits())
    }

    /// Neighbours of `origin` for which `tile_at` reports `number`.
    pub fn matching<F>(origin: Position, number: TileNumber, tile_at: F) -> Self
    where
        F: Fn(Position) -> Option<TileNumber>,
    {
        Self::OFFSETS
            .into_iter()
            .filter(|(_, dx, dy)| tile_at(origin.offset(*dx, *dy)) == Some(number))
            .fold(Self::empty(), |mask, (flag, _, _)| mask | flag)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Autotile {
    number: TileNumber,
    position: Position,
    layer: Layer,
    floor_id: FloorId,
    pass: bool,
    connections: Connections,
}

impl Autotile {
    pub fn new(
        number: TileNumber,
        position: Position,
        layer: Layer,
        floor_id: FloorId,
        pass: bool,
    ) -> Self {
        Self {
            number,
            position,
            layer,
            floor_id,
            pass,
            connections: Connections::empty(),
        }
    }

    pub fn number(&self) -> TileNumber {
        self.number
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn floor_id(&self) -> &FloorId {
        &self.floor_id
    }

    pub fn pass(&self) -> bool {
        self.pass
    }

    pub fn connections(&self) -> Connections {
        self.connections
    }

    /// Recomputes the connection mask.
    ///
    /// `tile_at` reports the tile number at a neighbouring position of the
    /// same layer, or `None` off-map and on empty cells.
    pub fn resolve<F>(&mut self, tile_at: F) -> Connections
    where
        F: Fn(Position) -> Option<TileNumber>,
    {
        let connections = Connections::matching(self.position, self.number, tile_at);
        self.connections = connections;
        connections
    }

    /// Frame of `animation` matching the current connections.
    ///
    /// Strips shorter than 16 frames fall back to their first frame.
    pub fn frame(&self, animation: &Animation) -> Option<FrameRect> {
        animation
            .frames
            .get(self.connections.frame_index())
            .copied()
            .or_else(|| animation.first_frame())
    }
}
