use crate::env::{TileClass, TileDefinition};
use crate::state::{FloorId, Layer, Position};

/// Where a generic unit's data came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitOrigin {
    /// Built from a dictionary entry.
    Dictionary,
    /// The cell is empty (`0`).
    Empty,
    /// No dictionary entry or block could be found for the cell.
    Unresolved,
}

/// Passive cell occupant with fixed passability and no behaviour.
///
/// Floors synthesize these on lookup for plain terrain cells; they are never
/// written back into the block registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericUnit {
    pub id: String,
    /// Raw map cell value the unit was built from.
    pub number: i32,
    pub class: TileClass,
    pub position: Position,
    pub layer: Layer,
    pub floor_id: FloorId,
    pub pass: bool,
    pub origin: UnitOrigin,
}

impl GenericUnit {
    pub fn from_definition(
        definition: &TileDefinition,
        number: i32,
        position: Position,
        layer: Layer,
        floor_id: FloorId,
    ) -> Self {
        let origin = if number == 0 {
            UnitOrigin::Empty
        } else {
            UnitOrigin::Dictionary
        };

        Self {
            id: definition.id.clone(),
            number,
            class: definition.class,
            position,
            layer,
            floor_id,
            pass: definition.pass,
            origin,
        }
    }

    /// Impassable placeholder for a cell whose contents cannot be resolved.
    pub fn unresolved(number: i32, position: Position, layer: Layer, floor_id: FloorId) -> Self {
        Self {
            id: "unresolved".to_owned(),
            number,
            class: TileClass::Terrain,
            position,
            layer,
            floor_id,
            pass: false,
            origin: UnitOrigin::Unresolved,
        }
    }
}
