use crate::combat::CombatError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{FloorId, Layer, Position};

/// Errors raised by floor construction, parsing, lookup, and interaction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FloorError {
    /// Coordinate outside `[0, width) x [0, height)`.
    #[error("position {position} is outside floor '{floor}'")]
    OutOfRange {
        floor: FloorId,
        layer: Layer,
        position: Position,
    },

    #[error("floor '{floor}' has no layer {layer}")]
    UnknownLayer { floor: FloorId, layer: Layer },

    /// A map cell refers to a tile id missing from the dictionary.
    #[error("tile id {number} at {position} on floor '{floor}' {layer} is not in the dictionary")]
    UnknownTile {
        floor: FloorId,
        layer: Layer,
        position: Position,
        number: i32,
    },

    #[error("enemy template '{id}' (at {position} on floor '{floor}') not found")]
    UnknownEnemy {
        floor: FloorId,
        layer: Layer,
        position: Position,
        id: String,
    },

    #[error("floor '{floor}' has no map data")]
    EmptyMap { floor: FloorId },

    #[error("floor '{floor}' {layer}: row {row} has {found} cells, expected {expected}")]
    RaggedLayer {
        floor: FloorId,
        layer: Layer,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("floor '{floor}' {layer} is {found:?}, base layer is {expected:?}")]
    DimensionMismatch {
        floor: FloorId,
        layer: Layer,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl GameError for FloorError {
    fn severity(&self) -> ErrorSeverity {
        use FloorError::*;
        match self {
            OutOfRange { .. } | UnknownLayer { .. } => ErrorSeverity::Validation,
            UnknownTile { .. }
            | UnknownEnemy { .. }
            | EmptyMap { .. }
            | RaggedLayer { .. }
            | DimensionMismatch { .. } => ErrorSeverity::Internal,
            Combat(err) => err.severity(),
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        use FloorError::*;
        match self {
            OutOfRange {
                floor,
                layer,
                position,
            }
            | UnknownTile {
                floor,
                layer,
                position,
                ..
            }
            | UnknownEnemy {
                floor,
                layer,
                position,
                ..
            } => Some(
                ErrorContext::new(floor.clone())
                    .with_layer(*layer)
                    .with_position(*position),
            ),
            UnknownLayer { floor, layer }
            | RaggedLayer { floor, layer, .. }
            | DimensionMismatch { floor, layer, .. } => {
                Some(ErrorContext::new(floor.clone()).with_layer(*layer))
            }
            EmptyMap { floor } => Some(ErrorContext::new(floor.clone())),
            Combat(err) => err.context(),
        }
    }

    fn error_code(&self) -> &'static str {
        use FloorError::*;
        match self {
            OutOfRange { .. } => "FLOOR_OUT_OF_RANGE",
            UnknownLayer { .. } => "FLOOR_UNKNOWN_LAYER",
            UnknownTile { .. } => "FLOOR_UNKNOWN_TILE",
            UnknownEnemy { .. } => "FLOOR_UNKNOWN_ENEMY",
            EmptyMap { .. } => "FLOOR_EMPTY_MAP",
            RaggedLayer { .. } => "FLOOR_RAGGED_LAYER",
            DimensionMismatch { .. } => "FLOOR_DIMENSION_MISMATCH",
            Combat(err) => err.error_code(),
        }
    }
}
