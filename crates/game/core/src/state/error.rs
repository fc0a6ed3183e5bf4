//! Game state registry errors.

use crate::combat::CombatError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::floor::FloorError;
use crate::state::FloorId;

/// Errors raised while looking up or driving the active floor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// No floor has been activated yet.
    #[error("no active floor")]
    NoActiveFloor,

    #[error("floor '{floor}' is not registered")]
    UnknownFloor { floor: FloorId },

    #[error(transparent)]
    Floor(#[from] FloorError),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::NoActiveFloor | StateError::UnknownFloor { .. } => {
                ErrorSeverity::Validation
            }
            StateError::Floor(err) => err.severity(),
            StateError::Combat(err) => err.severity(),
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        match self {
            StateError::NoActiveFloor => None,
            StateError::UnknownFloor { floor } => Some(ErrorContext::new(floor.clone())),
            StateError::Floor(err) => err.context(),
            StateError::Combat(err) => err.context(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::NoActiveFloor => "STATE_NO_ACTIVE_FLOOR",
            StateError::UnknownFloor { .. } => "STATE_UNKNOWN_FLOOR",
            StateError::Floor(err) => err.error_code(),
            StateError::Combat(err) => err.error_code(),
        }
    }
}
