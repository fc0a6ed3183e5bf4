use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{FloorId, Layer, Position};

/// Errors raised while resolving a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    /// Combat was requested while no hero is active.
    #[error("no active hero to fight with")]
    NoActiveHero,

    /// The hero cannot damage this enemy; fighting would never end.
    #[error("enemy '{enemy}' at {position} cannot be defeated by the current hero")]
    Unbeatable {
        enemy: String,
        floor: FloorId,
        layer: Layer,
        position: Position,
    },

    /// The enemy was already destroyed by an earlier exchange.
    #[error("enemy '{enemy}' at {position} is already destroyed")]
    AlreadyDestroyed { enemy: String, position: Position },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoActiveHero => ErrorSeverity::Fatal,
            Self::Unbeatable { .. } => ErrorSeverity::Recoverable,
            Self::AlreadyDestroyed { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        match self {
            Self::Unbeatable {
                floor,
                layer,
                position,
                ..
            } => Some(
                ErrorContext::new(floor.clone())
                    .with_layer(*layer)
                    .with_position(*position),
            ),
            Self::AlreadyDestroyed { position, .. } => Some(ErrorContext {
                position: Some(*position),
                ..ErrorContext::default()
            }),
            Self::NoActiveHero => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveHero => "COMBAT_NO_ACTIVE_HERO",
            Self::Unbeatable { .. } => "COMBAT_UNBEATABLE",
            Self::AlreadyDestroyed { .. } => "COMBAT_ALREADY_DESTROYED",
        }
    }
}
