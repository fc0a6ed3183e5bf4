//! Player and session state.
//!
//! [`GameState`] is the active-game collaborator: it owns the hero, the main
//! viewport and every live floor, and drives interactions on the current one.
mod common;
mod error;
mod game;
mod hero;

pub use common::{FloorId, Layer, Position, TileNumber};
pub use error::StateError;
pub use game::{Area, GameState, StepOutcome};
pub use hero::{Hero, StatusKey};
