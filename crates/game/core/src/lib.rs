//! Floor and combat logic of a tile-based tower game.
//!
//! `tower-core` turns layered grids of tile ids into live blocks (enemies,
//! autotiles, passive units), answers lookup and passability queries, and
//! resolves battles between the hero and enemies. It performs no I/O; content
//! comes in as plain data and drawing goes out through the [`render`] adapter
//! traits.
pub mod combat;
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod floor;
pub mod render;
pub mod state;

pub use combat::{CombatError, DamageCalculator, DamageResult, DamageStyle, Special, StandardFormula};
pub use config::GameConfig;
pub use entity::{
    Autotile, BattleReport, Block, BlockPayload, Connections, Disposal, Enemy, GenericUnit,
    TriggerContext, TriggerOutcome,
};
pub use env::{Catalog, EnemyTemplate, TileClass, TileDefinition, TileDictionary, UnitCatalog};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use floor::{DamagePreview, Floor, FloorError, FloorTemplate, Passability};
pub use render::{NodeId, SceneGraph, TextRenderer, TextStyle, Viewport};
pub use state::{
    Area, FloorId, GameState, Hero, Layer, Position, StateError, StatusKey, StepOutcome,
    TileNumber,
};
