//! Cell occupants: enemies, autotiles, passive units, and the [`Block`] wrapping them.
mod autotile;
mod block;
mod enemy;
mod unit;

pub use autotile::{Autotile, Connections};
pub use block::{Block, BlockPayload, TriggerOutcome};
pub use enemy::{BattleReport, BlockLocation, Disposal, Enemy, TriggerContext};
pub use unit::{GenericUnit, UnitOrigin};
