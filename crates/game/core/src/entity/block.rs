//! Uniform container for whatever occupies a map cell.

use crate::combat::CombatError;
use crate::env::TileClass;
use crate::state::{Position, TileNumber};

use super::{Autotile, BattleReport, Disposal, Enemy, GenericUnit, TriggerContext};

/// The payload a block wraps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockPayload {
    Enemy(Enemy),
    Autotile(Autotile),
    Unit(GenericUnit),
}

impl BlockPayload {
    pub fn class(&self) -> TileClass {
        match self {
            Self::Enemy(_) => TileClass::Enemy,
            Self::Autotile(_) => TileClass::Autotile,
            Self::Unit(unit) => unit.class,
        }
    }
}

/// What happened when a block was triggered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    Battle(BattleReport),
    /// The payload has no interaction behaviour.
    Nothing,
}

/// A cell occupant with the uniform trigger/destroy/pass contract.
///
/// The block exclusively owns its payload. An enemy wrapped by a block hands
/// its own removal to the block, which in turn is cleared from the map by the
/// floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    position: Position,
    payload: BlockPayload,
    destroyed: bool,
}

impl Block {
    pub fn new(mut payload: BlockPayload, position: Position) -> Self {
        if let BlockPayload::Enemy(enemy) = &mut payload {
            enemy.attach();
        }

        Self {
            position,
            payload,
            destroyed: false,
        }
    }

    /// Wraps a synthesized unit for lookup-only use.
    pub fn generate(unit: GenericUnit) -> Self {
        let position = unit.position;
        Self::new(BlockPayload::Unit(unit), position)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn data(&self) -> &BlockPayload {
        &self.payload
    }

    pub fn data_mut(&mut self) -> &mut BlockPayload {
        &mut self.payload
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match &self.payload {
            BlockPayload::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn as_autotile(&self) -> Option<&Autotile> {
        match &self.payload {
            BlockPayload::Autotile(tile) => Some(tile),
            _ => None,
        }
    }

    pub fn as_unit(&self) -> Option<&GenericUnit> {
        match &self.payload {
            BlockPayload::Unit(unit) => Some(unit),
            _ => None,
        }
    }

    /// Dictionary number of the payload; `None` for empty or unresolved units.
    pub fn number(&self) -> Option<TileNumber> {
        match &self.payload {
            BlockPayload::Enemy(enemy) => Some(enemy.number()),
            BlockPayload::Autotile(tile) => Some(tile.number()),
            BlockPayload::Unit(unit) => u32::try_from(unit.number).ok().map(TileNumber),
        }
    }

    /// Whether the hero may walk onto this cell.
    pub fn pass(&self) -> bool {
        match &self.payload {
            BlockPayload::Enemy(_) => false,
            BlockPayload::Autotile(tile) => tile.pass(),
            BlockPayload::Unit(unit) => unit.pass,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Runs the payload's interaction.
    pub fn trigger(&mut self, ctx: &mut TriggerContext<'_>) -> Result<TriggerOutcome, CombatError> {
        let BlockPayload::Enemy(enemy) = &mut self.payload else {
            return Ok(TriggerOutcome::Nothing);
        };

        let report = enemy.trigger(ctx)?;
        if matches!(report.disposal, Disposal::Block(_)) {
            self.destroy();
        }
        Ok(TriggerOutcome::Battle(report))
    }

    /// Marks the block and its payload destroyed. Idempotent.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        match &mut self.payload {
            BlockPayload::Enemy(enemy) => enemy.destroy(),
            BlockPayload::Autotile(_) | BlockPayload::Unit(_) => {}
        }
    }
}
