//! Combat-capable unit placed on a map cell.

use std::collections::BTreeMap;

use crate::combat::{CombatError, DamageCalculator, DamageResult, Special};
use crate::env::{EnemyTemplate, Specials};
use crate::state::{FloorId, Hero, Layer, Position, StatusKey, TileNumber};

/// Back reference from a payload to the block tracking its map presence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockLocation {
    pub floor: FloorId,
    pub layer: Layer,
    pub position: Position,
}

/// Everything a trigger needs from the turn in progress.
pub struct TriggerContext<'a> {
    pub hero: &'a mut Hero,
    pub calculator: &'a dyn DamageCalculator,
}

impl<'a> TriggerContext<'a> {
    pub fn new(hero: &'a mut Hero, calculator: &'a dyn DamageCalculator) -> Self {
        Self { hero, calculator }
    }
}

/// Who removes the enemy from play after a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disposal {
    /// The owning block must destroy itself; the floor then clears the cell.
    Block(BlockLocation),
    /// No block owns the enemy, so it marked itself destroyed.
    SelfDestroyed,
}

/// Result of one resolved combat exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleReport {
    pub enemy: String,
    pub position: Position,
    pub damage: DamageResult,
    /// Hero hit points after the damage was applied.
    pub hero_hp: i64,
    pub disposal: Disposal,
}

impl BattleReport {
    /// Hit points the hero lost.
    pub fn hp_lost(&self) -> i64 {
        self.damage.damage.unwrap_or_default()
    }
}

/// A live enemy on a floor.
///
/// Identity (`id`, `number`) and placement are fixed at construction; combat
/// stats stay mutable so effects can weaken or buff an enemy in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    id: String,
    number: TileNumber,
    floor_id: FloorId,
    position: Position,
    layer: Layer,

    pub name: Option<String>,
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
    pub special: Specials,
    pub vertical: bool,
    pub use_loop: bool,
    pub extra: BTreeMap<String, i64>,

    damage: Option<DamageResult>,
    block: Option<BlockLocation>,
    destroyed: bool,
}

impl Enemy {
    pub fn from_template(
        template: &EnemyTemplate,
        position: Position,
        layer: Layer,
        floor_id: FloorId,
    ) -> Self {
        Self {
            id: template.id.clone(),
            number: template.number,
            floor_id,
            position,
            layer,
            name: template.name.clone(),
            hp: template.hp,
            atk: template.atk,
            def: template.def,
            special: template.special.clone(),
            vertical: template.vertical,
            use_loop: template.use_loop.unwrap_or(false),
            extra: template.extra.clone(),
            damage: None,
            block: None,
            destroyed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn number(&self) -> TileNumber {
        self.number
    }

    pub fn floor_id(&self) -> &FloorId {
        &self.floor_id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Damage computed by the most recent trigger.
    pub fn last_damage(&self) -> Option<&DamageResult> {
        self.damage.as_ref()
    }

    pub fn block(&self) -> Option<&BlockLocation> {
        self.block.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn has_special(&self, special: Special) -> bool {
        self.special.contains(&special.code())
    }

    pub(crate) fn attach(&mut self) {
        self.block = Some(BlockLocation {
            floor: self.floor_id.clone(),
            layer: self.layer,
            position: self.position,
        });
    }

    /// Damage the hero would take fighting this enemy. No side effects.
    pub fn get_damage(&self, hero: &Hero, calculator: &dyn DamageCalculator) -> DamageResult {
        calculator.damage(self, hero)
    }

    /// Resolves the player interacting with this enemy's cell.
    pub fn trigger(&mut self, ctx: &mut TriggerContext<'_>) -> Result<BattleReport, CombatError> {
        self.battle(ctx)
    }

    fn battle(&mut self, ctx: &mut TriggerContext<'_>) -> Result<BattleReport, CombatError> {
        if self.destroyed {
            return Err(CombatError::AlreadyDestroyed {
                enemy: self.id.clone(),
                position: self.position,
            });
        }

        let result = self.get_damage(ctx.hero, ctx.calculator);
        let Some(damage) = result.damage else {
            return Err(CombatError::Unbeatable {
                enemy: self.id.clone(),
                floor: self.floor_id.clone(),
                layer: self.layer,
                position: self.position,
            });
        };

        self.damage = Some(result);
        let hero_hp = ctx.hero.add_status(StatusKey::Hp, -damage);

        // Map presence belongs to the block when there is one.
        let disposal = match &self.block {
            Some(location) => Disposal::Block(location.clone()),
            None => {
                self.destroy();
                Disposal::SelfDestroyed
            }
        };

        tracing::debug!(
            enemy = %self.id,
            position = %self.position,
            damage,
            hero_hp,
            "battle resolved"
        );

        Ok(BattleReport {
            enemy: self.id.clone(),
            position: self.position,
            damage: result,
            hero_hp,
            disposal,
        })
    }

    /// Marks the enemy destroyed. Removal from any collection is up to the owner.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::StandardFormula;

    fn template() -> EnemyTemplate {
        EnemyTemplate::new("greenSlime", TileNumber(201), 30, 40, 5)
            .with_special(1)
            .with_extra("n", 2)
    }

    #[test]
    fn template_fields_are_copied_and_use_loop_defaults_off() {
        let enemy = Enemy::from_template(&template(), Position::new(2, 3), Layer(1), "MT1".into());
        assert_eq!(enemy.id(), "greenSlime");
        assert_eq!(enemy.number(), TileNumber(201));
        assert_eq!(enemy.position(), Position::new(2, 3));
        assert_eq!(enemy.layer(), Layer(1));
        assert_eq!(enemy.floor_id().as_str(), "MT1");
        assert!(!enemy.use_loop);
        assert!(enemy.has_special(Special::FirstStrike));
        assert_eq!(enemy.extra.get("n"), Some(&2));
    }

    #[test]
    fn unowned_enemy_destroys_itself_after_battle() {
        let mut enemy =
            Enemy::from_template(&template(), Position::new(0, 0), Layer(1), "MT1".into());
        let mut hero = Hero::new("hero", Position::ORIGIN, 1000, 15, 10);
        let mut ctx = TriggerContext::new(&mut hero, &StandardFormula);

        let report = enemy.trigger(&mut ctx).expect("beatable");
        assert_eq!(report.disposal, Disposal::SelfDestroyed);
        assert!(enemy.is_destroyed());
        assert_eq!(report.hero_hp, 1000 - report.hp_lost());
        assert_eq!(enemy.last_damage(), Some(&report.damage));

        let again = enemy.trigger(&mut ctx);
        assert!(matches!(again, Err(CombatError::AlreadyDestroyed { .. })));
    }

    #[test]
    fn attached_enemy_defers_to_its_block() {
        let mut enemy =
            Enemy::from_template(&template(), Position::new(4, 4), Layer(1), "MT1".into());
        enemy.attach();
        let mut hero = Hero::new("hero", Position::ORIGIN, 1000, 15, 10);
        let mut ctx = TriggerContext::new(&mut hero, &StandardFormula);

        let report = enemy.trigger(&mut ctx).expect("beatable");
        assert!(matches!(report.disposal, Disposal::Block(ref loc) if loc.position == Position::new(4, 4)));
        assert!(!enemy.is_destroyed());
    }

    #[test]
    fn unbeatable_enemy_leaves_hero_untouched() {
        let mut enemy =
            Enemy::from_template(&template(), Position::new(0, 0), Layer(1), "MT1".into());
        let mut hero = Hero::new("hero", Position::ORIGIN, 1000, 5, 10);
        let mut ctx = TriggerContext::new(&mut hero, &StandardFormula);

        let err = enemy.trigger(&mut ctx).unwrap_err();
        assert!(matches!(err, CombatError::Unbeatable { .. }));
        assert_eq!(hero.hp, 1000);
        assert!(!enemy.is_destroyed());
    }
}
