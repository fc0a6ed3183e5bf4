//! Battle damage calculation.

use crate::entity::Enemy;
use crate::floor::{DamagePreview, Floor};
use crate::state::Hero;

use super::style::DamageStyle;

// ============================================================================
// Special abilities
// ============================================================================

/// Special-ability codes understood by [`StandardFormula`].
///
/// Unknown codes are carried on the enemy but ignored by the formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Special {
    /// Enemy strikes before the hero's first blow.
    FirstStrike,
    /// Enemy attack ignores hero defence.
    Magic,
    /// Hero deals at most 1 damage per turn.
    Sturdy,
    /// Enemy hits twice per turn.
    DoubleHit,
    /// Enemy hits three times per turn.
    TripleHit,
}

impl Special {
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::FirstStrike),
            2 => Some(Self::Magic),
            3 => Some(Self::Sturdy),
            4 => Some(Self::DoubleHit),
            5 => Some(Self::TripleHit),
            _ => None,
        }
    }

    pub const fn code(self) -> u32 {
        match self {
            Self::FirstStrike => 1,
            Self::Magic => 2,
            Self::Sturdy => 3,
            Self::DoubleHit => 4,
            Self::TripleHit => 5,
        }
    }
}

// ============================================================================
// Damage result
// ============================================================================

/// Outcome of a damage calculation for one hero against one enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DamageResult {
    /// Hit points the hero loses, `None` when the hero cannot hurt the enemy.
    pub damage: Option<i64>,
    /// Extra attack the hero needs to finish the fight one turn sooner.
    pub critical: Option<i64>,
    /// Hero attack turns needed to defeat the enemy.
    pub turns: u32,
}

impl DamageResult {
    pub const fn unbeatable() -> Self {
        Self {
            damage: None,
            critical: None,
            turns: 0,
        }
    }

    pub const fn is_beatable(&self) -> bool {
        self.damage.is_some()
    }
}

impl From<DamageResult> for DamagePreview {
    fn from(result: DamageResult) -> Self {
        DamagePreview {
            damage: result.damage,
            critical: result.critical,
        }
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Combat-formula service consulted by enemies and by the floor's damage preview.
pub trait DamageCalculator {
    /// Computes the damage the hero takes from fighting `enemy`. No side effects.
    fn damage(&self, enemy: &Enemy, hero: &Hero) -> DamageResult;

    /// Recomputes the preview of every enemy cell on `floor`.
    fn calculate_all(&self, floor: &mut Floor, hero: &Hero) {
        let previews: Vec<_> = floor
            .enemies()
            .map(|(_, enemy)| (enemy.position(), self.damage(enemy, hero).into()))
            .collect();

        for (position, preview) in previews {
            floor.set_damage_preview(position, preview);
        }
    }

    /// Display text and colour for a cached preview value.
    fn damage_style(&self, damage: Option<i64>, hero: &Hero) -> DamageStyle {
        DamageStyle::graded(damage, hero.hp)
    }
}

/// Classic tower rules: alternating blows, hero first, no randomness.
///
/// ```text
/// hero_per_turn  = hero.atk - enemy.def        (capped at 1 if sturdy)
/// turns          = ceil(enemy.hp / hero_per_turn)
/// enemy_per_turn = max(enemy.atk - hero.def, 0) * hits   (magic: enemy.atk * hits)
/// damage         = max((turns - 1) * enemy_per_turn - hero.mdef, 0)
///                  (first strike: turns instead of turns - 1)
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardFormula;

impl StandardFormula {
    fn hero_per_turn(enemy: &Enemy, hero: &Hero) -> i64 {
        let raw = hero.atk.saturating_sub(enemy.def);
        if enemy.has_special(Special::Sturdy) {
            raw.min(1)
        } else {
            raw
        }
    }

    fn enemy_per_turn(enemy: &Enemy, hero: &Hero) -> i64 {
        let per_hit = if enemy.has_special(Special::Magic) {
            enemy.atk.max(0)
        } else {
            enemy.atk.saturating_sub(hero.def).max(0)
        };

        let hits = if enemy.has_special(Special::TripleHit) {
            3
        } else if enemy.has_special(Special::DoubleHit) {
            2
        } else {
            1
        };

        per_hit.saturating_mul(hits)
    }

    fn turns_needed(hp: i64, per_turn: i64) -> i64 {
        (hp.max(1) - 1) / per_turn + 1
    }
}

impl DamageCalculator for StandardFormula {
    fn damage(&self, enemy: &Enemy, hero: &Hero) -> DamageResult {
        let hero_per_turn = Self::hero_per_turn(enemy, hero);
        if hero_per_turn <= 0 {
            return DamageResult::unbeatable();
        }

        let turns = Self::turns_needed(enemy.hp, hero_per_turn);
        let enemy_turns = if enemy.has_special(Special::FirstStrike) {
            turns
        } else {
            turns - 1
        };

        let total = enemy_turns.saturating_mul(Self::enemy_per_turn(enemy, hero));
        let damage = total.saturating_sub(hero.mdef).max(0);

        // Sturdy caps hero damage, so more attack never shortens the fight.
        let critical = if turns <= 1 || enemy.has_special(Special::Sturdy) {
            None
        } else {
            let needed = Self::turns_needed(enemy.hp, turns - 1);
            Some(needed.saturating_sub(hero_per_turn))
        };

        DamageResult {
            damage: Some(damage),
            critical,
            turns: u32::try_from(turns).unwrap_or(u32::MAX),
        }
    }
}
