//! The player-controlled hero.
//!
//! Combat reads the hero's stats and applies hit-point loss through
//! [`Hero::add_status`]. The hero is always handed to combat explicitly;
//! nothing in the core reaches for a process-wide "current hero".

use super::Position;

/// Named numeric status fields of the hero.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKey {
    Hp,
    Atk,
    Def,
    /// Magic defence, subtracted from every battle's total damage.
    Mdef,
    Money,
    Exp,
}

/// Player entity taking part in combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    pub id: String,
    pub position: Position,
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
    pub mdef: i64,
    pub money: i64,
    pub exp: i64,
}

impl Hero {
    pub fn new(id: impl Into<String>, position: Position, hp: i64, atk: i64, def: i64) -> Self {
        Self {
            id: id.into(),
            position,
            hp,
            atk,
            def,
            mdef: 0,
            money: 0,
            exp: 0,
        }
    }

    pub fn status(&self, key: StatusKey) -> i64 {
        match key {
            StatusKey::Hp => self.hp,
            StatusKey::Atk => self.atk,
            StatusKey::Def => self.def,
            StatusKey::Mdef => self.mdef,
            StatusKey::Money => self.money,
            StatusKey::Exp => self.exp,
        }
    }

    /// Adds `delta` to a status field and returns the new value.
    ///
    /// No clamping is applied; a hero whose hp drops to zero or below is
    /// reported through [`Hero::is_defeated`].
    pub fn add_status(&mut self, key: StatusKey, delta: i64) -> i64 {
        let slot = match key {
            StatusKey::Hp => &mut self.hp,
            StatusKey::Atk => &mut self.atk,
            StatusKey::Def => &mut self.def,
            StatusKey::Mdef => &mut self.mdef,
            StatusKey::Money => &mut self.money,
            StatusKey::Exp => &mut self.exp,
        };
        *slot = slot.saturating_add(delta);
        *slot
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_status_applies_negative_delta() {
        let mut hero = Hero::new("hero", Position::ORIGIN, 100, 10, 10);
        assert_eq!(hero.add_status(StatusKey::Hp, -30), 70);
        assert_eq!(hero.status(StatusKey::Hp), 70);
        assert!(!hero.is_defeated());

        hero.add_status(StatusKey::Hp, -70);
        assert!(hero.is_defeated());
    }

    #[test]
    fn status_key_parses_snake_case() {
        assert_eq!("mdef".parse::<StatusKey>().unwrap(), StatusKey::Mdef);
        assert_eq!("HP".parse::<StatusKey>().unwrap(), StatusKey::Hp);
        assert_eq!(StatusKey::Money.to_string(), "money");
    }
}
