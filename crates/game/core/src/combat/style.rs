//! Display styling of damage previews.

/// Text and fill colour shown on an enemy cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageStyle {
    pub text: String,
    pub color: String,
}

impl DamageStyle {
    pub const UNKNOWN_TEXT: &'static str = "???";

    pub const COLOR_SAFE: &'static str = "#66ff66";
    pub const COLOR_LOW: &'static str = "#ffffff";
    pub const COLOR_MEDIUM: &'static str = "#ffff55";
    pub const COLOR_HIGH: &'static str = "#ff9933";
    pub const COLOR_LETHAL: &'static str = "#ff3333";

    /// Styles a damage value relative to the hero's remaining hit points.
    ///
    /// `None` (the hero cannot win) and lethal values are red; harmless
    /// fights are green.
    pub fn graded(damage: Option<i64>, hero_hp: i64) -> Self {
        let Some(value) = damage else {
            return Self {
                text: Self::UNKNOWN_TEXT.to_owned(),
                color: Self::COLOR_LETHAL.to_owned(),
            };
        };

        let color = if value <= 0 {
            Self::COLOR_SAFE
        } else if value >= hero_hp {
            Self::COLOR_LETHAL
        } else if value.saturating_mul(2) >= hero_hp {
            Self::COLOR_HIGH
        } else if value.saturating_mul(4) >= hero_hp {
            Self::COLOR_MEDIUM
        } else {
            Self::COLOR_LOW
        };

        Self {
            text: format_damage(value),
            color: color.to_owned(),
        }
    }
}

/// Shortens large values so they fit inside one cell (`123456` → `123k`).
pub fn format_damage(value: i64) -> String {
    if value.abs() >= 100_000 {
        format!("{}k", value / 1000)
    } else {
        value.to_string()
    }
}
