/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Pixel width of one map cell. Only used for sprite placement math.
    pub unit_width: u32,
    /// Pixel height of one map cell.
    pub unit_height: u32,
    /// Pixel width of the visible screen area, used when centering views.
    pub screen_width: u32,
    /// Pixel height of the visible screen area.
    pub screen_height: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of special-ability codes carried by one enemy.
    pub const MAX_SPECIALS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_UNIT_SIZE: u32 = 32;
    pub const DEFAULT_SCREEN_CELLS: u32 = 13;

    pub fn new() -> Self {
        Self {
            unit_width: Self::DEFAULT_UNIT_SIZE,
            unit_height: Self::DEFAULT_UNIT_SIZE,
            screen_width: Self::DEFAULT_UNIT_SIZE * Self::DEFAULT_SCREEN_CELLS,
            screen_height: Self::DEFAULT_UNIT_SIZE * Self::DEFAULT_SCREEN_CELLS,
        }
    }

    pub fn with_unit_size(unit_width: u32, unit_height: u32) -> Self {
        Self {
            unit_width,
            unit_height,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
