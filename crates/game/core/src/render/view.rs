use crate::config::GameConfig;
use crate::state::Position;

/// Camera descriptor applied to the floor root container.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub id: String,
    pub scale: f32,
    /// Scroll offset in screen pixels; the root is moved to `(-x, -y)`.
    pub x: f32,
    pub y: f32,
}

impl Viewport {
    pub const MAIN: &'static str = "main";

    pub fn new(id: impl Into<String>, scale: f32) -> Self {
        Self {
            id: id.into(),
            scale,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn main() -> Self {
        Self::new(Self::MAIN, 1.0)
    }

    /// The main view follows the hero on every draw.
    pub fn is_main(&self) -> bool {
        self.id == Self::MAIN
    }

    /// Scrolls so `hero` sits in the middle of the screen, clamped to the floor.
    pub fn center_on(&mut self, hero: Position, floor_width: u32, floor_height: u32, config: &GameConfig) {
        let unit_w = config.unit_width as f32 * self.scale;
        let unit_h = config.unit_height as f32 * self.scale;

        self.x = Self::clamp_axis(
            hero.x as f32 * unit_w + unit_w / 2.0 - config.screen_width as f32 / 2.0,
            floor_width as f32 * unit_w - config.screen_width as f32,
        );
        self.y = Self::clamp_axis(
            hero.y as f32 * unit_h + unit_h / 2.0 - config.screen_height as f32 / 2.0,
            floor_height as f32 * unit_h - config.screen_height as f32,
        );
    }

    fn clamp_axis(offset: f32, max: f32) -> f32 {
        offset.min(max).max(0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::main()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_clamps_to_floor_edges() {
        let config = GameConfig {
            unit_width: 10,
            unit_height: 10,
            screen_width: 50,
            screen_height: 50,
        };
        let mut view = Viewport::main();

        view.center_on(Position::new(0, 0), 20, 20, &config);
        assert_eq!((view.x, view.y), (0.0, 0.0));

        view.center_on(Position::new(10, 19), 20, 20, &config);
        assert_eq!(view.x, 80.0);
        assert_eq!(view.y, 150.0);
    }

    #[test]
    fn small_floor_never_scrolls() {
        let config = GameConfig::default();
        let mut view = Viewport::main();
        view.center_on(Position::new(2, 2), 3, 3, &config);
        assert_eq!((view.x, view.y), (0.0, 0.0));
    }
}
