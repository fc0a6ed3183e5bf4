//! Terminal glyphs and colours for tiles.

use ratatui::style::{Color, Modifier, Style};
use tower_core::TileClass;

use super::raster::TileRef;

/// Two-column glyph plus style for one map cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub text: String,
    pub style: Style,
}

impl Glyph {
    fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub const HERO: &str = "@ ";

pub fn hero_style() -> Style {
    Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD)
}

pub fn empty() -> Glyph {
    Glyph::new("  ", Style::default())
}

/// Picks a glyph for a tile. Enemies show the first two letters of their id.
pub fn glyph_for(tile: &TileRef) -> Glyph {
    match tile.class {
        TileClass::Terrain => terrain(&tile.id),
        TileClass::Autotile => Glyph::new("~~", Style::default().fg(Color::LightRed)),
        TileClass::Item => Glyph::new("! ", Style::default().fg(Color::LightMagenta)),
        TileClass::Npc => Glyph::new("& ", Style::default().fg(Color::LightGreen)),
        TileClass::Event => Glyph::new("? ", Style::default().fg(Color::Cyan)),
        TileClass::Enemy => {
            let text: String = tile.id.chars().take(2).collect();
            Glyph::new(
                format!("{text:<2}"),
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            )
        }
    }
}

fn terrain(id: &str) -> Glyph {
    let lower = id.to_ascii_lowercase();
    if lower.contains("wall") {
        Glyph::new("##", Style::default().fg(Color::Yellow))
    } else if lower == "upfloor" {
        Glyph::new("< ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    } else if lower == "downfloor" {
        Glyph::new("> ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    } else if lower.contains("door") {
        Glyph::new("[]", Style::default().fg(Color::LightYellow))
    } else {
        Glyph::new(". ", Style::default().fg(Color::DarkGray))
    }
}

/// Parses `#rrggbb` into a terminal colour.
pub fn parse_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::Rgb(
        (value >> 16) as u8,
        (value >> 8 & 0xff) as u8,
        (value & 0xff) as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_damage_colours() {
        assert_eq!(parse_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_color("#00ff7f"), Some(Color::Rgb(0, 255, 127)));
        assert_eq!(parse_color("ff0000"), None);
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#gg0000"), None);
    }

    #[test]
    fn enemies_use_their_initials() {
        let glyph = glyph_for(&TileRef {
            id: "greenSlime".to_owned(),
            class: TileClass::Enemy,
        });
        assert_eq!(glyph.text, "gr");

        let glyph = glyph_for(&TileRef {
            id: "upFloor".to_owned(),
            class: TileClass::Terrain,
        });
        assert_eq!(glyph.text, "< ");
    }
}
