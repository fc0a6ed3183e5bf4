//! Frame layout: map on the left, hero and enemy panels on the right,
//! messages along the bottom.
use anyhow::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tower_core::Hero;

use super::raster::Raster;
use super::terminal::Tui;
use super::theme;
use crate::message::{MessageLevel, MessageLog};

/// One row of the enemy panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySummary {
    pub name: String,
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
    /// `None` when the hero cannot win.
    pub damage: Option<i64>,
}

pub struct RenderContext<'a> {
    pub title: &'a str,
    pub raster: &'a Raster,
    pub hero: &'a Hero,
    pub enemies: &'a [EnemySummary],
    pub messages: &'a MessageLog,
    pub message_panel_height: u16,
}

pub fn render(terminal: &mut Tui, ctx: &RenderContext) -> Result<()> {
    terminal.draw(|frame| render_frame(frame, ctx))?;
    Ok(())
}

fn render_frame(frame: &mut Frame, ctx: &RenderContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(ctx.message_panel_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let map_width = ctx.raster.width() as u16 * 2 + 2;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(map_width), Constraint::Min(24)])
        .split(rows[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(columns[1]);

    render_map(frame, columns[0], ctx);
    render_hero(frame, side[0], ctx.hero);
    render_enemies(frame, side[1], ctx.enemies);
    render_messages(frame, rows[1], ctx.messages);

    let footer = Paragraph::new("arrows/hjkl: move   q: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, rows[2]);
}

fn render_map(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let raster = ctx.raster;
    let hero = ctx.hero.position;
    let mut lines = Vec::with_capacity(raster.height() as usize);

    for y in 0..raster.height() {
        let mut spans = Vec::with_capacity(raster.width() as usize);
        for x in 0..raster.width() {
            if hero.x == x as i32 && hero.y == y as i32 {
                spans.push(Span::styled(theme::HERO, theme::hero_style()));
                continue;
            }
            let Some(cell) = raster.cell(x, y) else {
                continue;
            };
            let mut glyph = cell.tile.as_ref().map_or_else(theme::empty, theme::glyph_for);
            if let Some(color) = cell.damage.as_ref().and_then(|d| theme::parse_color(&d.color)) {
                glyph.style = glyph.style.fg(color);
            }
            spans.push(Span::styled(glyph.text, glyph.style));
        }
        lines.push(Line::from(spans));
    }

    let map = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", ctx.title)),
    );
    frame.render_widget(map, area);
}

fn stat(label: &str, value: impl ToString) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::White)),
        Span::raw(value.to_string()),
    ])
}

fn render_hero(frame: &mut Frame, area: Rect, hero: &Hero) {
    let hp_style = if hero.is_defeated() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("HP: ", Style::default().fg(Color::White)),
            Span::styled(hero.hp.to_string(), hp_style),
        ]),
        stat("ATK", hero.atk),
        stat("DEF", hero.def),
        stat("MDEF", hero.mdef),
        stat("Gold", hero.money),
        stat("EXP", hero.exp),
        stat("Position", format!("({}, {})", hero.position.x, hero.position.y)),
    ];
    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Hero"));
    frame.render_widget(panel, area);
}

fn render_enemies(frame: &mut Frame, area: Rect, enemies: &[EnemySummary]) {
    let lines: Vec<Line> = enemies
        .iter()
        .map(|enemy| {
            let damage = match enemy.damage {
                Some(damage) => Span::raw(damage.to_string()),
                None => Span::styled("???", Style::default().fg(Color::Red)),
            };
            Line::from(vec![
                Span::styled(format!("{:<12}", enemy.name), Style::default().fg(Color::White)),
                Span::raw(format!(
                    "{:>5} {:>4} {:>4}  ",
                    enemy.hp, enemy.atk, enemy.def
                )),
                damage,
            ])
        })
        .collect();
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Enemies (hp atk def dmg)"),
    );
    frame.render_widget(panel, area);
}

fn render_messages(frame: &mut Frame, area: Rect, messages: &MessageLog) {
    let visible = area.height.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = messages
        .recent(visible)
        .map(|entry| {
            let style = match entry.level {
                MessageLevel::Info => Style::default(),
                MessageLevel::Warning => Style::default().fg(Color::Yellow),
                MessageLevel::Error => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(format!("[{}] {}", entry.step, entry.text), style))
        })
        .collect();
    lines.reverse();

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Messages"));
    frame.render_widget(panel, area);
}
