//! Session driver: owns the game state and turns key presses into steps.
use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tower_content::ContentFactory;
use tower_core::render::recording::RecordingScene;
use tower_core::{
    BattleReport, FloorId, GameError, GameState, Position, StandardFormula, StateError,
    StepOutcome, TriggerOutcome,
};

use crate::config::ClientConfig;
use crate::input::{KeyAction, handle_key};
use crate::message::MessageLog;
use crate::presentation::raster::{Raster, SpriteIndex};
use crate::presentation::terminal::Tui;
use crate::presentation::ui::{self, EnemySummary, RenderContext};

const UP_STAIRS: &str = "upFloor";
const DOWN_STAIRS: &str = "downFloor";
const MESSAGE_PANEL_HEIGHT: u16 = 7;

pub struct App {
    state: GameState,
    scene: RecordingScene,
    calculator: StandardFormula,
    sprites: SpriteIndex,
    factory: ContentFactory,
    floor_ids: Vec<FloorId>,
    area: String,
    messages: MessageLog,
    steps: u64,
    game_over: bool,
}

impl App {
    /// Loads content and activates the start floor.
    pub fn bootstrap(config: &ClientConfig) -> Result<Self> {
        let factory = ContentFactory::new(&config.data_dir);
        let game_config = factory.load_config()?;
        let catalog = Arc::new(factory.load_catalog()?);
        let hero = factory.load_hero()?;
        let floor_ids = factory.floor_ids()?;

        tracing::info!(
            data_dir = %factory.data_dir().display(),
            floors = floor_ids.len(),
            "content loaded"
        );

        let sprites = SpriteIndex::new(&catalog);
        let mut state = GameState::new(catalog, game_config);
        state.set_hero(hero);

        let mut app = Self {
            state,
            scene: RecordingScene::new(),
            calculator: StandardFormula,
            sprites,
            factory,
            floor_ids,
            area: config.area.clone(),
            messages: MessageLog::new(config.message_capacity),
            steps: 0,
            game_over: false,
        };
        app.load_floor(&config.start_floor)?;

        let title = app.floor_title();
        app.messages.info(0, format!("You enter {title}."));
        Ok(app)
    }

    /// Runs the input loop until the player quits.
    pub fn run(mut self, terminal: &mut Tui) -> Result<()> {
        tracing::info!("client loop starting");
        loop {
            self.redraw()?;
            self.render(terminal)?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            match handle_key(key) {
                KeyAction::Quit => break,
                KeyAction::Step { .. } if self.game_over => break,
                KeyAction::Step { dx, dy } => self.step(dx, dy)?,
                KeyAction::None => {}
            }
        }
        tracing::info!(steps = self.steps, "client loop finished");
        Ok(())
    }

    /// Moves the hero, fights, or changes floors.
    pub fn step(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.steps += 1;
        let outcome = match self.state.step(dx, dy, &self.calculator, &mut self.scene) {
            Ok(outcome) => outcome,
            Err(err) => return self.refuse(err),
        };

        match outcome {
            StepOutcome::Moved(position) => self.follow_stairs(position)?,
            StepOutcome::Triggered(TriggerOutcome::Battle(report)) => self.report_battle(&report),
            StepOutcome::Triggered(TriggerOutcome::Nothing) | StepOutcome::Blocked => {}
        }
        Ok(())
    }

    /// Recoverable and validation errors become messages; anything else aborts.
    fn refuse(&mut self, err: StateError) -> Result<()> {
        let severity = err.severity();
        if severity.is_internal() {
            tracing::error!(code = err.error_code(), "{err}");
            return Err(err).context("game state became inconsistent");
        }
        tracing::debug!(code = err.error_code(), severity = severity.as_str(), "{err}");
        self.messages.warn(self.steps, err.to_string());
        Ok(())
    }

    fn report_battle(&mut self, report: &BattleReport) {
        self.messages.info(
            self.steps,
            format!("Defeated {} and lost {} HP.", report.enemy, report.hp_lost()),
        );
        if report.hero_hp <= 0 {
            self.game_over = true;
            self.messages
                .error(self.steps, "You have fallen. Press any key to leave.");
        }
    }

    fn follow_stairs(&mut self, position: Position) -> Result<()> {
        let (offset, arrive_on) = match self.tile_id_at(position).as_deref() {
            Some(UP_STAIRS) => (1, DOWN_STAIRS),
            Some(DOWN_STAIRS) => (-1, UP_STAIRS),
            _ => return Ok(()),
        };

        let Some(target) = self.neighbour_floor(offset) else {
            self.messages.info(self.steps, "The stairs lead nowhere.");
            return Ok(());
        };

        self.change_floor(&target, arrive_on)?;
        let title = self.floor_title();
        self.messages.info(self.steps, format!("You enter {title}."));
        Ok(())
    }

    fn neighbour_floor(&self, offset: isize) -> Option<FloorId> {
        let current = self.state.current_floor_id()?;
        let index = self.floor_ids.iter().position(|id| id == current)?;
        let target = index.checked_add_signed(offset)?;
        self.floor_ids.get(target).cloned()
    }

    fn change_floor(&mut self, id: &FloorId, arrive_on: &str) -> Result<()> {
        if self.state.floor(id).is_some() {
            self.state.enter_floor(id)?;
        } else {
            self.load_floor(id)?;
        }
        // The previous floor's nodes would shadow the new one.
        self.scene = RecordingScene::new();
        self.state.current_floor_mut()?.detach_scene();

        match self.find_tile(arrive_on) {
            Some(position) => self.state.hero_mut()?.position = position,
            None => tracing::warn!(floor = %id, tile = arrive_on, "no arrival tile on floor"),
        }
        Ok(())
    }

    fn load_floor(&mut self, id: &FloorId) -> Result<()> {
        let template = self
            .factory
            .load_floor(id)
            .with_context(|| format!("failed to load floor {id}"))?;
        self.state
            .activate_floor(template, &self.area)?
            .extract()?;
        Ok(())
    }

    fn tile_id_at(&self, position: Position) -> Option<String> {
        let floor = self.state.current_floor().ok()?;
        let number = floor.tile_number(position.x, position.y)?;
        floor
            .catalog()
            .dictionary
            .get(number)
            .map(|definition| definition.id.clone())
    }

    fn find_tile(&self, tile_id: &str) -> Option<Position> {
        let floor = self.state.current_floor().ok()?;
        (0..floor.height() as i32)
            .flat_map(|y| (0..floor.width() as i32).map(move |x| Position::new(x, y)))
            .find(|position| self.tile_id_at(*position).as_deref() == Some(tile_id))
    }

    fn floor_title(&self) -> String {
        match self.state.current_floor() {
            Ok(floor) => floor.title().unwrap_or(floor.floor_id().as_str()).to_owned(),
            Err(_) => String::from("nowhere"),
        }
    }

    fn redraw(&mut self) -> Result<()> {
        self.state.draw(&self.calculator, &mut self.scene)?;
        Ok(())
    }

    fn enemy_summaries(&self) -> Vec<EnemySummary> {
        let Ok(floor) = self.state.current_floor() else {
            return Vec::new();
        };
        let mut seen = BTreeMap::new();
        for (_, enemy) in floor.enemies() {
            seen.entry(enemy.id().to_owned()).or_insert_with(|| EnemySummary {
                name: enemy.name.clone().unwrap_or_else(|| enemy.id().to_owned()),
                hp: enemy.hp,
                atk: enemy.atk,
                def: enemy.def,
                damage: floor
                    .damage_preview(enemy.position())
                    .and_then(|preview| preview.damage),
            });
        }
        seen.into_values().collect()
    }

    fn render(&self, terminal: &mut Tui) -> Result<()> {
        let floor = self.state.current_floor()?;
        let hero = self.state.hero().ok_or(tower_core::CombatError::NoActiveHero)?;
        let raster = Raster::from_scene(
            &self.scene,
            &self.sprites,
            self.state.config(),
            floor.width(),
            floor.height(),
        );
        let enemies = self.enemy_summaries();
        let title = self.floor_title();

        ui::render(
            terminal,
            &RenderContext {
                title: &title,
                raster: &raster,
                hero,
                enemies: &enemies,
                messages: &self.messages,
                message_panel_height: MESSAGE_PANEL_HEIGHT,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::bootstrap(&ClientConfig::default()).expect("sample data loads")
    }

    fn hero_position(app: &App) -> Position {
        app.state.hero().map(|hero| hero.position).expect("hero")
    }

    #[test]
    fn bootstrap_starts_on_the_first_floor() {
        let app = app();
        assert_eq!(app.state.current_floor_id(), Some(&FloorId::from("MT1")));
        assert_eq!(hero_position(&app), Position::new(1, 10));
        assert_eq!(app.messages.recent(usize::MAX).count(), 1);
    }

    #[test]
    fn walls_do_not_move_the_hero() {
        let mut app = app();
        app.step(1, 0).expect("step");
        assert_eq!(hero_position(&app), Position::new(1, 10));
    }

    #[test]
    fn stairs_move_between_floors_and_back() {
        let mut app = app();

        app.step(0, 1).expect("onto the stairs");
        assert_eq!(app.state.current_floor_id(), Some(&FloorId::from("MT2")));
        assert_eq!(hero_position(&app), Position::new(5, 4));

        app.step(0, -1).expect("off the stairs");
        app.step(0, 1).expect("back down");
        assert_eq!(app.state.current_floor_id(), Some(&FloorId::from("MT1")));
        assert_eq!(hero_position(&app), Position::new(1, 11));
        assert_eq!(app.state.floors().count(), 2);

        // The revisited floor draws into the new scene from scratch.
        app.redraw().expect("redraw");
        let damage = app.scene.container("damage").expect("damage container");
        assert!(app.scene.texts().count() > 0);
        assert!(app.scene.texts().all(|(_, node)| node.parent == Some(damage)));
        assert!(app.scene.container("_map0").is_some());
    }

    #[test]
    fn battles_are_logged() {
        let mut app = app();
        // (1, 10) -> (1, 7) -> (3, 7) -> (3, 5), then the green slime at (2, 5).
        for (dx, dy) in [(0, -1), (0, -1), (0, -1), (1, 0), (1, 0), (0, -1), (0, -1)] {
            app.step(dx, dy).expect("walk");
        }
        assert_eq!(hero_position(&app), Position::new(3, 5));
        app.step(-1, 0).expect("fight");

        // 4 hero turns against 35 hp, 3 slime blows of 8.
        assert_eq!(app.state.hero().map(|hero| hero.hp), Some(976));
        assert_eq!(hero_position(&app), Position::new(3, 5));
        let last = app.messages.recent(1).next().expect("message");
        assert!(last.text.starts_with("Defeated"));
    }
}
