use std::collections::BTreeMap;
use std::sync::Arc;

use crate::combat::{CombatError, DamageCalculator};
use crate::config::GameConfig;
use crate::entity::{TriggerContext, TriggerOutcome};
use crate::env::Catalog;
use crate::floor::{Floor, FloorTemplate};
use crate::render::{SceneGraph, TextRenderer, Viewport};

use super::{FloorId, Hero, Position, StateError};

/// Named group of floors, e.g. one tower.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Area {
    pub floor_ids: Vec<FloorId>,
}

/// Result of asking the hero to take one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(Position),
    /// The target cell was occupied; its block was triggered instead.
    Triggered(TriggerOutcome),
    /// Off the map edge.
    Blocked,
}

/// Registry of live floors plus the active hero and camera.
///
/// Floors are replaced, not mutated, on level transitions: activating a
/// template whose id is already registered drops the old instance.
#[derive(Clone, Debug)]
pub struct GameState {
    hero: Option<Hero>,
    pub view: Viewport,
    floors: BTreeMap<FloorId, Floor>,
    current_floor: Option<FloorId>,
    areas: BTreeMap<String, Area>,
    catalog: Arc<Catalog>,
    config: GameConfig,
}

impl GameState {
    pub fn new(catalog: Arc<Catalog>, config: GameConfig) -> Self {
        Self {
            hero: None,
            view: Viewport::main(),
            floors: BTreeMap::new(),
            current_floor: None,
            areas: BTreeMap::new(),
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn set_hero(&mut self, hero: Hero) {
        self.hero = Some(hero);
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }

    pub fn hero_mut(&mut self) -> Result<&mut Hero, CombatError> {
        self.hero.as_mut().ok_or(CombatError::NoActiveHero)
    }

    /// Builds a floor from `template`, registers it under `area` and makes it current.
    pub fn activate_floor(
        &mut self,
        template: FloorTemplate,
        area: &str,
    ) -> Result<&mut Floor, StateError> {
        let floor = Floor::new(template, Arc::clone(&self.catalog), self.config.clone())?;
        let id = floor.floor_id().clone();

        let ids = &mut self.areas.entry(area.to_owned()).or_default().floor_ids;
        if !ids.contains(&id) {
            ids.push(id.clone());
        }

        if self.floors.insert(id.clone(), floor).is_some() {
            tracing::debug!(floor = %id, "replaced floor instance");
        }
        tracing::info!(floor = %id, area, "floor activated");
        self.current_floor = Some(id.clone());

        self.floors
            .get_mut(&id)
            .ok_or(StateError::UnknownFloor { floor: id })
    }

    /// Switches to an already registered floor, keeping its live blocks.
    pub fn enter_floor(&mut self, id: &FloorId) -> Result<&mut Floor, StateError> {
        let floor = self
            .floors
            .get_mut(id)
            .ok_or_else(|| StateError::UnknownFloor { floor: id.clone() })?;
        tracing::info!(floor = %id, "entered floor");
        self.current_floor = Some(id.clone());
        Ok(floor)
    }

    pub fn floor(&self, id: &FloorId) -> Option<&Floor> {
        self.floors.get(id)
    }

    pub fn floors(&self) -> impl Iterator<Item = &Floor> {
        self.floors.values()
    }

    pub fn area(&self, name: &str) -> Option<&Area> {
        self.areas.get(name)
    }

    pub fn current_floor_id(&self) -> Option<&FloorId> {
        self.current_floor.as_ref()
    }

    pub fn current_floor(&self) -> Result<&Floor, StateError> {
        let id = self.current_floor.as_ref().ok_or(StateError::NoActiveFloor)?;
        self.floors
            .get(id)
            .ok_or_else(|| StateError::UnknownFloor { floor: id.clone() })
    }

    pub fn current_floor_mut(&mut self) -> Result<&mut Floor, StateError> {
        let id = self.current_floor.as_ref().ok_or(StateError::NoActiveFloor)?;
        self.floors
            .get_mut(id)
            .ok_or_else(|| StateError::UnknownFloor { floor: id.clone() })
    }

    /// Triggers the block at `(x, y)` on the current floor's event layer.
    pub fn interact<S>(
        &mut self,
        x: i32,
        y: i32,
        calculator: &dyn DamageCalculator,
        scene: &mut S,
    ) -> Result<TriggerOutcome, StateError>
    where
        S: SceneGraph + ?Sized,
    {
        let id = self.current_floor.as_ref().ok_or(StateError::NoActiveFloor)?;
        let floor = self
            .floors
            .get_mut(id)
            .ok_or_else(|| StateError::UnknownFloor { floor: id.clone() })?;
        let hero = self.hero.as_mut().ok_or(CombatError::NoActiveHero)?;

        let mut ctx = TriggerContext::new(hero, calculator);
        Ok(floor.trigger(x, y, &mut ctx, scene)?)
    }

    /// Moves the hero by one cell, or interacts with whatever stands in the way.
    pub fn step<S>(
        &mut self,
        dx: i32,
        dy: i32,
        calculator: &dyn DamageCalculator,
        scene: &mut S,
    ) -> Result<StepOutcome, StateError>
    where
        S: SceneGraph + ?Sized,
    {
        let target = self
            .hero
            .as_ref()
            .ok_or(CombatError::NoActiveHero)?
            .position
            .offset(dx, dy);
        let floor = self.current_floor()?;

        if !floor.in_map(target.x, target.y) {
            return Ok(StepOutcome::Blocked);
        }
        if floor.can_arrive(target.x, target.y) {
            self.hero_mut()?.position = target;
            return Ok(StepOutcome::Moved(target));
        }

        let outcome = self.interact(target.x, target.y, calculator, scene)?;
        Ok(StepOutcome::Triggered(outcome))
    }

    /// Redraws the current floor through the main view.
    pub fn draw<S>(&mut self, calculator: &dyn DamageCalculator, scene: &mut S) -> Result<(), StateError>
    where
        S: SceneGraph + TextRenderer + ?Sized,
    {
        let id = self.current_floor.as_ref().ok_or(StateError::NoActiveFloor)?;
        let floor = self
            .floors
            .get_mut(id)
            .ok_or_else(|| StateError::UnknownFloor { floor: id.clone() })?;
        let hero = self.hero.as_ref().ok_or(CombatError::NoActiveHero)?;

        floor.draw(&mut self.view, hero, calculator, scene)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::StandardFormula;
    use crate::env::{EnemyTemplate, TileClass, TileDefinition, TileDictionary, UnitCatalog};
    use crate::render::recording::RecordingScene;
    use crate::state::{Layer, TileNumber};

    fn state() -> GameState {
        let dictionary: TileDictionary = [
            (TileNumber(1), TileDefinition::new("wall", TileClass::Terrain, false)),
            (TileNumber(201), TileDefinition::new("greenSlime", TileClass::Enemy, false)),
        ]
        .into_iter()
        .collect();
        let units: UnitCatalog = [EnemyTemplate::new("greenSlime", TileNumber(201), 20, 30, 2)]
            .into_iter()
            .collect();
        GameState::new(Arc::new(Catalog::new(dictionary, units)), GameConfig::default())
    }

    fn template(id: &str) -> FloorTemplate {
        FloorTemplate {
            floor_id: id.into(),
            title: None,
            event_layer: Layer(0),
            map: [(Layer(0), vec![vec![0, 201, 1], vec![0, 0, 0]])]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn activate_registers_floor_once_per_area() {
        let mut state = state();
        state.activate_floor(template("MT1"), "main").expect("valid");
        state.activate_floor(template("MT2"), "main").expect("valid");
        state.activate_floor(template("MT1"), "main").expect("valid");

        assert_eq!(state.current_floor_id(), Some(&FloorId::from("MT1")));
        assert_eq!(state.floors().count(), 2);
        let area = state.area("main").expect("area created");
        assert_eq!(area.floor_ids, vec![FloorId::from("MT1"), FloorId::from("MT2")]);
    }

    #[test]
    fn entering_a_registered_floor_keeps_it() {
        let mut state = state();
        state.activate_floor(template("MT1"), "main").expect("valid");
        state.activate_floor(template("MT2"), "main").expect("valid");

        state.enter_floor(&FloorId::from("MT1")).expect("registered");
        assert_eq!(state.current_floor_id(), Some(&FloorId::from("MT1")));

        let err = state.enter_floor(&FloorId::from("MT9")).unwrap_err();
        assert_eq!(err, StateError::UnknownFloor { floor: FloorId::from("MT9") });
        assert_eq!(state.current_floor_id(), Some(&FloorId::from("MT1")));
    }

    #[test]
    fn missing_hero_and_floor_are_reported() {
        let mut state = state();
        let mut scene = RecordingScene::new();

        assert!(matches!(state.current_floor(), Err(StateError::NoActiveFloor)));
        assert_eq!(state.hero_mut().unwrap_err(), CombatError::NoActiveHero);

        state.activate_floor(template("MT1"), "main").expect("valid");
        let err = state.interact(1, 0, &StandardFormula, &mut scene).unwrap_err();
        assert_eq!(err, StateError::Combat(CombatError::NoActiveHero));
    }

    #[test]
    fn stepping_into_enemy_fights_it() {
        let mut state = state();
        let mut scene = RecordingScene::new();
        state.activate_floor(template("MT1"), "main").expect("valid");
        state
            .current_floor_mut()
            .and_then(|floor| floor.extract().map(|_| ()).map_err(StateError::from))
            .expect("extract");
        state.set_hero(Hero::new("hero", Position::ORIGIN, 100, 12, 10));

        let outcome = state.step(1, 0, &StandardFormula, &mut scene).expect("battle");
        assert!(matches!(outcome, StepOutcome::Triggered(TriggerOutcome::Battle(_))));
        assert_eq!(state.hero().map(|h| h.hp), Some(80));

        let outcome = state.step(1, 0, &StandardFormula, &mut scene).expect("move");
        assert_eq!(outcome, StepOutcome::Moved(Position::new(1, 0)));

        let outcome = state.step(0, -1, &StandardFormula, &mut scene).expect("edge");
        assert_eq!(outcome, StepOutcome::Blocked);
    }
}
