//! End-to-end floor scenarios: parse, query, fight, remove.

use std::sync::Arc;

use tower_core::env::{Animation, FrameRect};
use tower_core::floor::SpriteLayer;
use tower_core::render::recording::RecordingScene;
use tower_core::{
    BlockPayload, Catalog, CombatError, Disposal, EnemyTemplate, Enemy, Floor, FloorError,
    FloorTemplate, GameConfig, Hero, Layer, Position, StandardFormula, TileClass, TileDefinition,
    TileDictionary, TileNumber, TriggerContext, TriggerOutcome, UnitCatalog, Viewport,
};

const SLIME: u32 = 201;
const BAT: u32 = 205;

fn still(texture: &str) -> Animation {
    Animation {
        texture: texture.to_owned(),
        frames: vec![FrameRect::new(0, 0, 32, 32)],
    }
}

fn catalog() -> Arc<Catalog> {
    let dictionary: TileDictionary = [
        (
            TileNumber(1),
            TileDefinition::new("yellowWall", TileClass::Terrain, false).with_animation(still("terrains")),
        ),
        (
            TileNumber(21),
            TileDefinition::new("redPotion", TileClass::Item, true).with_animation(still("items")),
        ),
        (TileNumber(151), TileDefinition::new("lava", TileClass::Autotile, false)),
        (TileNumber(SLIME), TileDefinition::new("greenSlime", TileClass::Enemy, false)),
        (TileNumber(BAT), TileDefinition::new("bat", TileClass::Enemy, false)),
    ]
    .into_iter()
    .collect();

    let units: UnitCatalog = [
        // 12 atk vs 2 def: 2 turns; 30 atk vs 10 def: 20 per enemy turn.
        EnemyTemplate::new("greenSlime", TileNumber(SLIME), 20, 30, 2),
        // First strike doubles the exchanges: 2 enemy turns of 15.
        EnemyTemplate::new("bat", TileNumber(BAT), 20, 25, 2).with_special(1),
    ]
    .into_iter()
    .collect();

    Arc::new(Catalog::new(dictionary, units))
}

fn template() -> FloorTemplate {
    FloorTemplate {
        floor_id: "MT1".into(),
        title: Some("Tower 1F".into()),
        event_layer: Layer(1),
        map: [
            (
                Layer(0),
                vec![
                    vec![1, 1, 1, 1],
                    vec![1, 0, 0, 1],
                    vec![1, 0, 0, 1],
                    vec![1, 1, 1, 1],
                ],
            ),
            (
                Layer(1),
                vec![
                    vec![0, SLIME as i32, 0, 0],
                    vec![21, 0, BAT as i32, 0],
                    vec![0, 0, 151, 151],
                    vec![0, 0, 0, 0],
                ],
            ),
        ]
        .into_iter()
        .collect(),
    }
}

fn floor() -> Floor {
    let mut floor = Floor::new(template(), catalog(), GameConfig::default()).expect("valid floor");
    floor.extract().expect("extract");
    floor
}

fn hero() -> Hero {
    Hero::new("hero", Position::new(1, 1), 100, 12, 10)
}

fn block_keys(floor: &Floor, layer: Layer) -> Vec<(Position, &'static str)> {
    floor
        .blocks(layer)
        .map(|cells| {
            cells
                .iter()
                .map(|(position, block)| {
                    let kind = match block.data() {
                        BlockPayload::Enemy(_) => "enemy",
                        BlockPayload::Autotile(_) => "autotile",
                        BlockPayload::Unit(_) => "unit",
                    };
                    (*position, kind)
                })
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn empty_cells_are_passable() {
    let floor = floor();
    for (x, y) in [(0, 0), (3, 0), (1, 1), (0, 3)] {
        assert!(floor.pass(x, y), "({x}, {y}) should be passable");
    }
    assert!(floor.pass(0, 1), "item tiles take their pass flag from the dictionary");
    assert!(!floor.pass(1, 0), "enemies block");
    assert!(!floor.pass(2, 2), "lava blocks");
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let floor = floor();
    for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
        assert!(!floor.in_map(x, y));
        assert!(!floor.can_arrive(x, y));
    }

    assert!(matches!(
        floor.get_block(-1, 0),
        Err(FloorError::OutOfRange { .. })
    ));
    assert!(matches!(
        floor.get_block(0, -1),
        Err(FloorError::OutOfRange { .. })
    ));
}

#[test]
fn extract_materializes_enemies_with_sentinel() {
    let floor = floor();
    let layer = Layer(1);
    let cells = floor.blocks(layer).expect("event layer parsed");

    for (position, number) in [(Position::new(1, 0), SLIME), (Position::new(2, 1), BAT)] {
        let enemy: &Enemy = cells[&position].as_enemy().expect("enemy block");
        assert_eq!(enemy.position(), position);
        assert_eq!(enemy.layer(), layer);
        assert_eq!(enemy.floor_id().as_str(), "MT1");
        assert_eq!(enemy.number(), TileNumber(number));
        assert_eq!(floor.cell(layer, position), Some(-2));
    }

    // Plain tiles stay as raw ids and get no block.
    assert_eq!(floor.cell(layer, Position::new(0, 1)), Some(21));
    assert!(!cells.contains_key(&Position::new(0, 1)));
    assert!(floor.blocks(Layer(0)).is_some_and(|cells| cells.is_empty()));
}

#[test]
fn repeated_extract_is_deterministic() {
    let mut floor = floor();
    let first = block_keys(&floor, Layer(1));
    let damages = floor.damages().clone();

    floor.extract().expect("second extract");

    assert_eq!(block_keys(&floor, Layer(1)), first);
    assert_eq!(floor.damages(), &damages);
}

#[test]
fn battle_costs_hp_and_clears_the_cell() {
    let mut floor = floor();
    let mut scene = RecordingScene::new();
    let mut hero = hero();

    let mut ctx = TriggerContext::new(&mut hero, &StandardFormula);
    let outcome = floor.trigger(1, 0, &mut ctx, &mut scene).expect("beatable");

    let TriggerOutcome::Battle(report) = outcome else {
        panic!("expected a battle");
    };
    assert_eq!(report.hp_lost(), 20);
    assert!(matches!(report.disposal, Disposal::Block(_)));
    assert_eq!(hero.hp, 80);
    assert!(!floor.blocks(Layer(1)).is_some_and(|cells| cells.contains_key(&Position::new(1, 0))));
    assert_eq!(floor.cell(Layer(1), Position::new(1, 0)), Some(0));
    assert!(floor.can_arrive(1, 0));
}

#[test]
fn first_strike_enemy_hits_every_turn() {
    let mut floor = floor();
    let mut scene = RecordingScene::new();
    let mut hero = hero();

    let mut ctx = TriggerContext::new(&mut hero, &StandardFormula);
    floor.trigger(2, 1, &mut ctx, &mut scene).expect("beatable");

    assert_eq!(hero.hp, 70);
}

#[test]
fn hero_without_attack_cannot_fight() {
    let mut floor = floor();
    let mut scene = RecordingScene::new();
    let mut hero = Hero::new("hero", Position::ORIGIN, 100, 1, 10);

    let mut ctx = TriggerContext::new(&mut hero, &StandardFormula);
    let err = floor.trigger(1, 0, &mut ctx, &mut scene).unwrap_err();

    assert!(matches!(err, FloorError::Combat(CombatError::Unbeatable { .. })));
    assert_eq!(hero.hp, 100);
    assert_eq!(floor.cell(Layer(1), Position::new(1, 0)), Some(-2));
}

#[test]
fn removing_an_empty_cell_resets_map_only() {
    let mut floor = floor();
    let mut scene = RecordingScene::new();
    floor
        .draw(&mut Viewport::main(), &hero(), &StandardFormula, &mut scene)
        .expect("draw");
    let walls = floor.sprites().len(SpriteLayer::Map(Layer(0)));
    let nodes_before = scene.len();
    assert_eq!(walls, 12);
    assert_eq!(scene.texts().count(), 2);

    let removed = floor.remove_block(1, 2, &mut scene).expect("in range");

    assert!(removed.is_none());
    assert_eq!(floor.cell(Layer(1), Position::new(1, 2)), Some(0));
    assert_eq!(scene.len(), nodes_before);
    assert_eq!(floor.damages().len(), 2);

    // A plain tile loses its sprite; labels and other cells stay.
    let potion = floor
        .sprites()
        .get(SpriteLayer::Map(Layer(1)), Position::new(0, 1))
        .expect("potion sprite");
    let removed = floor.remove_block(0, 1, &mut scene).expect("in range");

    assert!(removed.is_none());
    assert!(!scene.contains(potion));
    assert_eq!(scene.len(), nodes_before - 1);
    assert_eq!(scene.texts().count(), 2);
    assert_eq!(floor.sprites().len(SpriteLayer::Map(Layer(0))), walls);
    assert_eq!(floor.sprites().len(SpriteLayer::Damage), 2);
}

#[test]
fn damage_cache_has_one_entry_per_enemy() {
    let mut floor = floor();
    assert_eq!(floor.damages().len(), 2);
    for preview in floor.damages().values() {
        assert_eq!(preview.damage, Some(0));
    }

    let mut scene = RecordingScene::new();
    let hero = hero();
    floor
        .draw(&mut Viewport::main(), &hero, &StandardFormula, &mut scene)
        .expect("draw");

    assert_eq!(floor.damage_preview(Position::new(1, 0)).and_then(|d| d.damage), Some(20));
    assert_eq!(floor.damage_preview(Position::new(2, 1)).and_then(|d| d.damage), Some(30));
    assert_eq!(scene.texts().count(), 2);
}

#[test]
fn malformed_templates_are_rejected() {
    let mut ragged = template();
    ragged.map.insert(Layer(2), vec![vec![0, 0, 0, 0], vec![0, 0]]);
    assert!(matches!(
        Floor::new(ragged, catalog(), GameConfig::default()),
        Err(FloorError::RaggedLayer { row: 1, .. })
    ));

    let mut missing_event = template();
    missing_event.event_layer = Layer(7);
    assert!(matches!(
        Floor::new(missing_event, catalog(), GameConfig::default()),
        Err(FloorError::UnknownLayer { .. })
    ));

    let mut unknown_enemy = template();
    let units = UnitCatalog::default();
    let dictionary = catalog().dictionary.clone();
    unknown_enemy.map.remove(&Layer(0));
    let mut floor = Floor::new(
        unknown_enemy,
        Arc::new(Catalog::new(dictionary, units)),
        GameConfig::default(),
    )
    .expect("valid shape");
    assert!(matches!(floor.extract(), Err(FloorError::UnknownEnemy { .. })));
}
