//! The bundled data set must load and parse into live floors.

use std::sync::Arc;

use tower_content::{ContentFactory, SAMPLE_DATA_DIR};
use tower_core::{Floor, FloorId, Layer, Position, TileClass};

#[test]
fn every_sample_floor_extracts() {
    let factory = ContentFactory::new(SAMPLE_DATA_DIR);
    let config = factory.load_config().unwrap();
    let catalog = Arc::new(factory.load_catalog().unwrap());

    let ids = factory.floor_ids().unwrap();
    assert_eq!(ids, vec![FloorId::from("MT1"), FloorId::from("MT2")]);

    for id in ids {
        let template = factory.load_floor(&id).unwrap();
        let mut floor = Floor::new(template, Arc::clone(&catalog), config.clone()).unwrap();
        floor.extract().unwrap();
        assert!(floor.enemies().count() > 0, "{id} has no enemies");
    }
}

#[test]
fn hero_starts_on_a_passable_cell() {
    let factory = ContentFactory::new(SAMPLE_DATA_DIR);
    let hero = factory.load_hero().unwrap();
    let catalog = Arc::new(factory.load_catalog().unwrap());
    let template = factory.load_floor(&FloorId::from("MT1")).unwrap();
    let floor = Floor::new(template, catalog, factory.load_config().unwrap()).unwrap();

    assert!(floor.can_arrive(hero.position.x, hero.position.y));
    assert_eq!(floor.event_layer(), Layer(1));
}

#[test]
fn lava_pool_is_an_autotile() {
    let factory = ContentFactory::new(SAMPLE_DATA_DIR);
    let catalog = Arc::new(factory.load_catalog().unwrap());
    let template = factory.load_floor(&FloorId::from("MT1")).unwrap();
    let mut floor = Floor::new(template, Arc::clone(&catalog), factory.load_config().unwrap()).unwrap();
    floor.extract().unwrap();

    let block = floor.get_block(7, 6).unwrap();
    assert_eq!(block.data().class(), TileClass::Autotile);
    let tile = block.as_autotile().unwrap();
    assert_eq!(tile.connections().bits().count_ones(), 2);
    assert_eq!(floor.cell(Layer(1), Position::new(7, 6)), Some(-2));
}
