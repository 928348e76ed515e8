#![allow(dead_code)]

use battleship_engine::{
    Coordinate, Engine, EngineConfig, GameId, InMemoryStore, Orientation, PlayerId, ShipKind,
    ShipPlacement,
};

pub fn at(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

pub fn ship(kind: ShipKind, x: i32, y: i32, orientation: Orientation) -> ShipPlacement {
    ShipPlacement::new(kind, at(x, y), orientation)
}

/// Battleship along the top row, one destroyer two rows down, one standing
/// upright in the middle.
pub fn standard_fleet() -> Vec<ShipPlacement> {
    vec![
        ship(ShipKind::Battleship, 0, 0, Orientation::Horizontal),
        ship(ShipKind::Destroyer, 0, 2, Orientation::Horizontal),
        ship(ShipKind::Destroyer, 5, 5, Orientation::Vertical),
    ]
}

/// Every cell `standard_fleet` occupies, destroyer at (5,5) last.
pub fn standard_fleet_cells() -> Vec<Coordinate> {
    let mut cells: Vec<Coordinate> = (0..4).map(|x| at(x, 0)).collect();
    cells.extend((0..3).map(|x| at(x, 2)));
    cells.extend((5..8).map(|y| at(5, y)));
    cells
}

pub fn engine() -> Engine<InMemoryStore> {
    Engine::new(InMemoryStore::new(), EngineConfig::default())
}

/// A game with "A" and "B" seated and both standard fleets placed.
pub async fn started_game(engine: &Engine<InMemoryStore>) -> (GameId, PlayerId, PlayerId) {
    let created = engine.create("A").await.unwrap();
    let joined = engine.join(created.id, "B").await.unwrap();
    let a = joined.player_one.id;
    let b = joined.player_two.as_ref().unwrap().id;
    engine
        .submit_fleet(created.id, a, &standard_fleet())
        .await
        .unwrap();
    engine
        .submit_fleet(created.id, b, &standard_fleet())
        .await
        .unwrap();
    (created.id, a, b)
}
