mod common;

use battleship_engine::{
    cells_of, Coordinate, Orientation, ParseKeyError, Ship, PlayerId, ShipKind, ShipPlacement,
};
use common::{at, ship};

#[test]
fn horizontal_battleship_from_origin() {
    let p = ship(ShipKind::Battleship, 0, 0, Orientation::Horizontal);
    assert_eq!(cells_of(&p, 4), vec![at(0, 0), at(1, 0), at(2, 0), at(3, 0)]);
}

#[test]
fn vertical_destroyer_from_middle() {
    let p = ship(ShipKind::Destroyer, 5, 5, Orientation::Vertical);
    assert_eq!(cells_of(&p, 3), vec![at(5, 5), at(5, 6), at(5, 7)]);
}

#[test]
fn cells_run_past_the_edge_untouched() {
    let p = ship(ShipKind::Battleship, 8, 1, Orientation::Horizontal);
    let cells = cells_of(&p, 4);
    assert_eq!(cells.last(), Some(&at(11, 1)));
    assert!(!cells[2].in_bounds(10));
}

#[test]
fn cells_stop_at_the_end_of_the_coordinate_space() {
    let p = ship(ShipKind::Battleship, i32::MAX - 1, 3, Orientation::Horizontal);
    assert_eq!(cells_of(&p, 4), vec![at(i32::MAX - 1, 3), at(i32::MAX, 3)]);
    assert_eq!(at(0, 0).offset(Orientation::Vertical, 1), Some(at(0, 1)));
    assert_eq!(at(0, i32::MAX).offset(Orientation::Vertical, 1), None);
}

#[test]
fn bounds_are_half_open() {
    assert!(at(0, 0).in_bounds(10));
    assert!(at(9, 9).in_bounds(10));
    assert!(!at(10, 0).in_bounds(10));
    assert!(!at(0, 10).in_bounds(10));
    assert!(!at(-1, 3).in_bounds(10));
}

#[test]
fn grid_keys_join_x_and_y_with_a_comma() {
    assert_eq!(at(3, 7).key(), "3,7");
    assert_eq!("3,7".parse::<Coordinate>(), Ok(at(3, 7)));
    assert_eq!("-1,0".parse::<Coordinate>(), Ok(at(-1, 0)));
}

#[test]
fn malformed_grid_keys_are_rejected() {
    for key in ["", "3", "3;7", "x,1", "1,2,3"] {
        assert_eq!(
            key.parse::<Coordinate>(),
            Err(ParseKeyError(key.to_string())),
            "{key:?}"
        );
    }
}

#[test]
fn ship_contains_exactly_its_cells() {
    let placement = ShipPlacement::new(ShipKind::Destroyer, at(2, 4), Orientation::Vertical);
    let s = Ship::new(PlayerId::new(), placement, 3);
    for cell in s.cells() {
        assert!(s.contains(cell));
    }
    assert!(!s.contains(at(2, 3)));
    assert!(!s.contains(at(2, 7)));
    assert!(!s.contains(at(3, 4)));
    assert!(!s.contains(at(i32::MIN, i32::MIN)));
    assert!(!s.contains(at(2, i32::MAX)));
}

#[test]
fn fresh_ship_is_afloat() {
    let s = Ship::new(
        PlayerId::new(),
        ship(ShipKind::Battleship, 0, 0, Orientation::Horizontal),
        4,
    );
    assert_eq!(s.hits(), 0);
    assert!(!s.is_sunk());
    assert_eq!(s.kind(), ShipKind::Battleship);
}
