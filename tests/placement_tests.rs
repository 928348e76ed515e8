mod common;

use battleship_engine::{
    random_fleet, validate, violations, FleetRules, Orientation, PlacementError, ShipKind,
};
use common::{at, ship, standard_fleet};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn standard_fleet_is_valid() {
    let rules = FleetRules::standard();
    assert_eq!(validate(&rules, &standard_fleet()), Ok(()));
    assert!(violations(&rules, &standard_fleet()).is_empty());
}

#[test]
fn missing_ship_is_a_composition_error() {
    let rules = FleetRules::standard();
    let mut fleet = standard_fleet();
    fleet.pop();
    let expected = PlacementError::InvalidFleetComposition {
        kind: ShipKind::Destroyer,
        expected: 2,
        found: 1,
    };
    assert_eq!(validate(&rules, &fleet), Err(expected.clone()));
    assert_eq!(violations(&rules, &fleet), vec![expected]);
}

#[test]
fn kind_outside_the_ruleset_is_a_composition_error() {
    let rules = FleetRules::standard();
    let mut fleet = standard_fleet();
    fleet.push(ship(ShipKind::Submarine, 9, 0, Orientation::Vertical));
    assert_eq!(
        validate(&rules, &fleet),
        Err(PlacementError::InvalidFleetComposition {
            kind: ShipKind::Submarine,
            expected: 0,
            found: 1,
        })
    );
}

#[test]
fn one_cell_past_the_edge_is_out_of_bounds() {
    let rules = FleetRules::standard();
    let mut fleet = standard_fleet();
    fleet[0] = ship(ShipKind::Battleship, 7, 0, Orientation::Horizontal);
    let expected = PlacementError::OutOfBounds {
        kind: ShipKind::Battleship,
        cell: at(10, 0),
    };
    assert_eq!(validate(&rules, &fleet), Err(expected.clone()));
    assert_eq!(violations(&rules, &fleet), vec![expected]);
}

#[test]
fn negative_anchor_is_out_of_bounds() {
    let rules = FleetRules::standard();
    let mut fleet = standard_fleet();
    fleet[2] = ship(ShipKind::Destroyer, 5, -1, Orientation::Vertical);
    assert_eq!(
        validate(&rules, &fleet),
        Err(PlacementError::OutOfBounds {
            kind: ShipKind::Destroyer,
            cell: at(5, -1),
        })
    );
}

#[test]
fn anchors_at_the_edge_of_i32_are_out_of_bounds() {
    let rules = FleetRules::standard();
    let extremes = [
        (i32::MAX, 0, Orientation::Horizontal),
        (0, i32::MAX, Orientation::Vertical),
        (i32::MIN, 0, Orientation::Horizontal),
        (0, i32::MIN, Orientation::Vertical),
        (i32::MAX, i32::MAX, Orientation::Vertical),
    ];
    for (x, y, orientation) in extremes {
        let mut fleet = standard_fleet();
        fleet[0] = ship(ShipKind::Battleship, x, y, orientation);
        assert_eq!(
            validate(&rules, &fleet),
            Err(PlacementError::OutOfBounds {
                kind: ShipKind::Battleship,
                cell: at(x, y),
            })
        );
        let found = violations(&rules, &fleet);
        assert!(!found.is_empty());
        assert!(found
            .iter()
            .all(|v| matches!(v, PlacementError::OutOfBounds { kind: ShipKind::Battleship, .. })));
    }
}

#[test]
fn crossing_ships_overlap() {
    let rules = FleetRules::standard();
    let mut fleet = standard_fleet();
    fleet[2] = ship(ShipKind::Destroyer, 1, 0, Orientation::Vertical);
    let found = violations(&rules, &fleet);
    assert_eq!(validate(&rules, &fleet), Err(PlacementError::Overlap { cell: at(1, 0) }));
    assert_eq!(found.len(), 2, "{found:?}");
    assert!(found
        .iter()
        .all(|e| matches!(e, PlacementError::Overlap { .. })));
}

#[test]
fn touching_ships_are_allowed() {
    let rules = FleetRules::standard();
    let fleet = vec![
        ship(ShipKind::Battleship, 0, 0, Orientation::Horizontal),
        ship(ShipKind::Destroyer, 0, 1, Orientation::Horizontal),
        ship(ShipKind::Destroyer, 4, 0, Orientation::Vertical),
    ];
    assert_eq!(validate(&rules, &fleet), Ok(()));
}

#[test]
fn composition_is_reported_before_overlap() {
    let rules = FleetRules::standard();
    let fleet = vec![
        ship(ShipKind::Battleship, 0, 0, Orientation::Horizontal),
        ship(ShipKind::Destroyer, 0, 0, Orientation::Vertical),
    ];
    assert!(matches!(
        validate(&rules, &fleet),
        Err(PlacementError::InvalidFleetComposition { .. })
    ));
    let all = violations(&rules, &fleet);
    assert!(matches!(all.first(), Some(PlacementError::InvalidFleetComposition { .. })));
    assert!(matches!(all.last(), Some(PlacementError::Overlap { .. })));
}

#[test]
fn random_fleets_validate_for_every_ruleset() {
    let mut rng = SmallRng::seed_from_u64(42);
    for rules in [FleetRules::standard(), FleetRules::classic()] {
        for _ in 0..20 {
            let fleet = random_fleet(&rules, &mut rng).unwrap();
            assert_eq!(fleet.len(), rules.fleet_size());
            assert_eq!(validate(&rules, &fleet), Ok(()));
        }
    }
}

#[test]
fn random_fleet_gives_up_on_impossible_rules() {
    let mut rules = FleetRules::standard();
    rules.grid_size = 3;
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        random_fleet(&rules, &mut rng),
        Err(PlacementError::UnableToPlace {
            kind: ShipKind::Battleship
        })
    );
}

#[test]
fn random_fleet_rejects_lengths_no_grid_can_hold() {
    let mut rules = FleetRules::standard();
    rules.kinds[0].length = usize::MAX;
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        random_fleet(&rules, &mut rng),
        Err(PlacementError::UnableToPlace {
            kind: rules.kinds[0].kind
        })
    );
}
