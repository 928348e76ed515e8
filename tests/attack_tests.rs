mod common;

use battleship_engine::{all_sunk, resolve, AttackResult, Fleet, FleetRules, PlayerId};
use common::{at, standard_fleet, standard_fleet_cells};

fn fleet() -> Fleet {
    Fleet::from_placements(&FleetRules::standard(), PlayerId::new(), &standard_fleet()).unwrap()
}

#[test]
fn empty_water_is_a_miss_and_changes_nothing() {
    let mut f = fleet();
    let before = f.clone();
    let r = resolve(&mut f, at(9, 9));
    assert_eq!(r.result, AttackResult::Miss);
    assert_eq!(r.ship, None);
    assert_eq!(f, before);
}

#[test]
fn last_cell_sinks_the_ship() {
    let mut f = fleet();
    assert_eq!(resolve(&mut f, at(5, 5)).result, AttackResult::Hit);
    assert_eq!(resolve(&mut f, at(5, 6)).result, AttackResult::Hit);
    let r = resolve(&mut f, at(5, 7));
    assert_eq!(r.result, AttackResult::Sunk);
    assert!(r.ship.is_some());
    assert_eq!(f.afloat(), 2);
    assert!(!all_sunk(&f));
}

#[test]
fn hits_on_one_ship_report_the_same_ship() {
    let mut f = fleet();
    let first = resolve(&mut f, at(0, 0)).ship;
    let second = resolve(&mut f, at(3, 0)).ship;
    assert!(first.is_some());
    assert_eq!(first, second);
    assert_ne!(first, resolve(&mut f, at(0, 2)).ship);
}

#[test]
fn sunk_ship_stays_sunk_without_more_damage() {
    let mut f = fleet();
    for c in [at(5, 5), at(5, 6), at(5, 7)] {
        resolve(&mut f, c);
    }
    let before = f.clone();
    assert_eq!(resolve(&mut f, at(5, 6)).result, AttackResult::Sunk);
    assert_eq!(f, before);
}

#[test]
fn fleet_is_annihilated_after_every_cell_is_hit() {
    let mut f = fleet();
    let cells = standard_fleet_cells();
    let (last, rest) = cells.split_last().unwrap();
    for c in rest {
        resolve(&mut f, *c);
    }
    assert!(!all_sunk(&f));
    assert_eq!(resolve(&mut f, *last).result, AttackResult::Sunk);
    assert!(all_sunk(&f));
    assert_eq!(f.afloat(), 0);
}
