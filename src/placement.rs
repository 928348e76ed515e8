//! Fleet proposal validation and random fleet generation.
//!
//! Validation is pure and runs three checks in a fixed order: composition,
//! bounds, overlap. Ships may touch each other, edge-on or diagonally.

use std::collections::{BTreeMap, HashMap, HashSet};

use rand::Rng;

use crate::common::PlacementError;
use crate::config::{FleetRules, ShipKind};
use crate::geometry::{cells_of, Coordinate, Orientation, ShipPlacement};

/// Attempts per ship before [`random_fleet`] gives up.
const PLACEMENT_ATTEMPTS: usize = 100;

/// Check a complete fleet proposal, returning the first violation found.
pub fn validate(rules: &FleetRules, proposal: &[ShipPlacement]) -> Result<(), PlacementError> {
    check_composition(rules, proposal)?;
    for placement in proposal {
        if let Some(err) = bounds_violations(rules, placement).into_iter().next() {
            return Err(err);
        }
    }
    match overlap_violations(rules, proposal).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every violation in `proposal`, composition first, then bounds, then
/// overlap. Empty when the proposal is valid.
pub fn violations(rules: &FleetRules, proposal: &[ShipPlacement]) -> Vec<PlacementError> {
    let mut found = composition_violations(rules, proposal);
    for placement in proposal {
        found.extend(bounds_violations(rules, placement));
    }
    found.extend(overlap_violations(rules, proposal));
    found
}

fn check_composition(rules: &FleetRules, proposal: &[ShipPlacement]) -> Result<(), PlacementError> {
    match composition_violations(rules, proposal).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn composition_violations(rules: &FleetRules, proposal: &[ShipPlacement]) -> Vec<PlacementError> {
    let mut counts: BTreeMap<ShipKind, usize> = BTreeMap::new();
    for placement in proposal {
        *counts.entry(placement.kind).or_default() += 1;
    }

    let mut found = Vec::new();
    for rule in &rules.kinds {
        let have = counts.remove(&rule.kind).unwrap_or(0);
        if have != rule.count {
            found.push(PlacementError::InvalidFleetComposition {
                kind: rule.kind,
                expected: rule.count,
                found: have,
            });
        }
    }
    // Whatever is left is a kind the ruleset doesn't field at all.
    for (kind, have) in counts {
        found.push(PlacementError::InvalidFleetComposition {
            kind,
            expected: 0,
            found: have,
        });
    }
    found
}

fn bounds_violations(rules: &FleetRules, placement: &ShipPlacement) -> Vec<PlacementError> {
    let Some(length) = rules.length_of(placement.kind) else {
        return Vec::new();
    };
    cells_of(placement, length)
        .into_iter()
        .filter(|cell| !cell.in_bounds(rules.grid_size))
        .map(|cell| PlacementError::OutOfBounds {
            kind: placement.kind,
            cell,
        })
        .collect()
}

fn overlap_violations(rules: &FleetRules, proposal: &[ShipPlacement]) -> Vec<PlacementError> {
    let mut claimed: HashMap<Coordinate, usize> = HashMap::new();
    let mut reported: HashSet<Coordinate> = HashSet::new();
    let mut found = Vec::new();
    for (index, placement) in proposal.iter().enumerate() {
        let Some(length) = rules.length_of(placement.kind) else {
            continue;
        };
        for cell in cells_of(placement, length) {
            match claimed.get(&cell) {
                Some(&owner) if owner != index => {
                    if reported.insert(cell) {
                        found.push(PlacementError::Overlap { cell });
                    }
                }
                Some(_) => {}
                None => {
                    claimed.insert(cell, index);
                }
            }
        }
    }
    found
}

/// Generate a valid fleet for `rules` by rejection sampling.
pub fn random_fleet<R: Rng>(rules: &FleetRules, rng: &mut R) -> Result<Vec<ShipPlacement>, PlacementError> {
    let size = i32::from(rules.grid_size);
    let mut occupied: HashSet<Coordinate> = HashSet::new();
    let mut fleet = Vec::with_capacity(rules.fleet_size());

    for rule in &rules.kinds {
        let length = match i32::try_from(rule.length) {
            Ok(length) if length > 0 && length <= size => length,
            _ => return Err(PlacementError::UnableToPlace { kind: rule.kind }),
        };
        for _ in 0..rule.count {
            let mut placed = None;
            for _ in 0..PLACEMENT_ATTEMPTS {
                let orientation = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let (max_x, max_y) = match orientation {
                    Orientation::Horizontal => (size - length, size - 1),
                    Orientation::Vertical => (size - 1, size - length),
                };
                let anchor = Coordinate::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
                let candidate = ShipPlacement::new(rule.kind, anchor, orientation);
                let cells = cells_of(&candidate, rule.length);
                if cells.iter().all(|c| !occupied.contains(c)) {
                    occupied.extend(cells);
                    placed = Some(candidate);
                    break;
                }
            }
            match placed {
                Some(p) => fleet.push(p),
                None => return Err(PlacementError::UnableToPlace { kind: rule.kind }),
            }
        }
    }
    Ok(fleet)
}
