//! Attack resolution against a defending fleet.

use crate::common::AttackResult;
use crate::fleet::Fleet;
use crate::geometry::Coordinate;
use crate::ship::ShipId;

/// Outcome of resolving one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub result: AttackResult,
    /// The ship on the attacked cell, if any.
    pub ship: Option<ShipId>,
}

/// Resolve an attack on `at`, recording damage on the ship there.
///
/// The caller guarantees `at` has not been attacked before by this
/// attacker. A cell of an already sunk ship still reports `Sunk` and leaves
/// the ship untouched.
pub fn resolve(fleet: &mut Fleet, at: Coordinate) -> Resolution {
    let Some(ship) = fleet.ships_mut().iter_mut().find(|s| s.contains(at)) else {
        return Resolution {
            result: AttackResult::Miss,
            ship: None,
        };
    };

    ship.register_hit();
    let result = if ship.is_sunk() {
        AttackResult::Sunk
    } else {
        AttackResult::Hit
    };
    Resolution {
        result,
        ship: Some(ship.id()),
    }
}

/// `true` once every ship of the fleet is sunk.
pub fn all_sunk(fleet: &Fleet) -> bool {
    fleet.all_sunk()
}
