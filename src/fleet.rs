//! Per-player fleet state and the visibility grids derived from it.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::common::PlacementError;
use crate::config::FleetRules;
use crate::game::PlayerId;
use crate::geometry::{Coordinate, ShipPlacement};
use crate::placement;
use crate::ship::{Ship, ShipId};

/// What one cell of a visibility grid reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellState {
    pub has_ship: bool,
    pub is_hit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_id: Option<ShipId>,
}

/// Cells keyed by their `"x,y"` wire key. Ordered so that equal fleets
/// always produce byte-identical output.
pub type VisibilityGrid = BTreeMap<String, CellState>;

/// Who is looking at a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observer {
    /// The fleet's owner sees every ship cell.
    Owner,
    /// The other player only sees ship cells they have already hit.
    Opponent,
}

/// One player's ships in one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    owner: PlayerId,
    ships: Vec<Ship>,
}

impl Fleet {
    /// Validate `placements` and build the fleet they describe.
    pub fn from_placements(
        rules: &FleetRules,
        owner: PlayerId,
        placements: &[ShipPlacement],
    ) -> Result<Self, PlacementError> {
        let mut fleet = Self {
            owner,
            ships: Vec::new(),
        };
        fleet.replace_fleet(rules, placements)?;
        Ok(fleet)
    }

    /// Drop every ship and install `placements` instead. Nothing changes if
    /// the proposal is rejected.
    pub fn replace_fleet(
        &mut self,
        rules: &FleetRules,
        placements: &[ShipPlacement],
    ) -> Result<(), PlacementError> {
        placement::validate(rules, placements)?;
        self.ships = placements
            .iter()
            .filter_map(|p| rules.length_of(p.kind).map(|len| Ship::new(self.owner, *p, len)))
            .collect();
        Ok(())
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Placements as submitted, in submission order.
    pub fn placements(&self) -> Vec<ShipPlacement> {
        self.ships.iter().map(Ship::placement).collect()
    }

    /// Ships not yet sunk.
    pub fn afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    pub(crate) fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub(crate) fn ships_mut(&mut self) -> &mut [Ship] {
        &mut self.ships
    }

    /// Visibility grid for `observer`, given the cells the opponent has
    /// attacked so far.
    pub fn view(&self, incoming: &HashSet<Coordinate>, observer: Observer) -> VisibilityGrid {
        let mut grid = VisibilityGrid::new();
        for ship in &self.ships {
            for cell in ship.cells() {
                let is_hit = incoming.contains(&cell);
                let state = match observer {
                    Observer::Owner => CellState {
                        has_ship: true,
                        is_hit,
                        ship_id: Some(ship.id()),
                    },
                    Observer::Opponent if is_hit => CellState {
                        has_ship: true,
                        is_hit: true,
                        ship_id: ship.is_sunk().then(|| ship.id()),
                    },
                    Observer::Opponent => continue,
                };
                grid.insert(cell.key(), state);
            }
        }
        grid
    }
}
