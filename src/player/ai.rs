use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::common::{AttackResult, PlacementError};
use crate::config::FleetRules;
use crate::geometry::{Coordinate, ShipPlacement};
use crate::placement::random_fleet;

use super::Player;

/// Hunt/target player: fires at random until it hits, then works through
/// the neighbours of its hits until the ship goes down.
#[derive(Debug, Default)]
pub struct AiPlayer {
    targets: Vec<Coordinate>,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for AiPlayer {
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        rules: &FleetRules,
    ) -> Result<Vec<ShipPlacement>, PlacementError> {
        self.targets.clear();
        random_fleet(rules, rng)
    }

    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        grid_size: u8,
        attacked: &HashSet<Coordinate>,
    ) -> Option<Coordinate> {
        while let Some(cell) = self.targets.pop() {
            if cell.in_bounds(grid_size) && !attacked.contains(&cell) {
                return Some(cell);
            }
        }

        let n = i32::from(grid_size);
        let open: Vec<Coordinate> = (0..n)
            .flat_map(|y| (0..n).map(move |x| Coordinate::new(x, y)))
            .filter(|c| !attacked.contains(c))
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(open[rng.random_range(0..open.len())])
    }

    fn handle_attack_result(&mut self, at: Coordinate, result: AttackResult) {
        match result {
            AttackResult::Hit => self.targets.extend(at.neighbours()),
            AttackResult::Sunk => self.targets.clear(),
            AttackResult::Miss => {}
        }
    }
}
