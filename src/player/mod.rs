//! Automated players and the loop that drives them through an engine.
//!
//! - `AiPlayer`: random placement with hunt/target firing
//! - `play_match`: seats two players in a fresh game and plays it out

use std::collections::HashSet;

use rand::rngs::SmallRng;

use crate::common::{AttackResult, PlacementError};
use crate::config::FleetRules;
use crate::geometry::{Coordinate, ShipPlacement};

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Proposing a fleet
/// - Selecting targets to attack
/// - Handling feedback from its attacks
pub trait Player: Send {
    /// Propose a complete fleet for `rules`.
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        rules: &FleetRules,
    ) -> Result<Vec<ShipPlacement>, PlacementError>;

    /// Choose the next cell to fire at, given the cells already fired at.
    /// `None` when nothing is left to fire at.
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        grid_size: u8,
        attacked: &HashSet<Coordinate>,
    ) -> Option<Coordinate>;

    /// Inform the player of the result of its last attack.
    fn handle_attack_result(&mut self, _at: Coordinate, _result: AttackResult) {}
}

pub mod ai;
pub use ai::AiPlayer;

pub mod runner;
pub use runner::{play_match, Contender, MatchSummary};
