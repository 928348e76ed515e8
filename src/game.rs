//! The game aggregate and its lifecycle state machine.
//!
//! Every transition validates fully before touching any field, so a
//! rejected call leaves the game exactly as it was.

use core::fmt;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attack::{self, Resolution};
use crate::common::{AttackResult, GameError};
use crate::config::FleetRules;
use crate::fleet::Fleet;
use crate::geometry::{Coordinate, ShipPlacement};

/// Identifier of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque identifier of a seated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle phase. Declaration order is the only order phases may be
/// entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    WaitingForPlayer,
    PlacingShips,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub name: String,
}

/// A seated player and, once submitted, their fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub player: Participant,
    fleet: Option<Fleet>,
}

impl Seat {
    fn new(player: Participant) -> Self {
        Self {
            player,
            fleet: None,
        }
    }

    pub fn fleet(&self) -> Option<&Fleet> {
        self.fleet.as_ref()
    }

    pub fn has_fleet(&self) -> bool {
        self.fleet.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// One entry of the append-only move log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub attacker: PlayerId,
    pub coordinate: Coordinate,
    pub result: AttackResult,
    /// 1-based position in the log.
    pub sequence: u64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// What an accepted attack did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackOutcome {
    pub result: AttackResult,
    pub ship_sunk: bool,
    pub game_over: bool,
}

/// Aggregate root for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    rules: FleetRules,
    phase: Phase,
    player_one: Seat,
    player_two: Option<Seat>,
    current_turn: Option<PlayerId>,
    winner: Option<PlayerId>,
    moves: Vec<Move>,
}

/// Trim a display name, rejecting names that are empty afterwards.
pub fn normalize_name(name: &str) -> Result<String, GameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GameError::EmptyPlayerName);
    }
    Ok(trimmed.to_string())
}

impl Game {
    /// Open a new game with `player_name` in the first seat.
    pub fn new(rules: FleetRules, player_name: &str) -> Result<Self, GameError> {
        let name = normalize_name(player_name)?;
        Ok(Self {
            id: GameId::new(),
            rules,
            phase: Phase::WaitingForPlayer,
            player_one: Seat::new(Participant {
                id: PlayerId::new(),
                name,
            }),
            player_two: None,
            current_turn: None,
            winner: None,
            moves: Vec::new(),
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn rules(&self) -> &FleetRules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_one(&self) -> &Seat {
        &self.player_one
    }

    pub fn player_two(&self) -> Option<&Seat> {
        self.player_two.as_ref()
    }

    pub fn current_turn(&self) -> Option<PlayerId> {
        self.current_turn
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Seats in order, skipping an empty second seat.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        core::iter::once(&self.player_one).chain(self.player_two.as_ref())
    }

    pub fn seat(&self, player: PlayerId) -> Option<&Seat> {
        self.seats().find(|s| s.player.id == player)
    }

    fn seat_mut(&mut self, player: PlayerId) -> Option<&mut Seat> {
        if self.player_one.player.id == player {
            return Some(&mut self.player_one);
        }
        self.player_two.as_mut().filter(|s| s.player.id == player)
    }

    pub fn is_seated(&self, player: PlayerId) -> bool {
        self.seat(player).is_some()
    }

    /// The other seated player, if both seats are taken.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        let two = self.player_two.as_ref()?.player.id;
        let one = self.player_one.player.id;
        if player == one {
            Some(two)
        } else if player == two {
            Some(one)
        } else {
            None
        }
    }

    /// Cells `attacker` has fired at so far.
    pub fn attacked_by(&self, attacker: PlayerId) -> HashSet<Coordinate> {
        self.moves
            .iter()
            .filter(|m| m.attacker == attacker)
            .map(|m| m.coordinate)
            .collect()
    }

    /// Cells fired at `defender`'s fleet so far.
    pub fn incoming(&self, defender: PlayerId) -> HashSet<Coordinate> {
        self.moves
            .iter()
            .filter(|m| m.attacker != defender)
            .map(|m| m.coordinate)
            .collect()
    }

    pub fn has_attacked(&self, attacker: PlayerId, at: Coordinate) -> bool {
        self.moves
            .iter()
            .any(|m| m.attacker == attacker && m.coordinate == at)
    }

    fn next_sequence(&self) -> u64 {
        u64::try_from(self.moves.len()).map_or(u64::MAX, |n| n.saturating_add(1))
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(next > self.phase, "phase may not regress");
        self.phase = next;
    }

    fn require_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Seat a second player and move on to ship placement.
    pub fn join(&mut self, player_name: &str) -> Result<PlayerId, GameError> {
        if self.player_two.is_some() {
            return Err(GameError::GameFull);
        }
        self.require_phase(Phase::WaitingForPlayer)?;
        let name = normalize_name(player_name)?;

        let id = PlayerId::new();
        self.player_two = Some(Seat::new(Participant { id, name }));
        self.advance(Phase::PlacingShips);
        Ok(id)
    }

    /// Install (or replace) `player`'s fleet. Starts the game once both
    /// seats hold a fleet; the first seat moves first.
    pub fn submit_fleet(
        &mut self,
        player: PlayerId,
        placements: &[ShipPlacement],
    ) -> Result<(), GameError> {
        self.require_phase(Phase::PlacingShips)?;
        let rules = self.rules.clone();
        let seat = self.seat_mut(player).ok_or(GameError::UnknownPlayer)?;
        match seat.fleet.as_mut() {
            Some(fleet) => fleet.replace_fleet(&rules, placements)?,
            None => seat.fleet = Some(Fleet::from_placements(&rules, player, placements)?),
        }

        let both_ready = self.player_one.has_fleet()
            && self.player_two.as_ref().is_some_and(Seat::has_fleet);
        if both_ready {
            self.advance(Phase::InProgress);
            self.current_turn = Some(self.player_one.player.id);
        }
        Ok(())
    }

    /// Fire at `at` on the opponent's board.
    pub fn attack(
        &mut self,
        player: PlayerId,
        at: Coordinate,
        timestamp: u64,
    ) -> Result<AttackOutcome, GameError> {
        self.require_phase(Phase::InProgress)?;
        if self.current_turn != Some(player) {
            return Err(GameError::NotYourTurn);
        }
        if !at.in_bounds(self.rules.grid_size) {
            return Err(GameError::OutOfBounds(at));
        }
        if self.has_attacked(player, at) {
            return Err(GameError::AlreadyAttacked(at));
        }
        let opponent = self.opponent_of(player).ok_or(GameError::UnknownPlayer)?;
        let fleet = self
            .seat_mut(opponent)
            .and_then(|s| s.fleet.as_mut())
            .ok_or(GameError::UnknownPlayer)?;

        let Resolution { result, .. } = attack::resolve(fleet, at);
        let game_over = result == AttackResult::Sunk && attack::all_sunk(fleet);

        self.moves.push(Move {
            attacker: player,
            coordinate: at,
            result,
            sequence: self.next_sequence(),
            timestamp,
        });

        if game_over {
            self.advance(Phase::Completed);
            self.winner = Some(player);
            self.current_turn = None;
        } else {
            self.current_turn = Some(opponent);
        }

        Ok(AttackOutcome {
            result,
            ship_sunk: result == AttackResult::Sunk,
            game_over,
        })
    }
}
