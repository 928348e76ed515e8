//! Read models handed back to callers and serialized for transport.

use serde::{Deserialize, Serialize};

use crate::common::AttackResult;
use crate::fleet::{Observer, VisibilityGrid};
use crate::game::{AttackOutcome, Game, GameId, Participant, Phase, PlayerId, Seat};
use crate::geometry::ShipPlacement;

/// Snapshot of one seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProjection {
    pub id: PlayerId,
    pub name: String,
    pub ships: Vec<ShipPlacement>,
    pub grid: VisibilityGrid,
}

/// One move of the log, flattened for the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveProjection {
    pub player_id: PlayerId,
    pub x: i32,
    pub y: i32,
    pub result: AttackResult,
    pub sequence: u64,
    pub timestamp: u64,
}

/// Snapshot of a whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProjection {
    pub id: GameId,
    pub status: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_turn: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
    #[serde(rename = "player1")]
    pub player_one: PlayerProjection,
    #[serde(rename = "player2", default, skip_serializing_if = "Option::is_none")]
    pub player_two: Option<PlayerProjection>,
    pub moves: Vec<MoveProjection>,
}

/// Result of an accepted attack plus the refreshed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackResponse {
    #[serde(flatten)]
    pub outcome: AttackOutcome,
    pub game: GameProjection,
}

/// Which seat a player holds in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "player1")]
    PlayerOne,
    #[serde(rename = "player2")]
    PlayerTwo,
}

/// One game in a player's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatedGame {
    pub id: GameId,
    pub status: Phase,
    pub side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<Participant>,
}

/// A player and the games they sit in, first-seat games first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGames {
    pub id: PlayerId,
    pub name: String,
    pub games: Vec<SeatedGame>,
}

impl PlayerGames {
    /// Summarize `games` from `player`'s side. `None` if they sit in none.
    pub fn collect(player: PlayerId, games: &[Game]) -> Option<Self> {
        let mut name = None;
        let mut seated = Vec::new();
        for game in games {
            let (side, me, other) = if game.player_one().player.id == player {
                (Side::PlayerOne, game.player_one(), game.player_two())
            } else {
                match game.player_two() {
                    Some(two) if two.player.id == player => {
                        (Side::PlayerTwo, two, Some(game.player_one()))
                    }
                    _ => continue,
                }
            };
            name.get_or_insert_with(|| me.player.name.clone());
            seated.push(SeatedGame {
                id: game.id(),
                status: game.phase(),
                side,
                opponent: other.map(|s| s.player.clone()),
            });
        }
        seated.sort_by_key(|g| (g.side, g.id));
        name.map(|name| Self {
            id: player,
            name,
            games: seated,
        })
    }
}

impl GameProjection {
    /// Everything about both fleets, regardless of who asks.
    pub fn full(game: &Game) -> Self {
        Self::build(game, |_| Observer::Owner)
    }

    /// What `observer` may see: their own fleet in full, the opponent's only
    /// where it has been hit. Anyone not seated sees both fleets as an
    /// opponent would.
    pub fn for_observer(game: &Game, observer: PlayerId) -> Self {
        Self::build(game, |seat| {
            if seat.player.id == observer {
                Observer::Owner
            } else {
                Observer::Opponent
            }
        })
    }

    fn build(game: &Game, observer_of: impl Fn(&Seat) -> Observer) -> Self {
        let player = |seat: &Seat| {
            let observer = observer_of(seat);
            let (ships, grid) = match seat.fleet() {
                Some(fleet) => {
                    let ships = match observer {
                        Observer::Owner => fleet.placements(),
                        Observer::Opponent => Vec::new(),
                    };
                    (ships, fleet.view(&game.incoming(seat.player.id), observer))
                }
                None => (Vec::new(), VisibilityGrid::new()),
            };
            PlayerProjection {
                id: seat.player.id,
                name: seat.player.name.clone(),
                ships,
                grid,
            }
        };

        Self {
            id: game.id(),
            status: game.phase(),
            current_turn: game.current_turn(),
            winner: game.winner(),
            player_one: player(game.player_one()),
            player_two: game.player_two().map(player),
            moves: game
                .moves()
                .iter()
                .map(|m| MoveProjection {
                    player_id: m.attacker,
                    x: m.coordinate.x,
                    y: m.coordinate.y,
                    result: m.result,
                    sequence: m.sequence,
                    timestamp: m.timestamp,
                })
                .collect(),
        }
    }
}
