//! Domain events published after successful transitions.

use tokio::sync::broadcast;

use crate::game::{GameId, Participant, PlayerId};
use crate::projection::GameProjection;

/// Notification for whatever fans state out to viewers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Any accepted transition; carries the full projection.
    GameUpdated(Box<GameProjection>),
    /// A second player took the open seat.
    PlayerJoined { game: GameId, player: Participant },
    /// Both fleets are in and the first turn is open.
    GameStarted { game: GameId, first_turn: PlayerId },
    /// The last ship of a fleet went down.
    GameEnded { game: GameId, winner: Participant },
}

impl GameEvent {
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::GameUpdated(projection) => projection.id,
            GameEvent::PlayerJoined { game, .. }
            | GameEvent::GameStarted { game, .. }
            | GameEvent::GameEnded { game, .. } => *game,
        }
    }
}

/// Fire-and-forget publisher. Sending never waits and a missing audience
/// is not an error.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<GameEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: GameEvent) {
        if self.sender.send(event).is_err() {
            log::trace!("no subscribers for game event");
        }
    }
}
