//! Common types: attack results and the error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ShipKind;
use crate::game::Phase;
use crate::geometry::Coordinate;

/// Result of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttackResult {
    /// No ship on the cell.
    Miss,
    /// Hit a ship that is still afloat.
    Hit,
    /// Hit a ship that has now taken as many hits as it is long.
    Sunk,
}

/// Why a fleet proposal was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Wrong number of ships of `kind`; `expected` is 0 for kinds the
    /// ruleset does not use.
    #[error("invalid fleet composition: expected {expected} {kind}, found {found}")]
    InvalidFleetComposition {
        kind: ShipKind,
        expected: usize,
        found: usize,
    },
    /// A cell of a ship lies outside the grid.
    #[error("{kind} at {cell} is out of bounds")]
    OutOfBounds { kind: ShipKind, cell: Coordinate },
    /// Two ships claim the same cell.
    #[error("ships overlap at {cell}")]
    Overlap { cell: Coordinate },
    /// Random placement gave up.
    #[error("unable to place {kind}")]
    UnableToPlace { kind: ShipKind },
}

/// Failure of the game store. Never a domain rejection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode or decode game record: {0}")]
    Codec(#[from] bincode::Error),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Broad category of a [`GameError`], for callers that map rejections onto
/// their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    PreconditionFailed,
    ValidationFailed,
    StorageFailure,
}

/// Every way an engine operation can be refused.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("game not found")]
    GameNotFound,
    #[error("player is not seated in this game")]
    UnknownPlayer,
    #[error("player not found")]
    PlayerNotFound,
    #[error("game is already full")]
    GameFull,
    #[error("operation requires phase {expected:?}, game is {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("cell {0} already attacked")]
    AlreadyAttacked(Coordinate),
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coordinate),
    #[error("player name is required")]
    EmptyPlayerName,
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::GameNotFound | GameError::UnknownPlayer | GameError::PlayerNotFound => {
                ErrorKind::NotFound
            }
            GameError::GameFull
            | GameError::WrongPhase { .. }
            | GameError::NotYourTurn
            | GameError::AlreadyAttacked(_) => ErrorKind::PreconditionFailed,
            GameError::OutOfBounds(_) | GameError::EmptyPlayerName | GameError::Placement(_) => {
                ErrorKind::ValidationFailed
            }
            GameError::Storage(_) => ErrorKind::StorageFailure,
        }
    }
}
