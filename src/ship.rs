//! Runtime ship entity: a validated placement plus accumulated damage.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ShipKind;
use crate::game::PlayerId;
use crate::geometry::{cells_of, Coordinate, Orientation, ShipPlacement};

/// Identifier of a ship within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipId(pub Uuid);

impl ShipId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A ship placed in a game, with hits tracked as a count.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    id: ShipId,
    owner: PlayerId,
    placement: ShipPlacement,
    length: usize,
    hits: usize,
}

impl Ship {
    /// Build a ship from an already validated placement.
    pub fn new(owner: PlayerId, placement: ShipPlacement, length: usize) -> Self {
        Self {
            id: ShipId::new(),
            owner,
            placement,
            length,
            hits: 0,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn kind(&self) -> ShipKind {
        self.placement.kind
    }

    pub fn placement(&self) -> ShipPlacement {
        self.placement
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Cells this ship covers, anchor first.
    pub fn cells(&self) -> Vec<Coordinate> {
        cells_of(&self.placement, self.length)
    }

    /// `true` if `cell` is one of this ship's cells.
    pub fn contains(&self, cell: Coordinate) -> bool {
        let anchor = self.placement.anchor;
        let delta = |a: i32, b: i32| i64::from(a) - i64::from(b);
        let (along, across) = match self.placement.orientation {
            Orientation::Horizontal => (delta(cell.x, anchor.x), delta(cell.y, anchor.y)),
            Orientation::Vertical => (delta(cell.y, anchor.y), delta(cell.x, anchor.x)),
        };
        across == 0 && usize::try_from(along).is_ok_and(|along| along < self.length)
    }

    /// Record one more hit. Hits stop counting once the ship is sunk.
    pub(crate) fn register_hit(&mut self) {
        if self.hits < self.length {
            self.hits += 1;
        }
    }

    pub fn is_sunk(&self) -> bool {
        self.hits >= self.length
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ kind: {}, anchor: {}, orientation: {:?}, hits: {}/{} }}",
            self.placement.kind,
            self.placement.anchor,
            self.placement.orientation,
            self.hits,
            self.length,
        )
    }
}
