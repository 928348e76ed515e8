//! Grid geometry: coordinates, orientations and the cells a ship occupies.
//!
//! Everything here is pure. Coordinates are signed so that input arriving
//! from the wire (which may be negative or past the edge) can be represented
//! and rejected by the callers instead of silently wrapping.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ShipKind;

/// A cell on the grid, addressed by column `x` and row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `true` when the cell lies inside a `size`×`size` grid.
    pub fn in_bounds(&self, size: u8) -> bool {
        let n = i32::from(size);
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }

    /// Wire key used by visibility grids, e.g. `"3,7"`.
    pub fn key(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Cell `steps` units away along `orientation`, or `None` past the
    /// range of `i32`.
    pub fn offset(&self, orientation: Orientation, steps: i32) -> Option<Self> {
        match orientation {
            Orientation::Horizontal => self.x.checked_add(steps).map(|x| Self::new(x, self.y)),
            Orientation::Vertical => self.y.checked_add(steps).map(|y| Self::new(self.x, y)),
        }
    }

    /// Orthogonal neighbours, whether or not they are on the grid.
    pub fn neighbours(&self) -> [Coordinate; 4] {
        [
            Self::new(self.x, self.y.saturating_sub(1)),
            Self::new(self.x.saturating_add(1), self.y),
            Self::new(self.x, self.y.saturating_add(1)),
            Self::new(self.x.saturating_sub(1), self.y),
        ]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error parsing a `"x,y"` grid key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed grid key: {0:?}")]
pub struct ParseKeyError(pub String);

impl FromStr for Coordinate {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseKeyError(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.parse().map_err(|_| err())?;
        let y = y.parse().map_err(|_| err())?;
        Ok(Self::new(x, y))
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Where a ship of a given kind sits: its anchor cell and the direction it
/// extends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipPlacement {
    pub kind: ShipKind,
    pub anchor: Coordinate,
    pub orientation: Orientation,
}

impl ShipPlacement {
    pub const fn new(kind: ShipKind, anchor: Coordinate, orientation: Orientation) -> Self {
        Self {
            kind,
            anchor,
            orientation,
        }
    }
}

/// Cells covered by `placement` for a ship of `length`, ordered from the
/// anchor outward.
///
/// Stops early at the edge of the `i32` range. A truncated run always starts
/// with cells that are already off any grid, so bounds checks still see them.
pub fn cells_of(placement: &ShipPlacement, length: usize) -> Vec<Coordinate> {
    let steps = i32::try_from(length).unwrap_or(i32::MAX);
    (0..steps)
        .map_while(|i| placement.anchor.offset(placement.orientation, i))
        .collect()
}
