//! Ship hull and orientation.

use crate::common::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends along `x`.
    Horizontal,
    /// Extends along `y`.
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }

    /// Cell `i` segments away from `origin`, or `None` on overflow.
    pub(crate) fn offset(self, (x, y): Coord, i: usize) -> Option<Coord> {
        match self {
            Orientation::Horizontal => Some((x.checked_add(i)?, y)),
            Orientation::Vertical => Some((x, y.checked_add(i)?)),
        }
    }
}

/// A hull that counts the hits it has taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    length: usize,
    hits: usize,
}

impl Ship {
    pub fn new(length: usize) -> Self {
        Self { length, hits: 0 }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Register a hit. Hits saturate at the ship's length.
    pub fn hit(&mut self) {
        if self.hits < self.length {
            self.hits += 1;
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits >= self.length
    }
}
