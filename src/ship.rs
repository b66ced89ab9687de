//! Ship definitions: fleet composition entries and ships placed on a board.

use serde::{Deserialize, Serialize};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Type of ship: name and length. A fleet is an ordered list of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship placed on the board, with per-segment hit tracking.
///
/// Occupied coordinates are derived from origin, orientation and length
/// and never change after placement; only the hit flags do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    name: String,
    length: usize,
    row: usize,
    col: usize,
    orientation: Orientation,
    segment_hits: Vec<bool>,
}

impl Ship {
    pub fn new(ship_type: ShipType, orientation: Orientation, row: usize, col: usize) -> Self {
        Ship {
            name: ship_type.name().to_string(),
            length: ship_type.length(),
            row,
            col,
            orientation,
            segment_hits: vec![false; ship_type.length()],
        }
    }

    /// Ship's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Orientation of the ship.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Iterator over the coordinates the ship occupies, bow first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => (self.row, self.col + i),
            Orientation::Vertical => (self.row + i, self.col),
        })
    }

    /// Segment index occupying (row, col), if any.
    pub fn segment_at(&self, row: usize, col: usize) -> Option<usize> {
        self.cells().position(|cell| cell == (row, col))
    }

    /// Record a hit on the given segment.
    pub fn record_hit(&mut self, segment: usize) {
        if let Some(flag) = self.segment_hits.get_mut(segment) {
            *flag = true;
        }
    }

    /// Number of segments hit so far.
    pub fn hit_count(&self) -> usize {
        self.segment_hits.iter().filter(|&&h| h).count()
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.segment_hits.iter().all(|&h| h)
    }
}
