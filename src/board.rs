//! Game board state: cell grid, placed ships, fire resolution.

use serde::{Deserialize, Serialize};

use crate::common::{BoardError, FireOutcome};
use crate::config::{MAX_DIMENSION, MIN_DIMENSION};
use crate::ship::{Orientation, Ship, ShipType};

/// State of a single cell. Ship cells carry the index of the occupying
/// ship in the board's fleet; a cell holds at most one ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Untouched,
    ShipUnhit(usize),
    ShipHit(usize),
    MissedShot,
}

/// Player-facing mark for one cell. `ShipUnhit` renders as `Unknown` so
/// the display layer never learns where unhit ships are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMark {
    Unknown,
    Hit,
    Miss,
}

/// Main board state: dynamic height x width grid plus the placed fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty board. Dimensions outside [1, 999] are rejected.
    pub fn new(height: usize, width: usize) -> Result<Self, BoardError> {
        if height < MIN_DIMENSION
            || height > MAX_DIMENSION
            || width < MIN_DIMENSION
            || width > MAX_DIMENSION
        {
            return Err(BoardError::InvalidDimension { height, width });
        }
        Ok(Board {
            height,
            width,
            cells: vec![Cell::Untouched; height * width],
            ships: Vec::new(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Placed ships, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Returns `true` when (row, col) lies on the grid.
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// State of the cell at (row, col).
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        if !self.in_bounds(row, col) {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(self.cells[self.idx(row, col)])
    }

    /// Place a ship with the given orientation at (row, col).
    ///
    /// Bounds are checked before overlap, so nothing is written unless the
    /// whole ship fits on free water.
    pub fn place_ship(
        &mut self,
        ship_type: ShipType,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<(), BoardError> {
        let ship = Ship::new(ship_type, orientation, row, col);
        for (r, c) in ship.cells() {
            if !self.in_bounds(r, c) {
                return Err(BoardError::OutOfBounds { row: r, col: c });
            }
        }
        for (r, c) in ship.cells() {
            if !matches!(self.cells[self.idx(r, c)], Cell::Untouched) {
                return Err(BoardError::Overlap);
            }
        }
        let ship_index = self.ships.len();
        for (r, c) in ship.cells() {
            let i = self.idx(r, c);
            self.cells[i] = Cell::ShipUnhit(ship_index);
        }
        self.ships.push(ship);
        Ok(())
    }

    /// Process a shot at (row, col).
    ///
    /// A previously fired cell yields `AlreadyFired` and mutates nothing;
    /// shots outside the grid are an error from the caller.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<FireOutcome, BoardError> {
        if !self.in_bounds(row, col) {
            return Err(BoardError::OutOfBounds { row, col });
        }
        let i = self.idx(row, col);
        match self.cells[i] {
            Cell::ShipHit(_) | Cell::MissedShot => Ok(FireOutcome::AlreadyFired),
            Cell::ShipUnhit(ship_index) => {
                self.cells[i] = Cell::ShipHit(ship_index);
                if let Some(ship) = self.ships.get_mut(ship_index) {
                    if let Some(segment) = ship.segment_at(row, col) {
                        ship.record_hit(segment);
                    }
                }
                Ok(FireOutcome::Hit)
            }
            Cell::Untouched => {
                self.cells[i] = Cell::MissedShot;
                Ok(FireOutcome::Miss)
            }
        }
    }

    /// Returns `true` when every ship's hit count equals its length.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(|ship| ship.is_sunk())
    }

    /// Total number of cells occupied by ships.
    pub fn ship_cell_count(&self) -> usize {
        self.ships.iter().map(|ship| ship.length()).sum()
    }

    /// Number of cells fired upon so far, hits and misses combined.
    pub fn fired_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::ShipHit(_) | Cell::MissedShot))
            .count()
    }

    /// Redacted per-cell view for the display layer, row-major.
    pub fn view(&self) -> Vec<Vec<CellMark>> {
        (0..self.height)
            .map(|r| {
                (0..self.width)
                    .map(|c| match self.cells[self.idx(r, c)] {
                        Cell::ShipHit(_) => CellMark::Hit,
                        Cell::MissedShot => CellMark::Miss,
                        Cell::Untouched | Cell::ShipUnhit(_) => CellMark::Unknown,
                    })
                    .collect()
            })
            .collect()
    }
}
