//! Common types: shot outcomes and the error taxonomy shared by the
//! board engine and the persistence layer.

use core::fmt;
use std::io;

/// Result of a single shot at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Shot struck an unhit ship segment.
    Hit,
    /// Shot landed on open water.
    Miss,
    /// Coordinate was targeted before. Nothing changes, and the shot
    /// does not count toward statistics.
    AlreadyFired,
}

/// Errors returned by board and placement operations.
#[derive(Debug, PartialEq, Eq)]
pub enum BoardError {
    /// A board dimension is outside the supported [1, 999] range.
    InvalidDimension { height: usize, width: usize },
    /// Coordinate falls outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Ship placement crosses a cell already claimed by another ship.
    Overlap,
    /// The fleet cannot be placed on a board this small.
    BoardTooSmall,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidDimension { height, width } => {
                write!(f, "invalid board dimensions {}x{}", height, width)
            }
            BoardError::OutOfBounds { row, col } => {
                write!(f, "coordinate ({}, {}) is out of bounds", row, col)
            }
            BoardError::Overlap => write!(f, "ship placement overlaps another ship"),
            BoardError::BoardTooSmall => write!(f, "board is too small to fit the fleet"),
        }
    }
}

/// Errors returned by the save and score stores.
#[derive(Debug)]
pub enum StoreError {
    /// Save name is empty after sanitization.
    InvalidName,
    /// A save with this name already exists; saves are never overwritten.
    NameConflict(String),
    /// No save with this name exists.
    NotFound(String),
    /// Save file failed signature verification and was not loaded.
    IntegrityCheckFailed,
    /// Underlying filesystem failure.
    Io(io::Error),
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidName => write!(f, "save name contains no usable characters"),
            StoreError::NameConflict(name) => {
                write!(f, "a saved game named \"{}\" already exists", name)
            }
            StoreError::NotFound(name) => write!(f, "no saved game named \"{}\"", name),
            StoreError::IntegrityCheckFailed => {
                write!(f, "integrity check failed: save file has been modified")
            }
            StoreError::Io(err) => write!(f, "I/O failure: {}", err),
        }
    }
}
