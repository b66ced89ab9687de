//! Game session: turn orchestration over a single hidden board.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::common::{BoardError, FireOutcome};
use crate::placement::place_fleet;
use crate::ship::ShipType;

/// Current status of a game. `Won` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
}

/// Outcome of one call to [`GameSession::fire_at`], bundled with the
/// updated status so the caller can render both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireReport {
    pub outcome: FireOutcome,
    /// Name of a ship this shot sank, if any.
    pub sunk_ship: Option<String>,
    pub status: GameStatus,
}

/// A single game in progress: board, fleet, and shot statistics.
///
/// Serializable as a whole; the save layer round-trips the exact session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    shots: u32,
    status: GameStatus,
}

impl GameSession {
    /// Start a new game: build the board, place the fleet, zero the
    /// shot counter.
    pub fn new<R: Rng>(
        height: usize,
        width: usize,
        fleet: &[ShipType],
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut board = Board::new(height, width)?;
        place_fleet(&mut board, fleet, rng)?;
        Ok(GameSession {
            board,
            shots: 0,
            status: GameStatus::InProgress,
        })
    }

    /// Fire at (row, col).
    ///
    /// `AlreadyFired` does not count toward the shot total. Status is
    /// recomputed after every shot; the transition to `Won` happens on
    /// the shot that sinks the last ship.
    pub fn fire_at(&mut self, row: usize, col: usize) -> Result<FireReport, BoardError> {
        let sunk_before: Vec<bool> = self.board.ships().iter().map(|s| s.is_sunk()).collect();
        let outcome = self.board.fire(row, col)?;
        if outcome != FireOutcome::AlreadyFired {
            self.shots += 1;
        }
        let sunk_ship = self
            .board
            .ships()
            .iter()
            .zip(sunk_before)
            .find(|&(ship, was_sunk)| ship.is_sunk() && !was_sunk)
            .map(|(ship, _)| ship.name().to_string());
        if self.board.all_sunk() {
            self.status = GameStatus::Won;
        }
        Ok(FireReport {
            outcome,
            sunk_ship,
            status: self.status,
        })
    }

    /// Returns `true` once all ships are sunk.
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Shots taken so far; this is the score of a finished game.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}
