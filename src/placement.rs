//! Random fleet placement with bounded retries.

use rand::Rng;

use crate::board::Board;
use crate::common::BoardError;
use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::ship::{Orientation, ShipType};

/// Place every ship of `fleet` on the board at a random origin and
/// orientation, in order, without overlap.
///
/// The RNG is injected so a fixed `SmallRng` seed reproduces placement
/// exactly. Retries are capped per ship; a fleet that cannot fit fails
/// with `BoardTooSmall` instead of looping forever.
pub fn place_fleet<R: Rng>(
    board: &mut Board,
    fleet: &[ShipType],
    rng: &mut R,
) -> Result<(), BoardError> {
    let required: usize = fleet.iter().map(|def| def.length()).sum();
    if required > board.height() * board.width() {
        return Err(BoardError::BoardTooSmall);
    }
    for def in fleet {
        place_one(board, *def, rng)?;
    }
    Ok(())
}

fn place_one<R: Rng>(board: &mut Board, def: ShipType, rng: &mut R) -> Result<(), BoardError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        // Largest origin that keeps the ship on the grid for this
        // orientation; if the ship does not fit this way, the attempt is
        // spent and the next one may flip orientation.
        let (fit, max_row, max_col) = match orientation {
            Orientation::Horizontal => match board.width().checked_sub(def.length()) {
                Some(max_col) => (true, board.height() - 1, max_col),
                None => (false, 0, 0),
            },
            Orientation::Vertical => match board.height().checked_sub(def.length()) {
                Some(max_row) => (true, max_row, board.width() - 1),
                None => (false, 0, 0),
            },
        };
        if !fit {
            continue;
        }
        let row = rng.random_range(0..=max_row);
        let col = rng.random_range(0..=max_col);
        match board.place_ship(def, orientation, row, col) {
            Ok(()) => return Ok(()),
            Err(BoardError::Overlap) | Err(BoardError::OutOfBounds { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(BoardError::BoardTooSmall)
}
