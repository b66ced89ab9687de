//! Terminal rendering helpers.
//!
//! The display layer works only from the redacted [`CellMark`] view;
//! unhit ship positions never reach it.

use crate::board::{Board, CellMark};

/// Render the player's view of the board as a bordered text grid with
/// 1-based numeric headers. Hits show `H`, misses `M`, everything else
/// is redacted to `#`.
pub fn render_view(board: &Board) -> String {
    let mut out = String::new();
    out.push_str(&format!("|{:^3}|", ' '));
    for c in 0..board.width() {
        out.push_str(&format!("{:^3}|", c + 1));
    }
    for (r, row) in board.view().iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("|{:^3}|", r + 1));
        for mark in row {
            let ch = match mark {
                CellMark::Hit => 'H',
                CellMark::Miss => 'M',
                CellMark::Unknown => '#',
            };
            out.push_str(&format!("{:^3}|", ch));
        }
    }
    out
}
