//! Line detection.

use super::Slot;
use crate::Player;

/// The eight winning lines: rows, columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the player owning the first complete line, if any.
pub fn check_winner<S: Slot>(slots: &[S; 9]) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| {
        let player = slots[a].mark()?;
        (slots[b].mark() == Some(player) && slots[c].mark() == Some(player)).then_some(player)
    })
}
