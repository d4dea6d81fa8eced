//! Outcome rules shared by every nesting level.
//!
//! A small board is judged over its cells, an ultimate game over its small
//! board outcomes and a Hardcore Duel over its game outcomes. All three use
//! [`evaluate`]; only the slot type differs.

mod draw;
mod win;

#[cfg(kani)]
mod verification;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use crate::{Cell, Outcome, Player};
use tracing::instrument;

/// A value occupying one of the nine slots of a 3x3 grid.
pub trait Slot: Copy + std::fmt::Debug {
    /// The player this slot counts for when completing a line.
    ///
    /// Draws and empty slots count for nobody.
    fn mark(self) -> Option<Player>;

    /// Whether the slot is settled. A grid of filled slots with no line is a draw.
    fn is_filled(self) -> bool;
}

impl Slot for Cell {
    fn mark(self) -> Option<Player> {
        self.player()
    }

    fn is_filled(self) -> bool {
        !self.is_empty()
    }
}

impl Slot for Outcome {
    fn mark(self) -> Option<Player> {
        self.winner()
    }

    fn is_filled(self) -> bool {
        self.is_decided()
    }
}

/// Judges a 3x3 grid of slots.
///
/// Returns the player of the first completed line in [`LINES`] order, else
/// `Draw` when every slot is filled, else `Undecided`.
#[instrument(level = "trace")]
pub fn evaluate<S: Slot>(slots: &[S; 9]) -> Outcome {
    if let Some(winner) = check_winner(slots) {
        Outcome::Won(winner)
    } else if is_full(slots) {
        Outcome::Draw
    } else {
        Outcome::Undecided
    }
}
