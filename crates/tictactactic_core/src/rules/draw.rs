//! Fullness detection.

use super::Slot;

/// Checks if every slot is filled.
///
/// A full grid with no winner is a draw.
pub fn is_full<S: Slot>(slots: &[S; 9]) -> bool {
    slots.iter().all(|slot| slot.is_filled())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Outcome, Player};

    #[test]
    fn test_partial_board_not_full() {
        let mut cells = [Cell::Empty; 9];
        cells[4] = Cell::Occupied(Player::X);
        assert!(!is_full(&cells));
    }

    #[test]
    fn test_draws_fill_outcome_slots() {
        assert!(is_full(&[Outcome::Draw; 9]));
        let mut outcomes = [Outcome::Draw; 9];
        outcomes[8] = Outcome::Undecided;
        assert!(!is_full(&outcomes));
    }
}
