//! Formal verification of the outcome rules using Kani model checker.
//!
//! These harnesses check the rules for ALL 3x3 grids of outcomes.

use super::{Slot, evaluate};
use crate::{Outcome, Player};

fn any_outcome() -> Outcome {
    match kani::any::<u8>() % 4 {
        0 => Outcome::Undecided,
        1 => Outcome::Won(Player::X),
        2 => Outcome::Won(Player::O),
        _ => Outcome::Draw,
    }
}

/// Proves: a reported winner owns a complete line.
#[kani::proof]
#[kani::unwind(10)]
fn verify_winner_owns_a_line() {
    let slots: [Outcome; 9] = std::array::from_fn(|_| any_outcome());
    if let Outcome::Won(player) = evaluate(&slots) {
        assert!(super::LINES.iter().any(|line| line
            .iter()
            .all(|&index| slots[index].mark() == Some(player))));
    }
}

/// Proves: a grid with an undecided slot is never a draw.
#[kani::proof]
#[kani::unwind(10)]
fn verify_open_grid_is_never_draw() {
    let slots: [Outcome; 9] = std::array::from_fn(|_| any_outcome());
    kani::assume(slots.iter().any(|slot| !slot.is_filled()));
    assert_ne!(evaluate(&slots), Outcome::Draw);
}
