//! Invariants of a single ultimate game.

use super::Invariant;
use crate::{GameStatus, Player, UltimateGame};

/// Invariant: the forced target is free choice or an open board.
pub struct ForcedTargetInvariant;

impl Invariant<UltimateGame> for ForcedTargetInvariant {
    fn holds(game: &UltimateGame) -> bool {
        match game.active_target() {
            None => true,
            Some(target) => game
                .board(target)
                .is_some_and(|board| !board.outcome().is_decided()),
        }
    }

    fn description() -> &'static str {
        "Forced target is free choice or an undecided board"
    }
}

/// Invariant: status follows the outcome and the marks on the boards.
///
/// Completed exactly when decided; NotStarted only while no mark is placed.
pub struct GameStatusInvariant;

impl Invariant<UltimateGame> for GameStatusInvariant {
    fn holds(game: &UltimateGame) -> bool {
        let completed = game.status() == GameStatus::Completed;
        if completed != game.outcome().is_decided() {
            return false;
        }
        game.status() != GameStatus::NotStarted || game.marks() == 0
    }

    fn description() -> &'static str {
        "Status is Completed exactly when decided, and NotStarted only when empty"
    }
}

/// Invariant: the turn toggles once per accepted move.
///
/// X is to move exactly when an even number of marks has been placed.
pub struct TurnParityInvariant;

impl Invariant<UltimateGame> for TurnParityInvariant {
    fn holds(game: &UltimateGame) -> bool {
        (game.marks() % 2 == 0) == (game.turn() == Player::X)
    }

    fn description() -> &'static str {
        "Turn alternates once per move (X to move after an even number of marks)"
    }
}

/// Invariant: a decided game records the decided board it was decided on.
pub struct DecidedAtInvariant;

impl Invariant<UltimateGame> for DecidedAtInvariant {
    fn holds(game: &UltimateGame) -> bool {
        match game.decided_at() {
            None => !game.outcome().is_decided(),
            Some(index) => {
                game.outcome().is_decided()
                    && game
                        .board(index)
                        .is_some_and(|board| board.outcome().is_decided())
            }
        }
    }

    fn description() -> &'static str {
        "Decided games record the decided board that ended them"
    }
}
