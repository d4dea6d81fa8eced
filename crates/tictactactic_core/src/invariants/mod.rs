//! First-class invariants for ultimate games and Hardcore Duels.
//!
//! Invariants are logical properties that must hold at every observable
//! state. They are checked after every accepted move in debug builds and on
//! every restored snapshot, and can be tested independently.

mod game;
mod meta;

pub use game::{
    DecidedAtInvariant, ForcedTargetInvariant, GameStatusInvariant, TurnParityInvariant,
};
pub use meta::{ActiveGameInvariant, EveryGameInvariant, MatchOutcomeInvariant, SharedTurnInvariant};

use crate::{MetaMatch, UltimateGame};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of up to five invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violation, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);

/// All ultimate-game invariants as a composable set.
pub type UltimateInvariants = (
    ForcedTargetInvariant,
    GameStatusInvariant,
    TurnParityInvariant,
    DecidedAtInvariant,
);

/// All Hardcore Duel invariants as a composable set.
pub type MetaInvariants = (
    EveryGameInvariant,
    MatchOutcomeInvariant,
    ActiveGameInvariant,
    SharedTurnInvariant,
);

/// Joins violation descriptions into one line.
pub fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Postcondition of every accepted ultimate-game move (debug builds only).
pub(crate) fn assert_game_invariants(game: &UltimateGame) {
    if cfg!(debug_assertions)
        && let Err(violations) = UltimateInvariants::check_all(game)
    {
        warn!(violations = %describe(&violations), "Ultimate game invariants violated");
        panic!("Postcondition failed: {}", describe(&violations));
    }
}

/// Postcondition of every accepted Hardcore Duel move (debug builds only).
pub(crate) fn assert_match_invariants(duel: &MetaMatch) {
    if cfg!(debug_assertions)
        && let Err(violations) = MetaInvariants::check_all(duel)
    {
        warn!(violations = %describe(&violations), "Match invariants violated");
        panic!("Postcondition failed: {}", describe(&violations));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(UltimateInvariants::check_all(&UltimateGame::new()).is_ok());
        assert!(MetaInvariants::check_all(&MetaMatch::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game = UltimateGame::new();
        game.apply_move(0, 4, Player::X).unwrap();
        game.apply_move(4, 0, Player::O).unwrap();
        assert!(UltimateInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (ForcedTargetInvariant, TurnParityInvariant);
        assert!(TwoInvariants::check_all(&UltimateGame::new()).is_ok());
    }

    #[test]
    fn test_describe_joins() {
        let violations = vec![InvariantViolation::new("a"), InvariantViolation::new("b")];
        assert_eq!(describe(&violations), "a; b");
    }
}
