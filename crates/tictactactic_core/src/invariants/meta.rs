//! Invariants of a Hardcore Duel.

use super::{Invariant, InvariantSet, UltimateInvariants};
use crate::{GameStatus, MatchStatus, MetaMatch, Player, UltimateGame};

/// Invariant: every ultimate game satisfies its own invariants.
pub struct EveryGameInvariant;

impl Invariant<MetaMatch> for EveryGameInvariant {
    fn holds(duel: &MetaMatch) -> bool {
        duel.games()
            .iter()
            .all(|game| UltimateInvariants::check_all(game).is_ok())
    }

    fn description() -> &'static str {
        "Every ultimate game satisfies the ultimate-game invariants"
    }
}

/// Invariant: match status follows the match outcome.
pub struct MatchOutcomeInvariant;

impl Invariant<MetaMatch> for MatchOutcomeInvariant {
    fn holds(duel: &MetaMatch) -> bool {
        duel.status() == MatchStatus::for_outcome(duel.outcome())
    }

    fn description() -> &'static str {
        "Match status is Won or Draw exactly when the match is decided"
    }
}

/// Invariant: the forced game is free choice or an active, undecided game.
pub struct ActiveGameInvariant;

impl Invariant<MetaMatch> for ActiveGameInvariant {
    fn holds(duel: &MetaMatch) -> bool {
        match duel.active_game() {
            None => true,
            Some(index) => duel
                .game(index)
                .is_some_and(|game| game.status() == GameStatus::Active),
        }
    }

    fn description() -> &'static str {
        "Forced game is free choice or an active, undecided game"
    }
}

/// Invariant: the shared turn toggles once per accepted move.
pub struct SharedTurnInvariant;

impl Invariant<MetaMatch> for SharedTurnInvariant {
    fn holds(duel: &MetaMatch) -> bool {
        let marks: usize = duel.games().iter().map(UltimateGame::marks).sum();
        (marks % 2 == 0) == (duel.turn() == Player::X)
    }

    fn description() -> &'static str {
        "Shared turn alternates once per move across all games"
    }
}
