//! Hardcore Duel: nine ultimate games played as one ultimate game.

use crate::invariants::assert_match_invariants;
use crate::{
    GameStatus, MatchStatus, MetaMove, MetaMoveReport, MoveError, Outcome, Player, UltimateGame,
    evaluate,
};
use tracing::{debug, info, instrument};

/// A Hardcore Duel.
///
/// Each ultimate game counts as one slot of a meta board. Play stays in a
/// game until it is decided; the small board on which the deciding move
/// landed then names the next game, unless that game is already completed,
/// in which case the next mover may pick any unfinished game. A decided
/// match forces no game. One turn is
/// shared across all nine games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaMatch {
    games: [UltimateGame; 9],
    active_game: Option<usize>,
    turn: Player,
    outcome: Outcome,
    status: MatchStatus,
}

impl MetaMatch {
    /// Creates a new match: nine fresh games, X to move, free choice.
    #[instrument]
    pub fn new() -> Self {
        Self {
            games: Default::default(),
            active_game: None,
            turn: Player::X,
            outcome: Outcome::Undecided,
            status: MatchStatus::Playing,
        }
    }

    /// Rebuilds a match from stored parts, deriving its outcome.
    ///
    /// Performs no validation; callers check invariants afterwards.
    pub(crate) fn from_parts(
        games: [UltimateGame; 9],
        active_game: Option<usize>,
        turn: Player,
        status: MatchStatus,
    ) -> Self {
        let outcome = evaluate(&games.each_ref().map(UltimateGame::outcome));
        Self {
            games,
            active_game,
            turn,
            outcome,
            status,
        }
    }

    /// Returns the ultimate games.
    pub fn games(&self) -> &[UltimateGame; 9] {
        &self.games
    }

    /// Returns the ultimate game at `index`.
    pub fn game(&self, index: usize) -> Option<&UltimateGame> {
        self.games.get(index)
    }

    /// Outcomes of the nine ultimate games.
    pub fn game_outcomes(&self) -> [Outcome; 9] {
        self.games.each_ref().map(UltimateGame::outcome)
    }

    /// Game the next move is forced into; `None` is free choice.
    pub fn active_game(&self) -> Option<usize> {
        self.active_game
    }

    /// Returns the player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the match outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the match status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Commits to game `index` before moving in it.
    ///
    /// Only allowed under free choice or for the already forced game.
    ///
    /// # Errors
    ///
    /// `MatchDecided`, `IndexOutOfRange`, or `WrongGame` when another game is
    /// forced or the game is completed.
    #[instrument(skip(self), fields(active = ?self.active_game))]
    pub fn select_game(&mut self, index: usize) -> Result<(), MoveError> {
        self.ensure_playable(index)?;
        self.games[index].start();
        self.active_game = Some(index);
        debug!(game = index, "Game selected");
        assert_match_invariants(self);
        Ok(())
    }

    /// Places `player` at `cell` of board `board` in game `game`.
    ///
    /// # Errors
    ///
    /// Checked in order: `MatchDecided`, `NotYourTurn`, `IndexOutOfRange`
    /// (game), `WrongGame`, then the game's own rejections. The match is
    /// untouched on error.
    #[instrument(skip(self), fields(turn = %self.turn, active = ?self.active_game))]
    pub fn apply_move(
        &mut self,
        game: usize,
        board: usize,
        cell: usize,
        player: Player,
    ) -> Result<MetaMoveReport, MoveError> {
        if self.outcome.is_decided() {
            debug!("Rejected move after match decided");
            return Err(MoveError::MatchDecided);
        }
        if player != self.turn {
            debug!("Rejected move out of turn");
            return Err(MoveError::NotYourTurn {
                expected: self.turn,
                got: player,
            });
        }
        self.ensure_playable(game)?;

        let report = self.games[game].play(board, cell, player)?;

        self.outcome = evaluate(&self.game_outcomes());
        self.status = MatchStatus::for_outcome(self.outcome);
        self.active_game = if self.outcome.is_decided() {
            None
        } else if report.game_outcome.is_some() {
            // The deciding move's board names the next game.
            let next = board;
            if self.games[next].status() == GameStatus::Completed {
                None
            } else {
                self.games[next].start();
                Some(next)
            }
        } else {
            Some(game)
        };
        self.turn = self.turn.opponent();

        let match_outcome = self.outcome.is_decided().then_some(self.outcome);
        if let Some(outcome) = report.game_outcome {
            info!(game, %outcome, next_game = ?self.active_game, "Ultimate game completed");
        }
        if let Some(outcome) = match_outcome {
            info!(%outcome, "Match decided");
        }
        debug!(game, board, cell, %player, "Move accepted");
        assert_match_invariants(self);

        Ok(MetaMoveReport {
            game: report,
            match_outcome,
            next_game: self.active_game,
            next_turn: self.turn,
        })
    }

    fn ensure_playable(&self, index: usize) -> Result<(), MoveError> {
        if self.outcome.is_decided() {
            return Err(MoveError::MatchDecided);
        }
        let game = self.games.get(index).ok_or(MoveError::IndexOutOfRange(index))?;
        let forced_elsewhere = self.active_game.is_some_and(|active| active != index);
        if forced_elsewhere || game.status() == GameStatus::Completed {
            debug!(game = index, "Rejected move into unplayable game");
            return Err(MoveError::WrongGame {
                expected: self.active_game,
                got: index,
            });
        }
        Ok(())
    }

    /// Every move the player to move may make. Empty once decided.
    pub fn legal_moves(&self) -> Vec<MetaMove> {
        if self.outcome.is_decided() {
            return Vec::new();
        }
        (0..self.games.len())
            .filter(|&index| self.ensure_playable(index).is_ok())
            .flat_map(|index| {
                self.games[index]
                    .open_moves()
                    .map(move |(board, cell)| MetaMove::new(index, board, cell, self.turn))
            })
            .collect()
    }

    /// Rebuilds a match by applying `moves` from a fresh start.
    ///
    /// # Errors
    ///
    /// The first rejected move's error.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[MetaMove]) -> Result<Self, MoveError> {
        let mut duel = Self::new();
        for mov in moves {
            duel.apply_move(mov.game, mov.board, mov.cell, mov.player)?;
        }
        Ok(duel)
    }
}

impl Default for MetaMatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match() {
        let duel = MetaMatch::new();
        assert_eq!(duel.turn(), Player::X);
        assert_eq!(duel.active_game(), None);
        assert_eq!(duel.status(), MatchStatus::Playing);
        assert_eq!(duel.legal_moves().len(), 9 * 81);
    }

    #[test]
    fn test_first_move_pins_game() {
        let mut duel = MetaMatch::new();
        let report = duel.apply_move(2, 0, 4, Player::X).unwrap();
        assert_eq!(report.next_game, Some(2));
        assert_eq!(report.next_turn, Player::O);
        assert_eq!(report.game.next_target, Some(4));
        assert_eq!(duel.game(2).unwrap().status(), GameStatus::Active);
        assert_eq!(
            duel.apply_move(3, 4, 0, Player::O),
            Err(MoveError::WrongGame { expected: Some(2), got: 3 })
        );
    }

    #[test]
    fn test_shared_turn_drives_sub_game() {
        let mut duel = MetaMatch::new();
        duel.apply_move(2, 0, 4, Player::X).unwrap();
        assert_eq!(
            duel.apply_move(2, 4, 0, Player::X),
            Err(MoveError::NotYourTurn { expected: Player::O, got: Player::X })
        );
        duel.apply_move(2, 4, 0, Player::O).unwrap();
        assert_eq!(duel.turn(), Player::X);
    }

    #[test]
    fn test_select_game() {
        let mut duel = MetaMatch::new();
        duel.select_game(5).unwrap();
        assert_eq!(duel.active_game(), Some(5));
        assert_eq!(duel.game(5).unwrap().status(), GameStatus::Active);
        duel.select_game(5).unwrap();
        assert_eq!(
            duel.select_game(1),
            Err(MoveError::WrongGame { expected: Some(5), got: 1 })
        );
        assert_eq!(duel.select_game(9), Err(MoveError::IndexOutOfRange(9)));
    }
}
