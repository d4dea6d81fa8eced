//! Ultimate tic-tac-toe: nine small boards with forced targeting.

use crate::invariants::assert_game_invariants;
use crate::{
    GameStatus, MoveError, Outcome, Player, SmallBoard, UltimateMove, UltimateMoveReport, evaluate,
};
use tracing::{debug, info, instrument};

/// One ultimate tic-tac-toe game.
///
/// Landing on cell `k` forces the next move into board `k`, unless board `k`
/// is already decided, in which case the next mover may pick any open board.
/// The game is won by a line of won small boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltimateGame {
    boards: [SmallBoard; 9],
    active_target: Option<usize>,
    turn: Player,
    outcome: Outcome,
    status: GameStatus,
    decided_at: Option<usize>,
}

impl UltimateGame {
    /// Creates a new game: empty boards, X to move, free choice.
    #[instrument]
    pub fn new() -> Self {
        Self {
            boards: Default::default(),
            active_target: None,
            turn: Player::X,
            outcome: Outcome::Undecided,
            status: GameStatus::NotStarted,
            decided_at: None,
        }
    }

    /// Rebuilds a game from stored parts, deriving its outcome.
    ///
    /// Performs no validation; callers check invariants afterwards.
    pub(crate) fn from_parts(
        boards: [SmallBoard; 9],
        active_target: Option<usize>,
        turn: Player,
        status: GameStatus,
        decided_at: Option<usize>,
    ) -> Self {
        let outcome = evaluate(&boards.each_ref().map(SmallBoard::outcome));
        Self {
            boards,
            active_target,
            turn,
            outcome,
            status,
            decided_at,
        }
    }

    /// Returns the small boards.
    pub fn boards(&self) -> &[SmallBoard; 9] {
        &self.boards
    }

    /// Returns the small board at `index`.
    pub fn board(&self, index: usize) -> Option<&SmallBoard> {
        self.boards.get(index)
    }

    /// Outcomes of the nine small boards.
    pub fn small_outcomes(&self) -> [Outcome; 9] {
        self.boards.each_ref().map(SmallBoard::outcome)
    }

    /// Board the next move is forced into; `None` is free choice.
    pub fn active_target(&self) -> Option<usize> {
        self.active_target
    }

    /// Returns the player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the game outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Index of the small board whose move decided the game.
    pub fn decided_at(&self) -> Option<usize> {
        self.decided_at
    }

    /// Number of marks across all boards.
    pub fn marks(&self) -> usize {
        self.boards.iter().map(SmallBoard::marks).sum()
    }

    /// Explicitly starts the game without a move.
    ///
    /// No effect on an active or completed game.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn start(&mut self) {
        if self.status == GameStatus::NotStarted {
            debug!("Game started");
            self.status = GameStatus::Active;
        }
    }

    /// Places `player` at `cell` of board `board`.
    ///
    /// # Errors
    ///
    /// Checked in order: `GameCompleted`, `NotYourTurn`, `IndexOutOfRange`
    /// (board), `WrongBoard`, then the small board's own rejections. The game
    /// is untouched on error.
    #[instrument(skip(self), fields(turn = %self.turn, target = ?self.active_target))]
    pub fn apply_move(
        &mut self,
        board: usize,
        cell: usize,
        player: Player,
    ) -> Result<UltimateMoveReport, MoveError> {
        self.ensure_open()?;
        if player != self.turn {
            debug!("Rejected move out of turn");
            return Err(MoveError::NotYourTurn {
                expected: self.turn,
                got: player,
            });
        }
        self.place(board, cell, player)
    }

    /// Applies a move on behalf of an enclosing match whose turn is authoritative.
    pub(crate) fn play(
        &mut self,
        board: usize,
        cell: usize,
        player: Player,
    ) -> Result<UltimateMoveReport, MoveError> {
        self.ensure_open()?;
        self.place(board, cell, player)
    }

    fn ensure_open(&self) -> Result<(), MoveError> {
        if self.outcome.is_decided() {
            debug!("Rejected move into completed game");
            return Err(MoveError::GameCompleted);
        }
        Ok(())
    }

    fn place(
        &mut self,
        board: usize,
        cell: usize,
        player: Player,
    ) -> Result<UltimateMoveReport, MoveError> {
        if board >= self.boards.len() {
            return Err(MoveError::IndexOutOfRange(board));
        }
        if let Some(target) = self.active_target
            && target != board
        {
            debug!(target, board, "Rejected move off the forced board");
            return Err(MoveError::WrongBoard {
                expected: target,
                got: board,
            });
        }

        let placement = self.boards[board].apply_move(cell, player)?;

        self.outcome = evaluate(&self.small_outcomes());
        // Redirect to free choice when the natural target is already decided.
        self.active_target = self
            .boards
            .get(cell)
            .filter(|next| !next.outcome().is_decided())
            .map(|_| cell);
        self.turn = self.turn.opponent();

        let game_outcome = if self.outcome.is_decided() {
            self.status = GameStatus::Completed;
            self.decided_at = Some(board);
            info!(outcome = %self.outcome, board, "Ultimate game decided");
            Some(self.outcome)
        } else {
            self.status = GameStatus::Active;
            None
        };

        let board_outcome = placement.decided.then_some(placement.outcome);
        if let Some(outcome) = board_outcome {
            debug!(board, %outcome, "Small board decided");
        }
        debug!(board, cell, %player, next_target = ?self.active_target, "Move accepted");
        assert_game_invariants(self);

        Ok(UltimateMoveReport {
            board_outcome,
            game_outcome,
            next_target: self.active_target,
        })
    }

    /// Whether a move may currently target board `index`.
    pub fn is_board_playable(&self, index: usize) -> bool {
        !self.outcome.is_decided()
            && self.active_target.is_none_or(|target| target == index)
            && self
                .boards
                .get(index)
                .is_some_and(|board| !board.outcome().is_decided())
    }

    /// `(board, cell)` pairs open to the next move.
    pub(crate) fn open_moves(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.boards.len())
            .filter(|&index| self.is_board_playable(index))
            .flat_map(|index| self.boards[index].open_cells().map(move |cell| (index, cell)))
    }

    /// Every move the player to move may make. Empty once decided.
    pub fn legal_moves(&self) -> Vec<UltimateMove> {
        self.open_moves()
            .map(|(board, cell)| UltimateMove::new(board, cell, self.turn))
            .collect()
    }

    /// Rebuilds a game by applying `moves` from a fresh start.
    ///
    /// # Errors
    ///
    /// The first rejected move's error.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[UltimateMove]) -> Result<Self, MoveError> {
        let mut game = Self::new();
        for mov in moves {
            game.apply_move(mov.board, mov.cell, mov.player)?;
        }
        Ok(game)
    }
}

impl Default for UltimateGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = UltimateGame::new();
        assert_eq!(game.turn(), Player::X);
        assert_eq!(game.active_target(), None);
        assert_eq!(game.status(), GameStatus::NotStarted);
        assert_eq!(game.legal_moves().len(), 81);
    }

    #[test]
    fn test_move_forces_target_and_toggles_turn() {
        let mut game = UltimateGame::new();
        let report = game.apply_move(0, 4, Player::X).unwrap();
        assert_eq!(report.next_target, Some(4));
        assert_eq!(report.board_outcome, None);
        assert_eq!(game.turn(), Player::O);
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.legal_moves().len(), 9);
    }

    #[test]
    fn test_wrong_board_rejected_without_mutation() {
        let mut game = UltimateGame::new();
        game.apply_move(0, 4, Player::X).unwrap();
        let before = game.clone();
        assert_eq!(
            game.apply_move(0, 0, Player::O),
            Err(MoveError::WrongBoard { expected: 4, got: 0 })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_out_of_turn_rejected() {
        let mut game = UltimateGame::new();
        assert_eq!(
            game.apply_move(0, 0, Player::O),
            Err(MoveError::NotYourTurn { expected: Player::X, got: Player::O })
        );
        assert_eq!(game, UltimateGame::new());
    }

    #[test]
    fn test_board_index_out_of_range() {
        let mut game = UltimateGame::new();
        assert_eq!(game.apply_move(9, 0, Player::X), Err(MoveError::IndexOutOfRange(9)));
        assert_eq!(game.apply_move(0, 9, Player::X), Err(MoveError::IndexOutOfRange(9)));
    }

    #[test]
    fn test_start_activates() {
        let mut game = UltimateGame::new();
        game.start();
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.marks(), 0);
    }
}
