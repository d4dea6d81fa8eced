//! First-class move types and move outcomes.
//!
//! Moves are domain events, not side effects. They can be enumerated,
//! replayed and reported independently of the aggregate they apply to.

use crate::{Outcome, Player};
use serde::{Deserialize, Serialize};

/// A move in a standalone ultimate game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct UltimateMove {
    /// Small board index (0-8).
    pub board: usize,
    /// Cell index within the board (0-8).
    pub cell: usize,
    /// The player making the move.
    pub player: Player,
}

impl std::fmt::Display for UltimateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> board {} cell {}", self.player, self.board, self.cell)
    }
}

/// A move in a Hardcore Duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct MetaMove {
    /// Ultimate game index (0-8).
    pub game: usize,
    /// Small board index within the game (0-8).
    pub board: usize,
    /// Cell index within the board (0-8).
    pub cell: usize,
    /// The player making the move.
    pub player: Player,
}

impl std::fmt::Display for MetaMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> game {} board {} cell {}",
            self.player, self.game, self.board, self.cell
        )
    }
}

/// What an accepted ultimate-game move changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UltimateMoveReport {
    /// New outcome of the played small board, if this move decided it.
    pub board_outcome: Option<Outcome>,
    /// New outcome of the game, if this move decided it.
    pub game_outcome: Option<Outcome>,
    /// Board the next mover is forced into; `None` is free choice.
    pub next_target: Option<usize>,
}

/// What an accepted Hardcore Duel move changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaMoveReport {
    /// The report of the ultimate game that was played into.
    pub game: UltimateMoveReport,
    /// New outcome of the match, if this move decided it.
    pub match_outcome: Option<Outcome>,
    /// Game the next mover is forced into; `None` is free choice.
    pub next_game: Option<usize>,
    /// Player to move next.
    pub next_turn: Player,
}

/// Error that can occur when validating or applying a move.
///
/// Every variant is a recoverable rejection; the state it was raised
/// against is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// A board, cell or game index outside 0-8.
    #[display("Index {} is out of range (must be 0-8)", _0)]
    IndexOutOfRange(usize),

    /// The cell is already occupied.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// The small board already has an outcome.
    #[display("Board is already decided")]
    BoardDecided,

    /// The move ignores the forced board.
    #[display("Must play on board {}, not board {}", expected, got)]
    WrongBoard {
        /// The forced board.
        expected: usize,
        /// The board that was played.
        got: usize,
    },

    /// The game is not playable: another game is forced, or it is completed.
    #[display("Game {} is not playable (forced game: {:?})", got, expected)]
    WrongGame {
        /// The forced game, if any.
        expected: Option<usize>,
        /// The game that was played.
        got: usize,
    },

    /// The ultimate game is already decided.
    #[display("Game is already completed")]
    GameCompleted,

    /// The Hardcore Duel is already decided.
    #[display("Match is already decided")]
    MatchDecided,

    /// It's not this player's turn.
    #[display("It's {}'s turn, not {}'s", expected, got)]
    NotYourTurn {
        /// The player to move.
        expected: Player,
        /// The player who tried to move.
        got: Player,
    },
}

impl std::error::Error for MoveError {}
