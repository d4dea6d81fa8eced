//! TicTacTactic core - Ultimate tic-tac-toe and the Hardcore Duel.
//!
//! # Architecture
//!
//! The same 3x3 rule is applied at three nesting levels:
//!
//! - **[`SmallBoard`]**: nine cells, judged by [`evaluate`]
//! - **[`UltimateGame`]**: nine small boards, judged by [`evaluate`] over
//!   their outcomes, with forced-board targeting
//! - **[`MetaMatch`]**: nine ultimate games, judged by [`evaluate`] over
//!   their outcomes, with forced-game targeting and one shared turn
//!
//! Every mutation goes through the owning level's `apply_move`, which either
//! applies the whole move or rejects it with a [`MoveError`] and leaves the
//! state untouched. The [`Persistable`] snapshots and the [`KeyValueStore`]
//! boundary let callers save and restore games.
//!
//! # Example
//!
//! ```
//! use tictactactic_core::{MoveError, Player, UltimateGame};
//!
//! let mut game = UltimateGame::new();
//! let report = game.apply_move(0, 4, Player::X)?;
//! assert_eq!(report.next_target, Some(4));
//! assert_eq!(
//!     game.apply_move(0, 0, Player::O),
//!     Err(MoveError::WrongBoard { expected: 4, got: 0 })
//! );
//! # Ok::<(), MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod codec;
mod invariants;
mod meta_match;
mod position;
mod rules;
mod small_board;
mod store;
mod types;
mod ultimate;

// Crate-level exports - Domain types
pub use position::Position;
pub use types::{Cell, GameStatus, MatchStatus, Outcome, Player};

// Crate-level exports - Rules
pub use rules::{LINES, Slot, check_winner, evaluate, is_full};

// Crate-level exports - Aggregates
pub use meta_match::MetaMatch;
pub use small_board::{Placement, SmallBoard};
pub use ultimate::UltimateGame;

// Crate-level exports - Moves
pub use action::{MetaMove, MetaMoveReport, MoveError, UltimateMove, UltimateMoveReport};

// Crate-level exports - Invariants
pub use invariants::{
    ActiveGameInvariant, DecidedAtInvariant, EveryGameInvariant, ForcedTargetInvariant,
    GameStatusInvariant, Invariant, InvariantSet, InvariantViolation, MatchOutcomeInvariant,
    MetaInvariants, SharedTurnInvariant, TurnParityInvariant, UltimateInvariants,
};

// Crate-level exports - Persistence
pub use codec::{
    CellToken, DeserializationError, GameSnapshot, MatchSnapshot, OutcomeToken, Persistable,
};
pub use store::{KeyValueStore, MemoryStore, PersistError, StoreError, load, save};
