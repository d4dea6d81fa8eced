//! Save/restore of ultimate games and Hardcore Duels.
//!
//! Snapshots are plain nested structures serialized as JSON. Restoring
//! re-derives every outcome, compares it with the stored one and checks the
//! invariants; nothing is silently repaired.

use crate::invariants::{InvariantSet, MetaInvariants, UltimateInvariants, describe};
use crate::{
    Cell, GameStatus, MatchStatus, MetaMatch, Outcome, Player, SmallBoard, UltimateGame,
};
use derive_more::{Display, Error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Stored form of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellToken {
    /// Empty cell.
    Empty,
    /// Marked by X.
    X,
    /// Marked by O.
    O,
}

impl From<Cell> for CellToken {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => CellToken::Empty,
            Cell::Occupied(Player::X) => CellToken::X,
            Cell::Occupied(Player::O) => CellToken::O,
        }
    }
}

impl From<CellToken> for Cell {
    fn from(token: CellToken) -> Self {
        match token {
            CellToken::Empty => Cell::Empty,
            CellToken::X => Cell::Occupied(Player::X),
            CellToken::O => Cell::Occupied(Player::O),
        }
    }
}

/// Stored form of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeToken {
    /// Still open.
    Undecided,
    /// Won by X.
    X,
    /// Won by O.
    O,
    /// Drawn.
    Draw,
}

impl From<Outcome> for OutcomeToken {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Undecided => OutcomeToken::Undecided,
            Outcome::Won(Player::X) => OutcomeToken::X,
            Outcome::Won(Player::O) => OutcomeToken::O,
            Outcome::Draw => OutcomeToken::Draw,
        }
    }
}

impl From<OutcomeToken> for Outcome {
    fn from(token: OutcomeToken) -> Self {
        match token {
            OutcomeToken::Undecided => Outcome::Undecided,
            OutcomeToken::X => Outcome::Won(Player::X),
            OutcomeToken::O => Outcome::Won(Player::O),
            OutcomeToken::Draw => Outcome::Draw,
        }
    }
}

/// Persisted ultimate game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Cells of each small board, 9 x 9.
    pub cells: Vec<Vec<CellToken>>,
    /// Outcome of each small board.
    pub small_outcomes: Vec<OutcomeToken>,
    /// Game outcome.
    pub outcome: OutcomeToken,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Forced board, or null for free choice.
    pub active_target: Option<usize>,
    /// The game's own turn.
    pub turn: Player,
    /// Board of the deciding move, or null.
    pub decided_at: Option<usize>,
}

/// Persisted Hardcore Duel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    /// The nine ultimate games.
    pub games: Vec<GameSnapshot>,
    /// Forced game, or null for free choice.
    pub active_game: Option<usize>,
    /// Shared turn.
    pub turn: Player,
    /// Match outcome.
    pub outcome: OutcomeToken,
    /// Match status.
    pub status: MatchStatus,
}

/// Malformed or invariant-violating persisted state.
#[derive(Debug, Clone, Display, Error)]
#[display("Deserialization error: {} at {}:{}", message, file, line)]
pub struct DeserializationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DeserializationError {
    /// Creates a new deserialization error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for DeserializationError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Invalid JSON: {}", err))
    }
}

/// An aggregate that can be saved to and restored from a key-value store.
pub trait Persistable: Sized {
    /// Plain serializable form.
    type Snapshot: Serialize + DeserializeOwned;

    /// Key under which the aggregate is stored.
    const STORE_KEY: &'static str;

    /// Captures the full state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Rebuilds and validates state from a snapshot.
    fn restore(snapshot: Self::Snapshot) -> Result<Self, DeserializationError>;

    /// Encodes the full state as a JSON blob.
    fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    /// Decodes and validates a JSON blob.
    fn decode(blob: &str) -> Result<Self, DeserializationError> {
        let snapshot: Self::Snapshot = serde_json::from_str(blob)?;
        Self::restore(snapshot)
    }
}

fn nine<T>(items: Vec<T>, what: &str) -> Result<[T; 9], DeserializationError> {
    let len = items.len();
    items
        .try_into()
        .map_err(|_| DeserializationError::new(format!("{} has {} entries, expected 9", what, len)))
}

fn check_index(index: Option<usize>, what: &str) -> Result<(), DeserializationError> {
    match index {
        Some(index) if index >= 9 => Err(DeserializationError::new(format!(
            "{} {} is out of range",
            what, index
        ))),
        _ => Ok(()),
    }
}

impl Persistable for UltimateGame {
    type Snapshot = GameSnapshot;

    const STORE_KEY: &'static str = "tictactactic-ultimate-state";

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cells: self
                .boards()
                .iter()
                .map(|board| board.cells().iter().map(|&cell| CellToken::from(cell)).collect())
                .collect(),
            small_outcomes: self
                .small_outcomes()
                .iter()
                .map(|&outcome| OutcomeToken::from(outcome))
                .collect(),
            outcome: self.outcome().into(),
            status: self.status(),
            active_target: self.active_target(),
            turn: self.turn(),
            decided_at: self.decided_at(),
        }
    }

    #[instrument(skip(snapshot), fields(status = %snapshot.status))]
    fn restore(snapshot: GameSnapshot) -> Result<Self, DeserializationError> {
        let rows = nine(snapshot.cells, "cells")?;
        let stored_small = nine(snapshot.small_outcomes, "smallOutcomes")?;
        check_index(snapshot.active_target, "activeTarget")?;
        check_index(snapshot.decided_at, "decidedAt")?;

        let mut boards: [SmallBoard; 9] = Default::default();
        for (index, row) in rows.into_iter().enumerate() {
            let cells = nine(row, "board cells")?.map(Cell::from);
            let board = SmallBoard::from_cells(cells);
            let stored = Outcome::from(stored_small[index]);
            if board.outcome() != stored {
                return Err(DeserializationError::new(format!(
                    "board {} is stored as {} but its cells give {}",
                    index,
                    stored,
                    board.outcome()
                )));
            }
            boards[index] = board;
        }

        let game = UltimateGame::from_parts(
            boards,
            snapshot.active_target,
            snapshot.turn,
            snapshot.status,
            snapshot.decided_at,
        );
        let stored = Outcome::from(snapshot.outcome);
        if game.outcome() != stored {
            return Err(DeserializationError::new(format!(
                "game is stored as {} but its boards give {}",
                stored,
                game.outcome()
            )));
        }
        UltimateInvariants::check_all(&game).map_err(|violations| {
            warn!(violations = %describe(&violations), "Rejected game snapshot");
            DeserializationError::new(describe(&violations))
        })?;

        debug!(marks = game.marks(), "Game restored");
        Ok(game)
    }
}

impl Persistable for MetaMatch {
    type Snapshot = MatchSnapshot;

    const STORE_KEY: &'static str = "tictactactic-hardcore-state";

    fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            games: self.games().iter().map(UltimateGame::snapshot).collect(),
            active_game: self.active_game(),
            turn: self.turn(),
            outcome: self.outcome().into(),
            status: self.status(),
        }
    }

    #[instrument(skip(snapshot), fields(status = %snapshot.status))]
    fn restore(snapshot: MatchSnapshot) -> Result<Self, DeserializationError> {
        let stored_games = nine(snapshot.games, "games")?;
        check_index(snapshot.active_game, "activeGame")?;

        let mut games: [UltimateGame; 9] = Default::default();
        for (index, stored) in stored_games.into_iter().enumerate() {
            games[index] = UltimateGame::restore(stored).map_err(|err| {
                DeserializationError::new(format!("game {}: {}", index, err.message))
            })?;
        }

        let duel =
            MetaMatch::from_parts(games, snapshot.active_game, snapshot.turn, snapshot.status);
        let stored = Outcome::from(snapshot.outcome);
        if duel.outcome() != stored {
            return Err(DeserializationError::new(format!(
                "match is stored as {} but its games give {}",
                stored,
                duel.outcome()
            )));
        }
        MetaInvariants::check_all(&duel).map_err(|violations| {
            warn!(violations = %describe(&violations), "Rejected match snapshot");
            DeserializationError::new(describe(&violations))
        })?;

        debug!(active_game = ?duel.active_game(), "Match restored");
        Ok(duel)
    }
}
