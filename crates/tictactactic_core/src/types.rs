//! Core domain types shared by every nesting level.

use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// One square of a small board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player. Never changes once set.
    Occupied(Player),
}

impl Cell {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Checks if the square is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Result of a board, game or match.
///
/// Only ever produced by [`crate::evaluate`]; transitions are monotone
/// (`Undecided` to a decided value, then fixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// Still open.
    #[default]
    Undecided,
    /// A player completed a line.
    Won(Player),
    /// Every slot is filled and nobody completed a line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(player),
            Outcome::Undecided | Outcome::Draw => None,
        }
    }

    /// Returns true once the outcome is no longer `Undecided`.
    pub fn is_decided(self) -> bool {
        self != Outcome::Undecided
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Undecided => write!(f, "Undecided"),
            Outcome::Won(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Lifecycle of an ultimate game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameStatus {
    /// No move made and not explicitly started.
    #[default]
    NotStarted,
    /// Started or played into, outcome still open.
    Active,
    /// Outcome decided. Terminal.
    Completed,
}

/// Lifecycle of a Hardcore Duel match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MatchStatus {
    /// Outcome still open.
    #[default]
    Playing,
    /// A player won three games in a line.
    Won,
    /// Every game finished without a winning line.
    Draw,
}

impl MatchStatus {
    /// The status that corresponds to a match outcome.
    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Undecided => MatchStatus::Playing,
            Outcome::Won(_) => MatchStatus::Won,
            Outcome::Draw => MatchStatus::Draw,
        }
    }
}
