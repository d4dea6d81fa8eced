//! A single 3x3 board.

use crate::{Cell, MoveError, Outcome, Player, evaluate};

/// Result of an accepted placement on a small board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Whether this placement decided the board.
    pub decided: bool,
    /// The board outcome after the placement.
    pub outcome: Outcome,
}

/// 3x3 board of cells with a derived outcome.
///
/// Once the outcome is decided the board is frozen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SmallBoard {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
    outcome: Outcome,
}

impl SmallBoard {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a board from stored cells, deriving its outcome.
    pub(crate) fn from_cells(cells: [Cell; 9]) -> Self {
        Self {
            cells,
            outcome: evaluate(&cells),
        }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns the board outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Number of occupied cells.
    pub fn marks(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Indices of cells a move may still target. Empty once decided.
    pub fn open_cells(&self) -> impl Iterator<Item = usize> + '_ {
        let open = !self.outcome.is_decided();
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| open && cell.is_empty())
            .map(|(index, _)| index)
    }

    /// Places `player` at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for an index past 8, `BoardDecided` once the board
    /// has an outcome, `CellOccupied` for a taken cell. The board is untouched
    /// on error.
    pub fn apply_move(&mut self, index: usize, player: Player) -> Result<Placement, MoveError> {
        let cell = self.get(index).ok_or(MoveError::IndexOutOfRange(index))?;
        if self.outcome.is_decided() {
            return Err(MoveError::BoardDecided);
        }
        if !cell.is_empty() {
            return Err(MoveError::CellOccupied(index));
        }

        self.cells[index] = Cell::Occupied(player);
        self.outcome = evaluate(&self.cells);

        Ok(Placement {
            decided: self.outcome.is_decided(),
            outcome: self.outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_sets_cell() {
        let mut board = SmallBoard::new();
        let placement = board.apply_move(4, Player::X).unwrap();
        assert_eq!(board.get(4), Some(Cell::Occupied(Player::X)));
        assert!(!placement.decided);
        assert_eq!(placement.outcome, Outcome::Undecided);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut board = SmallBoard::new();
        board.apply_move(4, Player::X).unwrap();
        let before = board.clone();
        assert_eq!(board.apply_move(4, Player::O), Err(MoveError::CellOccupied(4)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut board = SmallBoard::new();
        assert_eq!(board.apply_move(9, Player::X), Err(MoveError::IndexOutOfRange(9)));
    }

    #[test]
    fn test_winning_move_decides_and_freezes() {
        let mut board = SmallBoard::new();
        board.apply_move(0, Player::X).unwrap();
        board.apply_move(4, Player::X).unwrap();
        let placement = board.apply_move(8, Player::X).unwrap();
        assert!(placement.decided);
        assert_eq!(placement.outcome, Outcome::Won(Player::X));

        let before = board.clone();
        assert_eq!(board.apply_move(1, Player::O), Err(MoveError::BoardDecided));
        assert_eq!(board, before);
        assert_eq!(board.open_cells().count(), 0);
    }

    #[test]
    fn test_filling_without_line_draws() {
        let mut board = SmallBoard::new();
        let moves = [
            (0, Player::X), (1, Player::O), (2, Player::X),
            (4, Player::O), (3, Player::X), (5, Player::O),
            (7, Player::X), (6, Player::O),
        ];
        for (index, player) in moves {
            assert!(!board.apply_move(index, player).unwrap().decided);
        }
        let placement = board.apply_move(8, Player::X).unwrap();
        assert_eq!(placement.outcome, Outcome::Draw);
        assert_eq!(board.marks(), 9);
    }
}
