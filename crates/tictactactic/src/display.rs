//! Plain-text rendering of boards, games and matches.

use tictactactic_core::{
    Cell, GameStatus, MetaMatch, Outcome, Player, Position, SmallBoard, UltimateGame,
};

fn cell_symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Occupied(Player::X) => 'X',
        Cell::Occupied(Player::O) => 'O',
    }
}

fn outcome_symbol(outcome: Outcome) -> char {
    match outcome {
        Outcome::Undecided => '.',
        Outcome::Won(Player::X) => 'X',
        Outcome::Won(Player::O) => 'O',
        Outcome::Draw => '=',
    }
}

/// One row (0-2) of a small board, e.g. `X . O`.
fn board_row(board: &SmallBoard, row: usize) -> String {
    (0..3)
        .map(|col| cell_symbol(board.cells()[row * 3 + col]).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Names a forced target, e.g. `4 (Center)`.
fn describe_target(target: usize) -> String {
    match Position::from_index(target) {
        Some(position) => format!("{} ({})", target, position),
        None => target.to_string(),
    }
}

/// A 3x3 overview of nine outcomes, e.g. the small boards of a game.
pub fn render_outcomes(outcomes: &[Outcome; 9]) -> String {
    outcomes
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|&outcome| outcome_symbol(outcome).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full 9x9 grid of an ultimate game followed by a status line.
pub fn render_game(game: &UltimateGame) -> String {
    let mut result = String::new();
    for board_row_index in 0..3 {
        for cell_row in 0..3 {
            let line = (0..3)
                .map(|board_col| {
                    let board = &game.boards()[board_row_index * 3 + board_col];
                    board_row(board, cell_row)
                })
                .collect::<Vec<_>>()
                .join(" | ");
            result.push_str(&line);
            result.push('\n');
        }
        if board_row_index < 2 {
            result.push_str("------+-------+------\n");
        }
    }
    result.push_str(&game_status_line(game));
    result
}

fn game_status_line(game: &UltimateGame) -> String {
    match game.status() {
        GameStatus::Completed => format!("{}.", game.outcome()),
        GameStatus::NotStarted => format!("Not started. {} to move.", game.turn()),
        GameStatus::Active => match game.active_target() {
            Some(target) => format!(
                "{} to move on board {}.",
                game.turn(),
                describe_target(target)
            ),
            None => format!("{} to move (any open board).", game.turn()),
        },
    }
}

/// Overview of a Hardcore Duel: the meta board of game outcomes, the state
/// of each game and whose turn it is.
pub fn render_match(duel: &MetaMatch) -> String {
    let mut result = String::from("Games:\n");
    result.push_str(&render_outcomes(&duel.game_outcomes()));
    result.push('\n');
    for (index, game) in duel.games().iter().enumerate() {
        result.push_str(&format!(
            "  game {}: {} ({} marks)\n",
            index,
            game.status(),
            game.marks()
        ));
    }
    if duel.outcome().is_decided() {
        result.push_str(&format!("Match over: {}.", duel.outcome()));
    } else {
        match duel.active_game() {
            Some(index) => result.push_str(&format!(
                "{} to move in game {}.",
                duel.turn(),
                describe_target(index)
            )),
            None => {
                result.push_str(&format!("{} to move (any unfinished game).", duel.turn()));
            }
        }
    }
    result
}
