//! Tests for standalone ultimate games.

use tictactactic_core::{
    CellToken, GameSnapshot, GameStatus, MoveError, Outcome, OutcomeToken, Persistable, Player,
    UltimateGame, UltimateMove,
};

fn x(board: usize, cell: usize) -> UltimateMove {
    UltimateMove::new(board, cell, Player::X)
}

fn o(board: usize, cell: usize) -> UltimateMove {
    UltimateMove::new(board, cell, Player::O)
}

/// X takes the top row of board 0; the ninth move lands on cell 0 of the
/// board it just decided.
fn board_zero_won_by_x() -> Vec<UltimateMove> {
    vec![
        x(4, 0),
        o(0, 4),
        x(4, 8),
        o(8, 0),
        x(0, 1),
        o(1, 0),
        x(0, 2),
        o(2, 0),
        x(0, 0),
    ]
}

fn board_cells(xs: &[usize], os: &[usize]) -> Vec<CellToken> {
    let mut cells = vec![CellToken::Empty; 9];
    for &cell in xs {
        cells[cell] = CellToken::X;
    }
    for &cell in os {
        cells[cell] = CellToken::O;
    }
    cells
}

/// Eight boards decided with no line of boards (X O X / X O O / O X _);
/// board 8 is one move (cell 2) from X's top row, X to move there.
fn one_board_from_draw() -> GameSnapshot {
    let mut cells = Vec::new();
    let mut small_outcomes = Vec::new();
    for winner in [
        Player::X,
        Player::O,
        Player::X,
        Player::X,
        Player::O,
        Player::O,
        Player::O,
        Player::X,
    ] {
        match winner {
            Player::X => cells.push(board_cells(&[0, 1, 2], &[3, 4])),
            Player::O => cells.push(board_cells(&[3, 4], &[0, 1, 2])),
        }
        small_outcomes.push(OutcomeToken::from(Outcome::Won(winner)));
    }
    cells.push(board_cells(&[0, 1], &[3, 4]));
    small_outcomes.push(OutcomeToken::Undecided);

    GameSnapshot {
        cells,
        small_outcomes,
        outcome: OutcomeToken::Undecided,
        status: GameStatus::Active,
        active_target: Some(8),
        turn: Player::X,
        decided_at: None,
    }
}

#[test]
fn test_forced_target_follows_cell() {
    let mut game = UltimateGame::new();

    let report = game.apply_move(0, 4, Player::X).expect("Valid move");
    assert_eq!(report.next_target, Some(4));
    assert_eq!(game.turn(), Player::O);

    let report = game.apply_move(4, 4, Player::O).expect("Valid move");
    assert_eq!(report.next_target, Some(4));
    assert_eq!(game.turn(), Player::X);

    let before = game.clone();
    assert_eq!(
        game.apply_move(0, 0, Player::X),
        Err(MoveError::WrongBoard { expected: 4, got: 0 })
    );
    assert_eq!(game, before);

    // Board 4 is still open, so the centre stays taken but the rest is playable.
    assert_eq!(game.apply_move(4, 4, Player::X), Err(MoveError::CellOccupied(4)));
    game.apply_move(4, 0, Player::X).expect("Valid move");
}

#[test]
fn test_occupied_cell_leaves_state_unchanged() {
    let mut game = UltimateGame::new();
    game.apply_move(3, 3, Player::X).expect("Valid move");
    game.apply_move(3, 5, Player::O).expect("Valid move");
    game.apply_move(5, 3, Player::X).expect("Valid move");

    let before = game.clone();
    assert_eq!(game.apply_move(3, 3, Player::O), Err(MoveError::CellOccupied(3)));
    assert_eq!(game.apply_move(3, 3, Player::O), Err(MoveError::CellOccupied(3)));
    assert_eq!(game, before);
}

#[test]
fn test_turn_alternates_per_accepted_move() {
    let mut game = UltimateGame::new();
    assert_eq!(game.turn(), Player::X);
    game.apply_move(0, 1, Player::X).expect("Valid move");
    assert_eq!(game.turn(), Player::O);
    assert_eq!(
        game.apply_move(2, 1, Player::O),
        Err(MoveError::WrongBoard { expected: 1, got: 2 })
    );
    assert_eq!(game.turn(), Player::O);
    game.apply_move(1, 2, Player::O).expect("Valid move");
    assert_eq!(game.turn(), Player::X);
}

#[test]
fn test_decided_target_redirects_to_free_choice() {
    let game = UltimateGame::replay(&board_zero_won_by_x()).expect("Valid replay");

    assert_eq!(game.board(0).map(|b| b.outcome()), Some(Outcome::Won(Player::X)));
    assert_eq!(game.active_target(), None);
    assert_eq!(game.turn(), Player::O);
    assert_eq!(game.outcome(), Outcome::Undecided);
}

#[test]
fn test_winning_move_reports_board_outcome() {
    let mut moves = board_zero_won_by_x();
    let last = moves.pop().expect("non-empty");
    let mut game = UltimateGame::replay(&moves).expect("Valid replay");

    let report = game.apply_move(last.board, last.cell, last.player).expect("Valid move");
    assert_eq!(report.board_outcome, Some(Outcome::Won(Player::X)));
    assert_eq!(report.game_outcome, None);
    assert_eq!(report.next_target, None);
}

#[test]
fn test_landing_on_decided_board_index_frees_choice() {
    let mut game = UltimateGame::replay(&board_zero_won_by_x()).expect("Valid replay");

    let report = game.apply_move(5, 0, Player::O).expect("Valid move");
    assert_eq!(report.next_target, None);

    let before = game.clone();
    assert_eq!(game.apply_move(0, 3, Player::X), Err(MoveError::BoardDecided));
    assert_eq!(game, before);

    // Every open cell outside board 0: 72 cells minus the 6 marks placed there.
    let legal = game.legal_moves();
    assert_eq!(legal.len(), 66);
    assert!(legal.iter().all(|mov| mov.board != 0 && mov.player == Player::X));
}

#[test]
fn test_completed_game_rejects_every_move() {
    // Boards 0 and 1 won by X, board 2 one move from X's top row.
    let json = serde_json::json!({
        "cells": [
            ["x", "x", "x", "o", "o", "empty", "empty", "empty", "empty"],
            ["x", "x", "x", "o", "o", "empty", "empty", "empty", "empty"],
            ["x", "x", "empty", "o", "o", "empty", "empty", "empty", "empty"],
            ["empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty"],
            ["empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty"],
            ["empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty"],
            ["empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty"],
            ["empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty"],
            ["empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty", "empty"]
        ],
        "smallOutcomes": ["x", "x", "undecided", "undecided", "undecided",
                          "undecided", "undecided", "undecided", "undecided"],
        "outcome": "undecided",
        "status": "active",
        "activeTarget": 2,
        "turn": "x",
        "decidedAt": null
    });
    let snapshot: GameSnapshot = serde_json::from_value(json).expect("Valid snapshot shape");
    let mut game = UltimateGame::restore(snapshot).expect("Valid snapshot");

    let report = game.apply_move(2, 2, Player::X).expect("Valid move");
    assert_eq!(report.board_outcome, Some(Outcome::Won(Player::X)));
    assert_eq!(report.game_outcome, Some(Outcome::Won(Player::X)));
    assert_eq!(game.status(), GameStatus::Completed);
    assert_eq!(game.decided_at(), Some(2));
    assert!(game.legal_moves().is_empty());

    let before = game.clone();
    for board in 0..9 {
        for cell in 0..9 {
            assert_eq!(game.apply_move(board, cell, Player::O), Err(MoveError::GameCompleted));
        }
    }
    assert_eq!(game, before);
}

#[test]
fn test_replay_stops_at_first_illegal_move() {
    let moves = vec![x(0, 4), o(4, 4), x(0, 0)];
    assert_eq!(
        UltimateGame::replay(&moves),
        Err(MoveError::WrongBoard { expected: 4, got: 0 })
    );
}

#[test]
fn test_last_board_decided_without_line_draws_game() {
    let mut game = UltimateGame::restore(one_board_from_draw()).expect("Valid snapshot");

    let report = game.apply_move(8, 2, Player::X).expect("Valid move");
    assert_eq!(report.board_outcome, Some(Outcome::Won(Player::X)));
    assert_eq!(report.game_outcome, Some(Outcome::Draw));
    assert_eq!(report.next_target, None);
    assert_eq!(game.outcome(), Outcome::Draw);
    assert_eq!(game.status(), GameStatus::Completed);
    assert_eq!(game.decided_at(), Some(8));
    assert!(game.legal_moves().is_empty());

    let before = game.clone();
    assert_eq!(game.apply_move(5, 5, Player::O), Err(MoveError::GameCompleted));
    assert_eq!(game.apply_move(8, 5, Player::O), Err(MoveError::GameCompleted));
    assert_eq!(game, before);
}
