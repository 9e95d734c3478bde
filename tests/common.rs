//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use tictactoe_minimax::{
    dataset::{GameRecord, Label},
    tictactoe::{Board, Player, TerminalState, evaluate_terminal},
};

/// Parse a board literal, panicking on malformed input.
pub fn board(s: &str) -> Board {
    Board::from_string(s).unwrap()
}

/// Every position reachable in a legal game (X moves first, play stops at a
/// win or a full board), paired with the side to move.
pub fn reachable_positions() -> Vec<(Board, Player)> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut stack = vec![(Board::new(), Player::X)];
    while let Some((board, to_move)) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        out.push((board, to_move));
        if evaluate_terminal(&board) != TerminalState::InProgress {
            continue;
        }
        for position in board.empty_positions() {
            let mut child = board;
            child.place(position.row, position.col, to_move).unwrap();
            stack.push((child, to_move.opponent()));
        }
    }
    out
}

/// Encode a board as one comma-separated dataset line.
pub fn dataset_line(board: &Board, label: Label) -> String {
    let cells: Vec<String> = board
        .encode()
        .chars()
        .map(|c| match c {
            'X' => "x".to_string(),
            'O' => "o".to_string(),
            _ => "b".to_string(),
        })
        .collect();
    format!("{},{label}", cells.join(","))
}

pub fn record(board_literal: &str, label: Label) -> GameRecord {
    GameRecord::new(*board(board_literal).cells(), label)
}
