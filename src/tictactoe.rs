//! Tic-Tac-Toe board model, terminal evaluation and game sessions

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, CELL_COUNT, Cell, GRID_SIZE, MarkGuard, Player, Position};
pub use game::{DEFAULT_AI_PLAYER, FIRST_PLAYER, GameMode, GameOutcome, GameSession, Move};
pub use lines::{
    LineAnalyzer, LineResult, TerminalState, WIN_SCORE, WINNING_LINES, evaluate, evaluate_terminal,
    is_draw, terminal_score,
};
