//! Winning line analysis and terminal-state evaluation

use serde::{Deserialize, Serialize};

use super::{Board, Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Score of a position the maximizer has won. Depth adjustments stay well
/// inside this magnitude, so a faster win always outranks a slower one.
pub const WIN_SCORE: i32 = 10;

/// Result of scanning the eight lines of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineResult {
    NoWinner,
    Winner(Player),
}

/// Whether a game is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalState {
    InProgress,
    Won(Player),
    Drawn,
}

impl TerminalState {
    pub fn is_over(self) -> bool {
        self != TerminalState::InProgress
    }
}

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// The owner of the first completed line, scanning rows, then columns,
    /// then diagonals.
    pub fn winner(cells: &[Cell; 9]) -> Option<Player> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            if cells[a] == cells[b] && cells[a] == cells[c] {
                cells[a].to_player()
            } else {
                None
            }
        })
    }
}

/// Check all eight lines for three equal marks
pub fn evaluate(board: &Board) -> LineResult {
    match LineAnalyzer::winner(board.cells()) {
        Some(player) => LineResult::Winner(player),
        None => LineResult::NoWinner,
    }
}

/// A full board with no completed line
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && evaluate(board) == LineResult::NoWinner
}

/// Classify a board as in progress, won or drawn
pub fn evaluate_terminal(board: &Board) -> TerminalState {
    match evaluate(board) {
        LineResult::Winner(player) => TerminalState::Won(player),
        LineResult::NoWinner if board.is_full() => TerminalState::Drawn,
        LineResult::NoWinner => TerminalState::InProgress,
    }
}

/// Static score from the maximizer's point of view: `+10`, `-10` or `0`
pub fn terminal_score(board: &Board, maximizer: Player) -> i32 {
    match evaluate(board) {
        LineResult::Winner(player) if player == maximizer => WIN_SCORE,
        LineResult::Winner(_) => -WIN_SCORE,
        LineResult::NoWinner => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_line(line: [usize; 3], cell: Cell) -> Board {
        let mut cells = [Cell::Empty; 9];
        for idx in line {
            cells[idx] = cell;
        }
        Board::from_cells(cells)
    }

    #[test]
    fn test_has_won_horizontal() {
        let board = board_with_line([0, 1, 2], Cell::X);
        assert!(LineAnalyzer::has_won(board.cells(), Player::X));
        assert!(!LineAnalyzer::has_won(board.cells(), Player::O));
    }

    #[test]
    fn test_every_line_detected_for_both_marks() {
        for line in WINNING_LINES {
            for player in [Player::X, Player::O] {
                let board = board_with_line(line, player.to_cell());
                assert_eq!(
                    evaluate(&board),
                    LineResult::Winner(player),
                    "line {line:?} for {player:?}"
                );
                assert_eq!(evaluate_terminal(&board), TerminalState::Won(player));
            }
        }
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(evaluate(&Board::new()), LineResult::NoWinner);
        assert_eq!(evaluate_terminal(&Board::new()), TerminalState::InProgress);
    }

    #[test]
    fn test_two_in_a_row_is_not_a_win() {
        let board = Board::from_string("XX.OO....").unwrap();
        assert_eq!(evaluate(&board), LineResult::NoWinner);
    }

    #[test]
    fn test_draw_detection() {
        // X O X
        // X O O
        // O X X
        let board = Board::from_string("XOXXOOOXX").unwrap();
        assert!(is_draw(&board));
        assert_eq!(evaluate_terminal(&board), TerminalState::Drawn);
    }

    #[test]
    fn test_not_draw_with_empty_cell() {
        let board = Board::from_string("XOXXOOOX.").unwrap();
        assert!(!is_draw(&board));

        // A completed line with empty cells elsewhere is never a draw either
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_full_board_with_winner_is_not_draw() {
        let board = Board::from_string("XXXOOXXOO").unwrap();
        assert!(!is_draw(&board));
        assert_eq!(evaluate_terminal(&board), TerminalState::Won(Player::X));
    }

    #[test]
    fn test_terminal_score() {
        let board = board_with_line([2, 4, 6], Cell::O);
        assert_eq!(terminal_score(&board, Player::O), WIN_SCORE);
        assert_eq!(terminal_score(&board, Player::X), -WIN_SCORE);
        assert_eq!(terminal_score(&Board::new(), Player::O), 0);
    }
}
