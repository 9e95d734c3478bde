//! Depth-limited minimax over the 3x3 board.
//!
//! The search mutates the board in place and backtracks through
//! [`Board::scoped_mark`], so every call leaves the board exactly as it found
//! it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tictactoe::{Board, Player, Position, WIN_SCORE, terminal_score};

/// Depth limit that covers the whole game tree
pub const FULL_DEPTH: u32 = 9;

/// Accumulator seed for the maximizing/minimizing loops. Lies outside every
/// reachable score so it can never survive as a result.
const SEARCH_BOUND: i32 = 1000;

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, including the root
    pub nodes: u64,
    /// Positions cut off by the depth limit
    pub horizon_cutoffs: u64,
}

/// Minimax search engine.
///
/// Scores are from the maximizer's point of view: a maximizer win found at
/// depth `d` is worth `10 - d`, a minimizer win `-10 + d`, and anything else
/// (a draw, or a position beyond the depth limit) is worth `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minimax {
    maximizer: Player,
}

impl Minimax {
    /// Create an engine that maximizes for `maximizer`
    pub fn new(maximizer: Player) -> Self {
        Self { maximizer }
    }

    pub fn maximizer(&self) -> Player {
        self.maximizer
    }

    pub fn minimizer(&self) -> Player {
        self.maximizer.opponent()
    }

    fn mark_for(&self, maximizing: bool) -> Player {
        if maximizing {
            self.maximizer
        } else {
            self.minimizer()
        }
    }

    /// Value of `board` under optimal play within `depth_limit` plies.
    ///
    /// `depth` is the number of plies already searched; a call with
    /// `depth >= depth_limit` returns `0` without looking at the board. This
    /// horizon is an approximation used to weaken lower difficulty tiers and
    /// can hide wins and losses beyond it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_minimax::{search::{FULL_DEPTH, Minimax}, tictactoe::{Board, Player}};
    ///
    /// let engine = Minimax::new(Player::O);
    /// let mut board = Board::new();
    /// assert_eq!(engine.minimax(&mut board, true, 0, FULL_DEPTH), 0);
    /// ```
    pub fn minimax(&self, board: &mut Board, maximizing: bool, depth: u32, depth_limit: u32) -> i32 {
        let mut stats = SearchStats::default();
        self.search(board, maximizing, depth, depth_limit, &mut stats)
    }

    /// [`Minimax::minimax`] that also reports how much of the tree it visited
    pub fn minimax_with_stats(
        &self,
        board: &mut Board,
        maximizing: bool,
        depth: u32,
        depth_limit: u32,
    ) -> (i32, SearchStats) {
        let mut stats = SearchStats::default();
        let value = self.search(board, maximizing, depth, depth_limit, &mut stats);
        (value, stats)
    }

    /// Static evaluation shared by both search variants. Returns `Some(value)`
    /// when the position is a leaf.
    fn leaf_value(
        &self,
        board: &Board,
        depth: u32,
        depth_limit: u32,
        stats: &mut SearchStats,
    ) -> Option<i32> {
        stats.nodes += 1;
        if depth >= depth_limit {
            stats.horizon_cutoffs += 1;
            return Some(0);
        }

        let depth = depth as i32;
        match terminal_score(board, self.maximizer) {
            WIN_SCORE => Some(WIN_SCORE - depth),
            score if score == -WIN_SCORE => Some(score + depth),
            _ if board.is_full() => Some(0),
            _ => None,
        }
    }

    fn search(
        &self,
        board: &mut Board,
        maximizing: bool,
        depth: u32,
        depth_limit: u32,
        stats: &mut SearchStats,
    ) -> i32 {
        if let Some(value) = self.leaf_value(board, depth, depth_limit, stats) {
            return value;
        }

        let mark = self.mark_for(maximizing);
        let mut best = if maximizing {
            -SEARCH_BOUND
        } else {
            SEARCH_BOUND
        };

        for position in board.empty_positions() {
            let Ok(mut child) = board.scoped_mark(position, mark) else {
                continue;
            };
            let value = self.search(&mut child, !maximizing, depth + 1, depth_limit, stats);
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }

        best
    }

    /// Alpha-beta pruned search. Returns the same value as
    /// [`Minimax::minimax`] for every position while visiting fewer nodes.
    pub fn minimax_pruned(
        &self,
        board: &mut Board,
        maximizing: bool,
        depth: u32,
        depth_limit: u32,
    ) -> i32 {
        self.minimax_pruned_with_stats(board, maximizing, depth, depth_limit)
            .0
    }

    /// [`Minimax::minimax_pruned`] with node counters
    pub fn minimax_pruned_with_stats(
        &self,
        board: &mut Board,
        maximizing: bool,
        depth: u32,
        depth_limit: u32,
    ) -> (i32, SearchStats) {
        let mut stats = SearchStats::default();
        let value = self.alpha_beta(
            board,
            maximizing,
            depth,
            depth_limit,
            -SEARCH_BOUND,
            SEARCH_BOUND,
            &mut stats,
        );
        (value, stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &self,
        board: &mut Board,
        maximizing: bool,
        depth: u32,
        depth_limit: u32,
        mut alpha: i32,
        mut beta: i32,
        stats: &mut SearchStats,
    ) -> i32 {
        if let Some(value) = self.leaf_value(board, depth, depth_limit, stats) {
            return value;
        }

        let mark = self.mark_for(maximizing);
        if maximizing {
            let mut max_eval = -SEARCH_BOUND;
            for position in board.empty_positions() {
                let Ok(mut child) = board.scoped_mark(position, mark) else {
                    continue;
                };
                let eval =
                    self.alpha_beta(&mut child, false, depth + 1, depth_limit, alpha, beta, stats);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = SEARCH_BOUND;
            for position in board.empty_positions() {
                let Ok(mut child) = board.scoped_mark(position, mark) else {
                    continue;
                };
                let eval =
                    self.alpha_beta(&mut child, true, depth + 1, depth_limit, alpha, beta, stats);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }

    /// Score every legal maximizer move in row-major order.
    ///
    /// Each entry is `minimax(board + maximizer mark at position, false, 0,
    /// depth_limit)`.
    pub fn score_moves(&self, board: &mut Board, depth_limit: u32) -> Vec<(Position, i32)> {
        let mut scored = Vec::new();
        for position in board.empty_positions() {
            let Ok(mut child) = board.scoped_mark(position, self.maximizer) else {
                continue;
            };
            let value = self.minimax(&mut child, false, 0, depth_limit);
            scored.push((position, value));
        }
        scored
    }

    /// Highest-scoring maximizer move. Ties go to the first move in
    /// row-major order.
    ///
    /// # Errors
    ///
    /// Returns `NoLegalMove` if the board has no empty cell.
    pub fn best_move(&self, board: &mut Board, depth_limit: u32) -> crate::Result<(Position, i32)> {
        let mut best: Option<(Position, i32)> = None;
        for (position, value) in self.score_moves(board, depth_limit) {
            trace!(%position, value, depth_limit, "scored move");
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((position, value));
            }
        }
        best.ok_or(crate::Error::NoLegalMove)
    }
}

impl Default for Minimax {
    /// The AI plays O and maximizes
    fn default() -> Self {
        Self::new(Player::O)
    }
}
