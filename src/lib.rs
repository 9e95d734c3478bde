//! Tic-tac-toe decision engine
//!
//! This crate provides:
//! - Board model with scoped, self-restoring search mutations
//! - Terminal evaluation over the eight winning lines
//! - Depth-limited minimax search, with an alpha-beta variant
//! - Difficulty tiers (easy, medium, hard) and an AI player
//! - Game sessions with per-tier statistics
//! - Dataset evaluation of the search against labeled endgames, plus a
//!   linear baseline classifier

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod policy;
pub mod search;
pub mod tictactoe;

pub use analysis::{DifficultyStats, TierStats};
pub use config::EngineConfig;
pub use dataset::{EvaluationReport, GameRecord, Label, run_dataset_evaluation};
pub use error::{Error, Result};
pub use policy::{AiPlayer, DifficultyTier, choose_ai_move};
pub use search::Minimax;
pub use tictactoe::{Board, Cell, GameSession, Player, Position, TerminalState, evaluate_terminal};
