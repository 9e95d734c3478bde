//! Move selection for the computer opponent

pub mod difficulty;
pub mod player;

pub use difficulty::{DifficultyTier, TierPolicy, TierTable};
pub use player::{AiPlayer, MoveDecision, MoveSource, choose_ai_move};
