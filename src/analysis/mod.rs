//! Bookkeeping over finished games

pub mod stats;

pub use stats::{DifficultyStats, TierStats};
