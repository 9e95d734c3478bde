//! Adversarial search over board positions

pub mod minimax;

pub use minimax::{FULL_DEPTH, Minimax, SearchStats};
