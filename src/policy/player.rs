//! Computer opponent: picks moves for a difficulty tier

use rand::{Rng, SeedableRng, random, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::difficulty::{DifficultyTier, TierTable};
use crate::{
    Result,
    search::Minimax,
    tictactoe::{Board, Player, Position},
};

/// How a move was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveSource {
    /// Uniformly random empty cell
    Random,
    /// Best move found by the search, with its score
    Search { score: i32 },
}

/// A chosen move and how it was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDecision {
    pub position: Position,
    pub source: MoveSource,
}

/// AI player. Its mark is the search maximizer.
pub struct AiPlayer {
    engine: Minimax,
    tiers: TierTable,
    rng: StdRng,
}

impl AiPlayer {
    /// Create an AI playing `mark` with a random seed
    pub fn new(mark: Player, tiers: TierTable) -> Self {
        Self::with_seed(mark, tiers, random())
    }

    /// Create an AI with a deterministic seed
    pub fn with_seed(mark: Player, tiers: TierTable, seed: u64) -> Self {
        Self {
            engine: Minimax::new(mark),
            tiers,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn mark(&self) -> Player {
        self.engine.maximizer()
    }

    pub fn engine(&self) -> &Minimax {
        &self.engine
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Pick a move for `tier` without placing it.
    ///
    /// The board is searched in place and is unchanged on return.
    ///
    /// # Errors
    ///
    /// Returns `NoLegalMove` if the board is full. Callers are expected to
    /// check for a finished game first.
    pub fn decide(&mut self, board: &mut Board, tier: DifficultyTier) -> Result<MoveDecision> {
        let empty = board.empty_positions();
        if empty.is_empty() {
            return Err(crate::Error::NoLegalMove);
        }

        let policy = self.tiers.policy(tier);
        if policy.random_move_probability > 0.0
            && self.rng.random::<f64>() < policy.random_move_probability
            && let Some(&position) = empty.choose(&mut self.rng)
        {
            debug!(%tier, %position, "random move");
            return Ok(MoveDecision {
                position,
                source: MoveSource::Random,
            });
        }

        let (position, score) = self.engine.best_move(board, policy.depth_limit)?;
        debug!(%tier, %position, score, depth_limit = policy.depth_limit, "searched move");
        Ok(MoveDecision {
            position,
            source: MoveSource::Search { score },
        })
    }

    /// Search value of every legal move at `tier`'s depth limit, row-major
    pub fn score_moves(&self, board: &mut Board, tier: DifficultyTier) -> Vec<(Position, i32)> {
        self.engine
            .score_moves(board, self.tiers.policy(tier).depth_limit)
    }

    /// Pick a move for `tier`; see [`AiPlayer::decide`]
    pub fn choose_move(&mut self, board: &mut Board, tier: DifficultyTier) -> Result<Position> {
        self.decide(board, tier).map(|decision| decision.position)
    }
}

/// Choose a move for `tier` on `board`, with `mark` as the AI side.
///
/// Convenience entry point for callers that do not keep an [`AiPlayer`]
/// around; the random branch of the Easy tier draws from a fresh seed.
pub fn choose_ai_move(board: &Board, mark: Player, tier: DifficultyTier) -> Result<Position> {
    let mut scratch = *board;
    AiPlayer::new(mark, TierTable::default()).choose_move(&mut scratch, tier)
}
