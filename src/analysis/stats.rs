//! Per-tier game statistics, kept in memory for the life of the process

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    policy::DifficultyTier,
    tictactoe::{GameOutcome, Player},
};

/// Results of finished games from the AI's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub total_games: usize,
}

impl DifficultyStats {
    /// Count one finished game
    pub fn record(&mut self, outcome: GameOutcome, ai_mark: Player) {
        match outcome {
            GameOutcome::Win(winner) if winner == ai_mark => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.total_games += 1;
    }

    /// Wins as a percentage of games played, or 0 with no games
    pub fn win_rate(&self) -> f64 {
        percentage(self.wins, self.total_games)
    }

    pub fn draw_rate(&self) -> f64 {
        percentage(self.draws, self.total_games)
    }

    pub fn loss_rate(&self) -> f64 {
        percentage(self.losses, self.total_games)
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Statistics keyed by difficulty tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierStats {
    by_tier: BTreeMap<DifficultyTier, DifficultyStats>,
}

impl TierStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tier: DifficultyTier, outcome: GameOutcome, ai_mark: Player) {
        self.by_tier.entry(tier).or_default().record(outcome, ai_mark);
    }

    /// Counters for `tier`; all zero if it has not been played
    pub fn get(&self, tier: DifficultyTier) -> DifficultyStats {
        self.by_tier.get(&tier).copied().unwrap_or_default()
    }

    /// Every tier in Easy, Medium, Hard order, including unplayed ones
    pub fn iter(&self) -> impl Iterator<Item = (DifficultyTier, DifficultyStats)> + '_ {
        DifficultyTier::ALL
            .into_iter()
            .map(|tier| (tier, self.get(tier)))
    }

    pub fn total_games(&self) -> usize {
        self.by_tier.values().map(|stats| stats.total_games).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_ai_perspective() {
        let mut stats = DifficultyStats::default();
        stats.record(GameOutcome::Win(Player::O), Player::O);
        stats.record(GameOutcome::Win(Player::X), Player::O);
        stats.record(GameOutcome::Draw, Player::O);
        stats.record(GameOutcome::Draw, Player::O);

        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.draws, 2);
        assert_eq!(stats.total_games, 4);
        assert!((stats.win_rate() - 25.0).abs() < 1e-9);
        assert!((stats.draw_rate() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats_rate_is_zero() {
        assert_eq!(DifficultyStats::default().win_rate(), 0.0);
    }

    #[test]
    fn test_tier_stats_are_independent() {
        let mut stats = TierStats::new();
        stats.record(DifficultyTier::Hard, GameOutcome::Draw, Player::O);
        stats.record(DifficultyTier::Easy, GameOutcome::Win(Player::X), Player::O);

        assert_eq!(stats.get(DifficultyTier::Hard).draws, 1);
        assert_eq!(stats.get(DifficultyTier::Easy).losses, 1);
        assert_eq!(stats.get(DifficultyTier::Medium), DifficultyStats::default());
        assert_eq!(stats.total_games(), 2);
        assert_eq!(stats.iter().count(), 3);
    }
}
