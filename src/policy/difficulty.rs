//! Difficulty tiers and the search parameters bound to them

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::search::FULL_DEPTH;

/// Named difficulty configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [
        DifficultyTier::Easy,
        DifficultyTier::Medium,
        DifficultyTier::Hard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DifficultyTier {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(DifficultyTier::Easy),
            "medium" => Ok(DifficultyTier::Medium),
            "hard" => Ok(DifficultyTier::Hard),
            _ => Err(crate::Error::ParseTier {
                input: s.to_string(),
                expected: "easy, medium, hard".to_string(),
            }),
        }
    }
}

/// Search parameters for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    /// Plies searched after the candidate move
    pub depth_limit: u32,

    /// Chance of playing a uniformly random empty cell instead of searching
    pub random_move_probability: f64,
}

impl TierPolicy {
    pub fn new(depth_limit: u32, random_move_probability: f64) -> Self {
        Self {
            depth_limit,
            random_move_probability,
        }
    }

    /// # Errors
    ///
    /// `InvalidConfiguration` if the depth limit exceeds the game length or
    /// the probability is outside `[0, 1]`.
    pub fn validate(&self, tier: DifficultyTier) -> crate::Result<()> {
        if self.depth_limit > FULL_DEPTH {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "{tier} depth limit {} exceeds the maximum of {FULL_DEPTH}",
                    self.depth_limit
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.random_move_probability) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "{tier} random move probability {} must be within [0, 1]",
                    self.random_move_probability
                ),
            });
        }
        Ok(())
    }
}

/// Tier-to-policy mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub easy: TierPolicy,
    pub medium: TierPolicy,
    pub hard: TierPolicy,
}

impl TierTable {
    pub fn policy(&self, tier: DifficultyTier) -> TierPolicy {
        match tier {
            DifficultyTier::Easy => self.easy,
            DifficultyTier::Medium => self.medium,
            DifficultyTier::Hard => self.hard,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        for tier in DifficultyTier::ALL {
            self.policy(tier).validate(tier)?;
        }
        Ok(())
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            easy: TierPolicy::new(3, 0.4),
            medium: TierPolicy::new(3, 0.0),
            hard: TierPolicy::new(FULL_DEPTH, 0.0),
        }
    }
}
