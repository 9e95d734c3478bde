//! Engine configuration.
//!
//! Every section has a default, so a JSON file only needs the sections it
//! changes. A tier entry must give both of its fields:
//!
//! ```json
//! { "tiers": { "easy": { "depth_limit": 2, "random_move_probability": 0.25 } }, "seed": 7 }
//! ```

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    dataset::{BaselineConfig, EvaluationConfig},
    policy::{AiPlayer, DifficultyTier, TierTable},
    tictactoe::{DEFAULT_AI_PLAYER, GameMode, Player},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search horizon and random-move probability per difficulty tier
    pub tiers: TierTable,
    pub evaluation: EvaluationConfig,
    pub baseline: BaselineConfig,
    /// Mark played by the AI in live games
    pub ai_player: Player,
    /// Seed for the AI's random choices; random when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tiers: TierTable::default(),
            evaluation: EvaluationConfig::default(),
            baseline: BaselineConfig::default(),
            ai_player: DEFAULT_AI_PLAYER,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Read a JSON configuration file and validate it
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| crate::Error::Io {
            operation: format!("open config file '{}'", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.tiers.validate()?;
        self.evaluation.validate()?;
        self.baseline.validate()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Single-player mode at `tier` with the AI on the configured side
    pub fn game_mode(&self, tier: DifficultyTier) -> GameMode {
        GameMode::SinglePlayer {
            tier,
            ai: self.ai_player,
        }
    }

    /// AI for live play using this configuration's tiers, mark and seed
    pub fn ai(&self) -> AiPlayer {
        match self.seed {
            Some(seed) => AiPlayer::with_seed(self.ai_player, self.tiers, seed),
            None => AiPlayer::new(self.ai_player, self.tiers),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "tiers": {{ "easy": {{ "depth_limit": 2, "random_move_probability": 0.25 }} }}, "seed": 7 }}"#
        )
        .unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        let easy = config.tiers.policy(DifficultyTier::Easy);
        assert_eq!(easy.depth_limit, 2);
        assert_eq!(easy.random_move_probability, 0.25);
        assert_eq!(config.tiers.policy(DifficultyTier::Hard).depth_limit, 9);
        assert_eq!(config.evaluation.train_size, 800);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_invalid_probability_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "tiers": {{ "easy": {{ "depth_limit": 3, "random_move_probability": 1.5 }} }} }}"#
        )
        .unwrap();

        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(crate::Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            EngineConfig::load("/no/such/engine.json"),
            Err(crate::Error::Io { .. })
        ));
    }

    #[test]
    fn test_seeded_ai_uses_configured_mark() {
        let config = EngineConfig::default().with_seed(11);
        assert_eq!(config.ai().mark(), Player::O);
    }
}
