//! Simulate command - play the AI against a scripted opponent and tally results

use std::{path::PathBuf, str::FromStr};

use anyhow::{Result, anyhow};
use clap::Parser;
use rand::random;

use super::load_config;
use crate::{
    cli::output::{create_game_progress, format_number, print_kv, print_section, print_tier_stats},
    policy::{AiPlayer, DifficultyTier, TierPolicy, TierTable},
    tictactoe::{GameSession, Player},
};

/// Side playing against the AI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Tier(DifficultyTier),
    Random,
}

impl FromStr for Opponent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("random") {
            return Ok(Opponent::Random);
        }
        s.parse::<DifficultyTier>()
            .map(Opponent::Tier)
            .map_err(|_| anyhow!("Unknown opponent '{s}'. Supported: easy, medium, hard, random"))
    }
}

impl Opponent {
    fn name(&self) -> &'static str {
        match self {
            Opponent::Tier(tier) => tier.name(),
            Opponent::Random => "random",
        }
    }

    /// Player for `mark` and the tier it is asked to play at
    fn build(&self, mark: Player, tiers: TierTable, seed: u64) -> (AiPlayer, DifficultyTier) {
        match *self {
            Opponent::Tier(tier) => (AiPlayer::with_seed(mark, tiers, seed), tier),
            Opponent::Random => {
                let always_random = TierTable {
                    easy: TierPolicy::new(0, 1.0),
                    ..tiers
                };
                (
                    AiPlayer::with_seed(mark, always_random, seed),
                    DifficultyTier::Easy,
                )
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play the AI against a scripted opponent")]
pub struct SimulateArgs {
    /// Difficulty tier of the AI
    #[arg(long, short = 't', default_value = "hard")]
    pub tier: DifficultyTier,

    /// Opponent on the human side: easy, medium, hard or random
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: Opponent,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.or(config.seed).unwrap_or_else(random);

    let mut ai = AiPlayer::with_seed(config.ai_player, config.tiers, seed);
    let (mut opponent, opponent_tier) =
        args.opponent.build(config.ai_player.opponent(), config.tiers, seed.wrapping_add(1));

    print_section("Simulation");
    print_kv("AI", &format!("{} ({})", ai.mark(), args.tier));
    print_kv("Opponent", &format!("{} ({})", opponent.mark(), args.opponent.name()));
    print_kv("Games", &format_number(args.games));
    print_kv("Seed", &seed.to_string());

    let mut session = GameSession::new(config.game_mode(args.tier));
    let pb = create_game_progress(args.games as u64)?;
    for _ in 0..args.games {
        session.restart();
        while session.outcome().is_none() {
            if session.is_ai_turn() {
                session.ai_move(&mut ai)?;
            } else {
                session.play_ai(&mut opponent, opponent_tier)?;
            }
        }
        let stats = session.stats().get(args.tier);
        pb.set_message(format!("{:.1}% AI wins", stats.win_rate()));
        pb.inc(1);
    }
    pb.finish_and_clear();

    print_section("Results by Tier");
    print_tier_stats(session.stats());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_opponent() {
        assert_eq!("random".parse::<Opponent>().unwrap(), Opponent::Random);
        assert_eq!(
            "Medium".parse::<Opponent>().unwrap(),
            Opponent::Tier(DifficultyTier::Medium)
        );
        assert!("perfect".parse::<Opponent>().is_err());
    }
}
