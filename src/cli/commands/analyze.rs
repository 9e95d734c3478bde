//! Analyze command - score every move in a single position

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::load_config;
use crate::{
    cli::output::{format_number, print_kv, print_section, print_subsection},
    policy::{DifficultyTier, MoveSource},
    search::FULL_DEPTH,
    tictactoe::{Board, TerminalState, evaluate_terminal},
};

#[derive(Parser, Debug)]
#[command(about = "Show how the AI values each move in a position")]
pub struct AnalyzeArgs {
    /// Board as 9 cells in row-major order, e.g. `XX.OO....`
    pub board: String,

    /// Difficulty tier whose depth limit is used
    #[arg(long, short = 't', default_value = "hard")]
    pub tier: DifficultyTier,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut board = Board::from_string(&args.board)?;
    let mut ai = config.ai();

    print_section("Position");
    println!("{board}");
    let state = evaluate_terminal(&board);
    print_kv(
        "State",
        &match state {
            TerminalState::InProgress => "in progress".to_string(),
            TerminalState::Won(player) => format!("won by {player}"),
            TerminalState::Drawn => "drawn".to_string(),
        },
    );
    if state.is_over() {
        return Ok(());
    }

    let policy = config.tiers.policy(args.tier);
    print_kv("AI plays", &ai.mark().to_string());
    print_kv("Tier", args.tier.name());
    print_kv("Depth limit", &policy.depth_limit.to_string());

    print_subsection("Move scores");
    for (position, score) in ai.score_moves(&mut board, args.tier) {
        println!("  {:8} {score:>4}", position.to_string());
    }

    let decision = ai.decide(&mut board, args.tier)?;
    print_subsection("Choice");
    match decision.source {
        MoveSource::Search { score } => {
            print_kv("Move", &format!("{} (score {score})", decision.position));
        }
        MoveSource::Random => {
            print_kv("Move", &format!("{} (random)", decision.position));
        }
    }

    // Full-depth value with the AI to move
    let engine = *ai.engine();
    let (plain, plain_stats) = engine.minimax_with_stats(&mut board, true, 0, FULL_DEPTH);
    let (_, pruned_stats) = engine.minimax_pruned_with_stats(&mut board, true, 0, FULL_DEPTH);
    print_subsection("Full-depth search");
    print_kv("Value", &plain.to_string());
    print_kv("Minimax nodes", &format_number(plain_stats.nodes as usize));
    print_kv("Alpha-beta nodes", &format_number(pruned_stats.nodes as usize));
    Ok(())
}
