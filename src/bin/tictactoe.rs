//! Tic-tac-toe engine CLI
//!
//! - Evaluating the search against a labeled endgame dataset
//! - Simulating AI-vs-AI games by difficulty tier
//! - Analyzing the move scores of a single position

use anyhow::Result;
use clap::{Parser, Subcommand};
use tictactoe_minimax::cli::commands;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Minimax tic-tac-toe engine and dataset evaluator", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the search engine against a labeled dataset
    Evaluate(commands::evaluate::EvaluateArgs),

    /// Play the AI against a scripted opponent
    Simulate(commands::simulate::SimulateArgs),

    /// Score every move in a position
    Analyze(commands::analyze::AnalyzeArgs),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Evaluate(args) => commands::evaluate::execute(args),
        Commands::Simulate(args) => commands::simulate::execute(args),
        Commands::Analyze(args) => commands::analyze::execute(args),
    }
}
