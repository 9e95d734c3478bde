//! Console formatting and progress bars for the CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    analysis::TierStats,
    dataset::{ConfusionMatrix, EvaluationReport, SplitMetrics},
};

/// Progress bar counting simulated games
pub fn create_game_progress(total_games: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Spinner for a pass of unknown length
pub fn create_spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    Ok(pb)
}

pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Percentage with one decimal, or `n/a` for an empty split
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}%"))
}

pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

pub fn print_confusion_matrix(matrix: &ConfusionMatrix) {
    println!("  {:>20} {:>12} {:>12}", "", "expected +", "expected -");
    println!(
        "  {:>20} {:>12} {:>12}",
        "predicted +",
        format_number(matrix.true_positive),
        format_number(matrix.false_positive)
    );
    println!(
        "  {:>20} {:>12} {:>12}",
        "predicted -",
        format_number(matrix.false_negative),
        format_number(matrix.true_negative)
    );
}

fn print_split(title: &str, split: &SplitMetrics) {
    print_subsection(title);
    print_kv("Records", &format_number(split.accuracy.total));
    print_kv("Correct", &format_number(split.accuracy.correct));
    print_kv("Accuracy", &format_percent(split.accuracy_percent()));
    print_confusion_matrix(&split.confusion);
}

/// Train and test sections plus the combined matrix
pub fn print_evaluation_report(report: &EvaluationReport) {
    if let Some(reason) = &report.dataset_error {
        print_kv("Dataset error", reason);
    }
    if report.skipped_records > 0 {
        print_kv("Skipped records", &format_number(report.skipped_records));
    }
    print_split("Training split", &report.train);
    print_split("Test split", &report.test);
    print_subsection("Combined");
    print_confusion_matrix(&report.confusion_matrix());
}

pub fn print_tier_stats(stats: &TierStats) {
    println!(
        "  {:8} {:>8} {:>8} {:>8} {:>8} {:>10}",
        "Tier", "Games", "Wins", "Draws", "Losses", "Win rate"
    );
    for (tier, tier_stats) in stats.iter() {
        println!(
            "  {:8} {:>8} {:>8} {:>8} {:>8} {:>9.1}%",
            tier.name(),
            format_number(tier_stats.total_games),
            format_number(tier_stats.wins),
            format_number(tier_stats.draws),
            format_number(tier_stats.losses),
            tier_stats.win_rate()
        );
    }
}
