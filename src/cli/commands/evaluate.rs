//! Evaluate command - classify a labeled dataset with the search engine

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;

use super::load_config;
use crate::{
    cli::output::{
        create_spinner, format_number, format_percent, print_evaluation_report, print_kv,
        print_section,
    },
    dataset::{
        DatasetEvaluator, EvaluationConfig, EvaluationReport, LinearBaseline, fit_and_evaluate,
        load_records,
    },
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate the search engine against a labeled endgame dataset")]
pub struct EvaluateArgs {
    /// Comma-separated dataset file (9 cells and a positive/negative label per line)
    pub dataset: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Search horizon used to classify each record
    #[arg(long)]
    pub depth_limit: Option<u32>,

    /// Number of leading records in the training split
    #[arg(long)]
    pub train_size: Option<usize>,

    /// Mark the search scores for (`x` or `o`)
    #[arg(long)]
    pub maximizer: Option<Player>,

    /// Also fit and score the linear baseline
    #[arg(long)]
    pub baseline: bool,

    /// Export the report(s) as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Serialize)]
struct EvaluationExport<'a> {
    dataset: String,
    settings: &'a EvaluationConfig,
    search: &'a EvaluationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    baseline: Option<BaselineSection<'a>>,
}

#[derive(Serialize)]
struct BaselineSection<'a> {
    epochs: usize,
    learning_rate: f64,
    model: &'a LinearBaseline,
    report: &'a EvaluationReport,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let engine_config = load_config(args.config.as_deref())?;
    let mut config = engine_config.evaluation;
    if let Some(depth_limit) = args.depth_limit {
        config = config.with_depth_limit(depth_limit);
    }
    if let Some(train_size) = args.train_size {
        config = config.with_train_size(train_size);
    }
    if let Some(maximizer) = args.maximizer {
        config = config.with_maximizer(maximizer);
    }
    config.validate()?;

    print_section("Dataset Evaluation");
    print_kv("Dataset", &args.dataset.display().to_string());
    print_kv("Maximizer", &config.maximizer.to_string());
    print_kv("Depth limit", &config.depth_limit.to_string());
    print_kv("Train size", &format_number(config.train_size));

    // An unreadable dataset still produces a (zero) report
    let (records, report) = match load_records(&args.dataset) {
        Ok(dataset) => {
            let spinner = create_spinner("Classifying records...")?;
            let mut report = DatasetEvaluator::new(config).evaluate(&dataset.records);
            spinner.finish_and_clear();
            report.skipped_records = dataset.skipped;
            (dataset.records, report)
        }
        Err(err) => (Vec::new(), EvaluationReport::unreadable(err.to_string())),
    };

    print_section("Search Results");
    print_evaluation_report(&report);

    let baseline = if args.baseline && !records.is_empty() {
        let baseline_config = engine_config.baseline;
        let (model, baseline_report) =
            fit_and_evaluate(&records, config.train_size, &baseline_config);

        print_section("Linear Baseline");
        print_kv("Epochs", &format_number(baseline_config.epochs));
        print_kv("Learning rate", &baseline_config.learning_rate.to_string());
        print_kv("Train accuracy", &format_percent(baseline_report.train_accuracy()));
        print_kv("Test accuracy", &format_percent(baseline_report.test_accuracy()));
        Some((baseline_config, model, baseline_report))
    } else {
        None
    };

    if let Some(path) = &args.export {
        let export = EvaluationExport {
            dataset: args.dataset.display().to_string(),
            settings: &config,
            search: &report,
            baseline: baseline
                .as_ref()
                .map(|(settings, model, report)| BaselineSection {
                    epochs: settings.epochs,
                    learning_rate: settings.learning_rate,
                    model,
                    report,
                }),
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &export)?;
        println!("\nReport exported to: {}", path.display());
    }

    if let Some(reason) = report.dataset_error {
        return Err(anyhow!("dataset could not be evaluated: {reason}"));
    }
    Ok(())
}
