//! Replays labeled positions through the search and scores the predictions

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{loader::load_records, record::GameRecord};
use crate::{
    search::{FULL_DEPTH, Minimax},
    tictactoe::Player,
};

/// Records before this ordinal are training records
pub const DEFAULT_TRAIN_SIZE: usize = 800;

/// Search horizon used when classifying records
pub const DEFAULT_EVALUATION_DEPTH: u32 = 3;

/// Settings for one evaluation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub train_size: usize,
    pub depth_limit: u32,
    /// Mark the search scores for; a `positive` label means a win for it
    pub maximizer: Player,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            train_size: DEFAULT_TRAIN_SIZE,
            depth_limit: DEFAULT_EVALUATION_DEPTH,
            maximizer: Player::O,
        }
    }
}

impl EvaluationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_train_size(mut self, train_size: usize) -> Self {
        self.train_size = train_size;
        self
    }

    pub fn with_depth_limit(mut self, depth_limit: u32) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_maximizer(mut self, maximizer: Player) -> Self {
        self.maximizer = maximizer;
        self
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.depth_limit > FULL_DEPTH {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "evaluation depth limit {} exceeds {FULL_DEPTH}",
                    self.depth_limit
                ),
            });
        }
        Ok(())
    }
}

/// Prediction counters for one split
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, predicted_positive: bool, expected_positive: bool) {
        match (predicted_positive, expected_positive) {
            (true, true) => self.true_positive += 1,
            (false, false) => self.true_negative += 1,
            (true, false) => self.false_positive += 1,
            (false, true) => self.false_negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.true_negative + self.false_positive + self.false_negative
    }

    pub fn correct(&self) -> usize {
        self.true_positive + self.true_negative
    }

    /// Cell-wise sum of two matrices
    pub fn merged(&self, other: &ConfusionMatrix) -> ConfusionMatrix {
        ConfusionMatrix {
            true_positive: self.true_positive + other.true_positive,
            true_negative: self.true_negative + other.true_negative,
            false_positive: self.false_positive + other.false_positive,
            false_negative: self.false_negative + other.false_negative,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracyResult {
    pub correct: usize,
    pub total: usize,
}

impl AccuracyResult {
    /// Percentage of correct predictions, `None` for an empty split
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64 * 100.0)
        }
    }
}

/// Accuracy and confusion counts for one split
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMetrics {
    pub accuracy: AccuracyResult,
    pub confusion: ConfusionMatrix,
}

impl SplitMetrics {
    pub fn record(&mut self, predicted_positive: bool, expected_positive: bool) {
        self.confusion.record(predicted_positive, expected_positive);
        self.accuracy.total += 1;
        if predicted_positive == expected_positive {
            self.accuracy.correct += 1;
        }
    }

    pub fn accuracy_percent(&self) -> Option<f64> {
        self.accuracy.percentage()
    }
}

/// Result of one evaluation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub train: SplitMetrics,
    pub test: SplitMetrics,
    /// Malformed lines dropped while loading
    pub skipped_records: usize,
    /// Set when the data source could not be read; all counters are then zero
    pub dataset_error: Option<String>,
}

impl EvaluationReport {
    /// Report for a data source that could not be read
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self {
            dataset_error: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn train_accuracy(&self) -> Option<f64> {
        self.train.accuracy_percent()
    }

    pub fn test_accuracy(&self) -> Option<f64> {
        self.test.accuracy_percent()
    }

    /// Combined counts over both splits
    pub fn confusion_matrix(&self) -> ConfusionMatrix {
        self.train.confusion.merged(&self.test.confusion)
    }

    pub fn total_records(&self) -> usize {
        self.train.accuracy.total + self.test.accuracy.total
    }
}

/// Classifies records with a bounded search from the configured maximizer's side
#[derive(Debug, Clone)]
pub struct DatasetEvaluator {
    config: EvaluationConfig,
    engine: Minimax,
}

impl DatasetEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self {
            engine: Minimax::new(config.maximizer),
            config,
        }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// True if the search scores the record's position above zero
    pub fn predict(&self, record: &GameRecord) -> bool {
        let mut board = record.board();
        self.engine
            .minimax(&mut board, true, 0, self.config.depth_limit)
            > 0
    }

    /// Score `records` in order; the first `train_size` go to the training split.
    pub fn evaluate(&self, records: &[GameRecord]) -> EvaluationReport {
        let mut report = EvaluationReport::default();
        for (ordinal, record) in records.iter().enumerate() {
            let predicted = self.predict(record);
            let expected = record.label().is_positive();
            let split = if ordinal < self.config.train_size {
                &mut report.train
            } else {
                &mut report.test
            };
            split.record(predicted, expected);
        }

        info!(
            records = records.len(),
            train_correct = report.train.accuracy.correct,
            test_correct = report.test.accuracy.correct,
            depth_limit = self.config.depth_limit,
            "evaluation pass complete"
        );
        report
    }
}

impl Default for DatasetEvaluator {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}

/// Evaluate `records` with the default settings
pub fn run_dataset_evaluation(records: &[GameRecord]) -> EvaluationReport {
    DatasetEvaluator::default().evaluate(records)
}

/// Load and evaluate a dataset file.
///
/// Never fails: an unreadable file yields a zero-record report with
/// `dataset_error` set.
pub fn evaluate_dataset_file(path: impl AsRef<Path>, config: EvaluationConfig) -> EvaluationReport {
    match load_records(path) {
        Ok(dataset) => {
            let mut report = DatasetEvaluator::new(config).evaluate(&dataset.records);
            report.skipped_records = dataset.skipped;
            report
        }
        Err(err) => {
            warn!(error = %err, "dataset unavailable");
            EvaluationReport::unreadable(err.to_string())
        }
    }
}
