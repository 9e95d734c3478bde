//! Linear classifier over raw cell values, used as a reference point for the
//! search-based evaluator.
//!
//! Cells map to `x = 1`, `o = -1`, empty `= 0`. The model output is
//! `bias + w · features` thresholded at 0.5, and training nudges the weights
//! by `learning_rate * (label - prediction) * feature` for every record on
//! every epoch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    evaluator::{EvaluationReport, SplitMetrics},
    record::GameRecord,
};
use crate::tictactoe::{CELL_COUNT, Cell};

pub const DEFAULT_EPOCHS: usize = 1000;
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Decision threshold on the raw model output
pub const THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

impl BaselineConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "baseline learning rate must be positive, got {}",
                    self.learning_rate
                ),
            });
        }
        Ok(())
    }
}

fn feature_vector(record: &GameRecord) -> [f64; CELL_COUNT] {
    record.features().map(|cell| match cell {
        Cell::X => 1.0,
        Cell::O => -1.0,
        Cell::Empty => 0.0,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearBaseline {
    weights: [f64; CELL_COUNT],
    bias: f64,
}

impl Default for LinearBaseline {
    fn default() -> Self {
        Self {
            weights: [0.0; CELL_COUNT],
            bias: 0.0,
        }
    }
}

impl LinearBaseline {
    /// Fit from zero weights over `records`
    pub fn train(records: &[GameRecord], epochs: usize, learning_rate: f64) -> Self {
        let mut model = Self::default();
        for _ in 0..epochs {
            for record in records {
                let features = feature_vector(record);
                let target = if record.label().is_positive() { 1.0 } else { 0.0 };
                let prediction = if model.output(&features) > THRESHOLD { 1.0 } else { 0.0 };
                let step = learning_rate * (target - prediction);
                if step == 0.0 {
                    continue;
                }
                for (weight, feature) in model.weights.iter_mut().zip(features) {
                    *weight += step * feature;
                }
                model.bias += step;
            }
        }
        debug!(epochs, records = records.len(), bias = model.bias, "baseline trained");
        model
    }

    pub fn weights(&self) -> &[f64; CELL_COUNT] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    fn output(&self, features: &[f64; CELL_COUNT]) -> f64 {
        self.bias
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }

    /// Raw model output before thresholding
    pub fn score(&self, record: &GameRecord) -> f64 {
        self.output(&feature_vector(record))
    }

    pub fn predict(&self, record: &GameRecord) -> bool {
        self.score(record) > THRESHOLD
    }

    /// Score `records` with the same positional split as the search evaluator
    pub fn evaluate(&self, records: &[GameRecord], train_size: usize) -> EvaluationReport {
        let mut train = SplitMetrics::default();
        let mut test = SplitMetrics::default();
        for (ordinal, record) in records.iter().enumerate() {
            let split = if ordinal < train_size { &mut train } else { &mut test };
            split.record(self.predict(record), record.label().is_positive());
        }
        EvaluationReport {
            train,
            test,
            ..EvaluationReport::default()
        }
    }
}

/// Train on the first `train_size` records, then score every record
pub fn fit_and_evaluate(
    records: &[GameRecord],
    train_size: usize,
    config: &BaselineConfig,
) -> (LinearBaseline, EvaluationReport) {
    let training = &records[..train_size.min(records.len())];
    let model = LinearBaseline::train(training, config.epochs, config.learning_rate);
    let report = model.evaluate(records, train_size);
    (model, report)
}
