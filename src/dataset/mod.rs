//! Labeled endgame datasets: loading, search-based classification and a
//! linear baseline for comparison

pub mod baseline;
pub mod evaluator;
pub mod loader;
pub mod record;

pub use baseline::{BaselineConfig, LinearBaseline, fit_and_evaluate};
pub use evaluator::{
    AccuracyResult, ConfusionMatrix, DatasetEvaluator, EvaluationConfig, EvaluationReport,
    SplitMetrics, evaluate_dataset_file, run_dataset_evaluation,
};
pub use loader::{LoadedDataset, load_records, read_records};
pub use record::{GameRecord, Label};
