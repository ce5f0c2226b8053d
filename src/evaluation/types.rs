use std::fmt;

use crate::constants::{DEFAULT_FOLD_COUNT, DEFAULT_THRESHOLD_STEPS};

/// Configuration surface consumed by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalSettings {
    /// Number of folds `K`. Default: `10`.
    pub fold_count: usize,
    /// Threshold grid half-resolution `T`. Default: `10_000`.
    pub threshold_steps: u32,
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self {
            fold_count: DEFAULT_FOLD_COUNT,
            threshold_steps: DEFAULT_THRESHOLD_STEPS,
        }
    }
}

impl EvalSettings {
    pub fn new(fold_count: usize, threshold_steps: u32) -> Self {
        Self {
            fold_count,
            threshold_steps,
        }
    }
}

/// Result of one fold's pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldOutcome {
    /// Fold index in `[0, K)`.
    pub fold: usize,
    /// Threshold learned on the training pairs.
    pub threshold: f64,
    /// Accuracy of `threshold` on the training pairs.
    pub train_accuracy: f64,
    /// Accuracy of `threshold` on the held-out pairs.
    pub accuracy: f64,
    /// Grid candidates tied at the best training accuracy.
    pub tied_thresholds: usize,
    pub train_size: usize,
    pub test_size: usize,
}

/// Per-fold test accuracies and their mean. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyResult {
    folds: Vec<FoldOutcome>,
    mean: f64,
}

impl AccuracyResult {
    /// Builds the result from outcomes ordered by fold index.
    pub fn from_outcomes(folds: Vec<FoldOutcome>) -> Self {
        let mean = if folds.is_empty() {
            0.0
        } else {
            folds.iter().map(|f| f.accuracy).sum::<f64>() / folds.len() as f64
        };
        Self { folds, mean }
    }

    /// Test accuracy of each fold, indexed by fold.
    pub fn per_fold(&self) -> Vec<f64> {
        self.folds.iter().map(|f| f.accuracy).collect()
    }

    /// Mean of [`per_fold`](Self::per_fold).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn folds(&self) -> &[FoldOutcome] {
        &self.folds
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.folds.iter().map(|f| f.threshold).collect()
    }

    pub fn fold_count(&self) -> usize {
        self.folds.len()
    }
}

impl fmt::Display for AccuracyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} folds, mean accuracy {:.4}%",
            self.folds.len(),
            self.mean * 100.0
        )
    }
}
