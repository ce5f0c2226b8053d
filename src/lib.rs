//! Verifold library crate (used by the CLI binary and integration tests).
//!
//! K-fold cross-validated verification accuracy for pairwise embeddings, following
//! the LFW / AgeDB-30 protocol: per-fold mean-centering and L2 normalization,
//! cosine scores, a grid-searched decision threshold, and held-out accuracy.
//!
//! # Public API Surface
//!
//! ## Core Pipeline
//! - [`FeaturePairSet`], [`FoldPartition`], [`Label`] - Input data and fold split
//! - [`FoldMean`], [`Normalizer`] - Two-phase fold normalization
//! - [`ScoreComputer`], [`accuracy`] - Pair scores and thresholded accuracy
//! - [`ThresholdSearcher`], [`ThresholdGrid`] - Tie-averaging grid search
//! - [`Evaluator`], [`AccuracyResult`] - Sequential and parallel fold loops
//!
//! ## Surfaces
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`FeatureRecord`], [`FeatureStore`] - Persisted feature records
//! - [`AccuracyReport`], [`CheckpointTracker`] - Text output and model selection
//!
//! # Example
//!
//! ```
//! use verifold::{EvalSettings, Evaluator, FeaturePair, FeaturePairSet, Label};
//!
//! let pairs = FeaturePairSet::from_pairs(vec![
//!     FeaturePair::new(vec![1.0, 0.0, 0.0], vec![1.0, 0.0, 0.25], 0, Label::Genuine),
//!     FeaturePair::new(vec![-2.0, 0.0, 0.75], vec![0.0, 0.0, -1.0], 0, Label::Impostor),
//!     FeaturePair::new(vec![0.0, 1.0, 0.0], vec![0.0, 1.0, 0.25], 1, Label::Genuine),
//!     FeaturePair::new(vec![0.0, -2.0, 0.75], vec![0.0, 0.0, -1.0], 1, Label::Impostor),
//! ])
//! .unwrap();
//!
//! let evaluator = Evaluator::new(EvalSettings::new(2, 10_000)).unwrap();
//! let result = evaluator.evaluate(&pairs).unwrap();
//! assert_eq!(result.per_fold(), vec![1.0, 1.0]);
//! assert_eq!(result.mean(), 1.0);
//! ```

pub mod config;
pub mod constants;
pub mod evaluation;
pub mod features;
pub mod normalize;
pub mod report;
pub mod scoring;
pub mod storage;
pub mod threshold;

pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_FOLD_COUNT, DEFAULT_THRESHOLD_STEPS};
pub use evaluation::{AccuracyResult, EvalError, EvalResult, EvalSettings, Evaluator, FoldOutcome};
pub use features::{
    FeaturePair, FeaturePairSet, FoldPartition, InputError, Label, Side, SubsetMask,
};
pub use normalize::{FoldMean, NormalizeError, NormalizedPairs, Normalizer};
pub use report::{AccuracyReport, BestCheckpoint, CheckpointTracker};
pub use scoring::{AccuracyCounts, ScoreComputer, ScoringError, accuracy};
pub use storage::{
    FeatureRecord, FeatureStore, JsonFeatureRecord, RecordHandle, StorageError, StorageResult,
};
pub use threshold::{ThresholdError, ThresholdGrid, ThresholdSearch, ThresholdSearcher};
