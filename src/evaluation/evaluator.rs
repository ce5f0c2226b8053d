use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info};

use crate::constants::MIN_FOLD_COUNT;
use crate::features::{FeaturePairSet, FoldPartition};
use crate::normalize::Normalizer;
use crate::scoring::{ScoreComputer, accuracy};
use crate::threshold::{ThresholdError, ThresholdSearcher};

use super::error::{EvalError, EvalResult};
use super::types::{AccuracyResult, EvalSettings, FoldOutcome};

/// K-fold verification evaluator.
///
/// Each fold normalizes all pairs with the training mean, scores them, learns a
/// threshold on the training pairs and measures accuracy on the held-out pairs.
/// Folds share nothing but read access to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    settings: EvalSettings,
    searcher: ThresholdSearcher,
}

impl Evaluator {
    pub fn new(settings: EvalSettings) -> EvalResult<Self> {
        if settings.fold_count < MIN_FOLD_COUNT {
            return Err(EvalError::InvalidSettings {
                reason: format!(
                    "fold count {} is below the minimum of {}",
                    settings.fold_count, MIN_FOLD_COUNT
                ),
            });
        }

        let searcher = ThresholdSearcher::new(settings.threshold_steps).map_err(
            |e: ThresholdError| EvalError::InvalidSettings {
                reason: e.to_string(),
            },
        )?;

        Ok(Self { settings, searcher })
    }

    pub fn settings(&self) -> &EvalSettings {
        &self.settings
    }

    /// Validates the fold ids of `pairs` against the configured fold count.
    pub fn partition(&self, pairs: &FeaturePairSet) -> EvalResult<FoldPartition> {
        Ok(FoldPartition::new(pairs, self.settings.fold_count)?)
    }

    /// Evaluates all folds in order on the calling thread.
    pub fn evaluate(&self, pairs: &FeaturePairSet) -> EvalResult<AccuracyResult> {
        let partition = self.partition(pairs)?;

        let outcomes = (0..partition.fold_count())
            .map(|fold| self.evaluate_fold(pairs, &partition, fold))
            .collect::<EvalResult<Vec<_>>>()?;

        Ok(self.finish(pairs, outcomes))
    }

    /// Evaluates all folds concurrently on the blocking thread pool.
    ///
    /// Produces the same result as [`evaluate`](Self::evaluate). When several folds
    /// fail, the error of the lowest fold index is returned.
    pub async fn evaluate_parallel(
        &self,
        pairs: Arc<FeaturePairSet>,
    ) -> EvalResult<AccuracyResult> {
        let partition = Arc::new(self.partition(&pairs)?);
        let fold_count = partition.fold_count();

        let handles = (0..fold_count).map(|fold| {
            let evaluator = *self;
            let pairs = Arc::clone(&pairs);
            let partition = Arc::clone(&partition);
            tokio::task::spawn_blocking(move || evaluator.evaluate_fold(&pairs, &partition, fold))
        });

        let joined = join_all(handles).await;

        let mut slots: Vec<Option<FoldOutcome>> = vec![None; fold_count];
        for (fold, result) in joined.into_iter().enumerate() {
            let outcome = result.map_err(|e| EvalError::WorkerFailed {
                fold,
                reason: e.to_string(),
            })??;
            slots[outcome.fold] = Some(outcome);
        }

        let outcomes = slots.into_iter().flatten().collect();
        Ok(self.finish(&pairs, outcomes))
    }

    /// Runs the normalize, score, search, test pipeline for a single fold.
    pub fn evaluate_fold(
        &self,
        pairs: &FeaturePairSet,
        partition: &FoldPartition,
        fold: usize,
    ) -> EvalResult<FoldOutcome> {
        let train = partition.train_mask(fold);
        let test = partition.test_mask(fold);

        let normalized = Normalizer::normalize(pairs, &train)
            .map_err(|source| EvalError::DegenerateFeature { fold, source })?;
        let scores = ScoreComputer::score(&normalized);

        let search = self
            .searcher
            .search_with_details(&scores, pairs.labels(), &train)
            .map_err(|source| EvalError::Configuration { fold, source })?;

        let test_accuracy = accuracy(&scores, pairs.labels(), &test, search.threshold)
            .map_err(|source| EvalError::Scoring { fold, source })?;

        debug!(
            fold,
            threshold = search.threshold,
            train_accuracy = search.accuracy,
            accuracy = test_accuracy,
            tied = search.tied,
            "Fold evaluated"
        );

        Ok(FoldOutcome {
            fold,
            threshold: search.threshold,
            train_accuracy: search.accuracy,
            accuracy: test_accuracy,
            tied_thresholds: search.tied,
            train_size: search.total,
            test_size: test.count_ones(),
        })
    }

    fn finish(&self, pairs: &FeaturePairSet, outcomes: Vec<FoldOutcome>) -> AccuracyResult {
        let result = AccuracyResult::from_outcomes(outcomes);
        info!(
            pairs = pairs.len(),
            dim = pairs.dim(),
            folds = result.fold_count(),
            steps = self.settings.threshold_steps,
            mean = result.mean(),
            "Evaluation complete"
        );
        result
    }
}
