use tracing::debug;

use crate::features::{Label, SubsetMask};

use super::error::{ThresholdError, ThresholdResult};
use super::grid::ThresholdGrid;

/// Outcome of a grid search over one training subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSearch {
    /// Mean of all candidates tied at the best accuracy.
    pub threshold: f64,
    /// Best accuracy on the searched subset.
    pub accuracy: f64,
    /// Number of candidates tied at the best accuracy.
    pub tied: usize,
    /// Correct decisions at the best accuracy.
    pub correct: usize,
    /// Subset size.
    pub total: usize,
}

/// Grid search for the decision threshold that maximizes subset accuracy.
///
/// When several candidates reach the maximum, the result is the arithmetic mean
/// of all of them, not the first or last one. The averaged threshold itself is
/// not re-scored; it may land between tied candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdSearcher {
    grid: ThresholdGrid,
}

impl ThresholdSearcher {
    pub fn new(steps: u32) -> ThresholdResult<Self> {
        Ok(Self {
            grid: ThresholdGrid::new(steps)?,
        })
    }

    pub fn with_grid(grid: ThresholdGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &ThresholdGrid {
        &self.grid
    }

    /// Returns the best threshold for the pairs set in `mask`.
    pub fn search(
        &self,
        scores: &[f64],
        labels: &[Label],
        mask: &SubsetMask,
    ) -> ThresholdResult<f64> {
        Ok(self.search_with_details(scores, labels, mask)?.threshold)
    }

    pub fn search_with_details(
        &self,
        scores: &[f64],
        labels: &[Label],
        mask: &SubsetMask,
    ) -> ThresholdResult<ThresholdSearch> {
        let (genuine, impostor) = split_sorted(scores, labels, mask)?;
        let total = genuine.len() + impostor.len();

        let mut best_correct = 0usize;
        let mut tied_sum = 0.0f64;
        let mut tied = 0usize;

        for threshold in self.grid.iter() {
            // #{genuine > t} + #{impostor < t}, identical to the per-pair rule.
            let true_positives = genuine.len() - genuine.partition_point(|&s| s <= threshold);
            let true_negatives = impostor.partition_point(|&s| s < threshold);
            let correct = true_positives + true_negatives;

            if tied == 0 || correct > best_correct {
                best_correct = correct;
                tied_sum = threshold;
                tied = 1;
            } else if correct == best_correct {
                tied_sum += threshold;
                tied += 1;
            }
        }

        let threshold = tied_sum / tied as f64;
        let accuracy = best_correct as f64 / total as f64;

        debug!(
            threshold,
            accuracy,
            tied,
            genuine = genuine.len(),
            impostor = impostor.len(),
            steps = self.grid.steps(),
            "Threshold search complete"
        );

        Ok(ThresholdSearch {
            threshold,
            accuracy,
            tied,
            correct: best_correct,
            total,
        })
    }
}

/// Splits the masked scores by label and sorts each side ascending.
fn split_sorted(
    scores: &[f64],
    labels: &[Label],
    mask: &SubsetMask,
) -> ThresholdResult<(Vec<f64>, Vec<f64>)> {
    if labels.len() != scores.len() {
        return Err(ThresholdError::LengthMismatch {
            field: "labels",
            expected: scores.len(),
            actual: labels.len(),
        });
    }
    if mask.len() != scores.len() {
        return Err(ThresholdError::LengthMismatch {
            field: "subset mask",
            expected: scores.len(),
            actual: mask.len(),
        });
    }

    let mut genuine = Vec::new();
    let mut impostor = Vec::new();
    for i in mask.iter_ones() {
        match labels[i] {
            Label::Genuine => genuine.push(scores[i]),
            Label::Impostor => impostor.push(scores[i]),
        }
    }

    match (genuine.is_empty(), impostor.is_empty()) {
        (true, true) => return Err(ThresholdError::EmptySubset),
        (true, false) => {
            return Err(ThresholdError::SingleClass {
                present: Label::Impostor,
                missing: Label::Genuine,
                count: impostor.len(),
            });
        }
        (false, true) => {
            return Err(ThresholdError::SingleClass {
                present: Label::Genuine,
                missing: Label::Impostor,
                count: genuine.len(),
            });
        }
        (false, false) => {}
    }

    genuine.sort_by(f64::total_cmp);
    impostor.sort_by(f64::total_cmp);
    Ok((genuine, impostor))
}
