use crate::features::{Label, SubsetMask};

use super::error::{ScoringError, ScoringResult};

/// Correct decisions of a threshold over one subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccuracyCounts {
    /// Genuine pairs scoring strictly above the threshold.
    pub true_positives: usize,
    /// Impostor pairs scoring strictly below the threshold.
    pub true_negatives: usize,
    /// Subset size.
    pub total: usize,
}

impl AccuracyCounts {
    /// Counts correct decisions for `threshold` over the pairs set in `mask`.
    ///
    /// A score equal to the threshold is correct for neither class.
    pub fn tally(
        scores: &[f64],
        labels: &[Label],
        mask: &SubsetMask,
        threshold: f64,
    ) -> ScoringResult<Self> {
        check_len("labels", scores.len(), labels.len())?;
        check_len("subset mask", scores.len(), mask.len())?;

        let mut counts = Self::default();
        for i in mask.iter_ones() {
            counts.total += 1;
            match labels[i] {
                Label::Genuine if scores[i] > threshold => counts.true_positives += 1,
                Label::Impostor if scores[i] < threshold => counts.true_negatives += 1,
                _ => {}
            }
        }
        Ok(counts)
    }

    pub fn correct(&self) -> usize {
        self.true_positives + self.true_negatives
    }

    /// `(p + n) / |subset|`, or `None` for an empty subset.
    pub fn ratio(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct() as f64 / self.total as f64)
    }
}

/// Verification accuracy of `threshold` over the pairs set in `mask`, in `[0, 1]`.
pub fn accuracy(
    scores: &[f64],
    labels: &[Label],
    mask: &SubsetMask,
    threshold: f64,
) -> ScoringResult<f64> {
    AccuracyCounts::tally(scores, labels, mask, threshold)?
        .ratio()
        .ok_or(ScoringError::EmptySubset)
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> ScoringResult<()> {
    if expected != actual {
        return Err(ScoringError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
