//! Fold-aware feature normalization.
//!
//! Normalization is split into two explicit phases so the no-leakage invariant is
//! visible at the call site:
//!
//! 1. [`FoldMean::from_training`] averages the left and right features of the
//!    training pairs only (`2 x |train|` vectors).
//! 2. [`FoldMean::apply`] subtracts that mean from every pair, train and test
//!    alike, and scales each vector to unit L2 norm.
//!
//! A centered vector with zero or non-finite norm is reported as
//! [`NormalizeError::DegenerateFeature`] instead of producing NaN scores.

pub mod error;


pub use error::{NormalizeError, NormalizeResult};

use tracing::debug;

use crate::features::{FeaturePairSet, Side, SubsetMask};

/// Per-dimension mean of the training features of one fold.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldMean {
    mean: Vec<f64>,
    sample_count: usize,
}

impl FoldMean {
    /// Phase 1: mean over the left and right features of pairs set in `train`.
    pub fn from_training(pairs: &FeaturePairSet, train: &SubsetMask) -> NormalizeResult<Self> {
        check_mask(pairs, train)?;

        let dim = pairs.dim();
        let mut sum = vec![0.0f64; dim];
        let mut sample_count = 0usize;

        for pair in train.iter_ones() {
            for side in [Side::Left, Side::Right] {
                for (acc, &v) in sum.iter_mut().zip(pairs.feature(pair, side)) {
                    *acc += f64::from(v);
                }
                sample_count += 1;
            }
        }

        if sample_count == 0 {
            return Err(NormalizeError::EmptyTraining);
        }

        let denom = sample_count as f64;
        let mean = sum.into_iter().map(|s| s / denom).collect();

        debug!(dim, sample_count, "Computed training fold mean");

        Ok(Self { mean, sample_count })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.mean
    }

    /// Number of vectors averaged (`2 x |train|`).
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Phase 2: centers every pair on this mean and L2-normalizes each vector.
    pub fn apply(&self, pairs: &FeaturePairSet) -> NormalizeResult<NormalizedPairs> {
        let dim = pairs.dim();
        let mut left = Vec::with_capacity(pairs.len() * dim);
        let mut right = Vec::with_capacity(pairs.len() * dim);

        for pair in 0..pairs.len() {
            self.center_and_scale(pairs.left(pair), pair, Side::Left, &mut left)?;
            self.center_and_scale(pairs.right(pair), pair, Side::Right, &mut right)?;
        }

        Ok(NormalizedPairs { dim, left, right })
    }

    fn center_and_scale(
        &self,
        raw: &[f32],
        pair: usize,
        side: Side,
        out: &mut Vec<f64>,
    ) -> NormalizeResult<()> {
        let start = out.len();
        out.extend(raw.iter().zip(&self.mean).map(|(&v, &m)| f64::from(v) - m));

        let centered = &mut out[start..];
        let norm = centered.iter().map(|v| v * v).sum::<f64>().sqrt();
        if !norm.is_finite() || norm <= 0.0 {
            return Err(NormalizeError::DegenerateFeature { pair, side, norm });
        }

        for v in centered.iter_mut() {
            *v /= norm;
        }
        Ok(())
    }
}

/// Unit-norm, mean-centered features for one fold context. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPairs {
    dim: usize,
    left: Vec<f64>,
    right: Vec<f64>,
}

impl NormalizedPairs {
    pub fn len(&self) -> usize {
        self.left.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn left(&self, pair: usize) -> &[f64] {
        &self.left[pair * self.dim..(pair + 1) * self.dim]
    }

    pub fn right(&self, pair: usize) -> &[f64] {
        &self.right[pair * self.dim..(pair + 1) * self.dim]
    }
}

/// Runs both normalization phases for one fold.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn normalize(
        pairs: &FeaturePairSet,
        train: &SubsetMask,
    ) -> NormalizeResult<NormalizedPairs> {
        FoldMean::from_training(pairs, train)?.apply(pairs)
    }
}

fn check_mask(pairs: &FeaturePairSet, mask: &SubsetMask) -> NormalizeResult<()> {
    if mask.len() != pairs.len() {
        return Err(NormalizeError::MaskLengthMismatch {
            expected: pairs.len(),
            actual: mask.len(),
        });
    }
    Ok(())
}
