//! Fold partition derived from per-pair fold ids.

use bitvec::vec::BitVec;

use super::error::{InputError, InputResult};
use super::model::FeaturePairSet;

/// Membership mask over all `N` pairs (bit `i` set means pair `i` is in the subset).
pub type SubsetMask = BitVec;

/// The externally supplied K-way split of a [`FeaturePairSet`].
///
/// Construction checks that every fold id lies in `[0, K)` and that every fold
/// owns at least one pair, so the K test subsets are non-empty, disjoint and
/// together cover all pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldPartition {
    assignments: Vec<u32>,
    fold_sizes: Vec<usize>,
}

impl FoldPartition {
    pub fn new(pairs: &FeaturePairSet, fold_count: usize) -> InputResult<Self> {
        Self::from_assignments(pairs.folds().to_vec(), fold_count)
    }

    pub fn from_assignments(assignments: Vec<u32>, fold_count: usize) -> InputResult<Self> {
        if assignments.is_empty() {
            return Err(InputError::NoPairs);
        }

        let mut fold_sizes = vec![0usize; fold_count];
        for (pair, &fold) in assignments.iter().enumerate() {
            let slot = fold_sizes
                .get_mut(fold as usize)
                .ok_or(InputError::FoldOutOfRange {
                    pair,
                    fold,
                    fold_count,
                })?;
            *slot += 1;
        }

        if let Some(fold) = fold_sizes.iter().position(|&size| size == 0) {
            return Err(InputError::EmptyFold { fold });
        }

        Ok(Self {
            assignments,
            fold_sizes,
        })
    }

    /// Number of folds `K`.
    pub fn fold_count(&self) -> usize {
        self.fold_sizes.len()
    }

    /// Number of pairs `N`.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of test pairs in `fold`.
    pub fn fold_size(&self, fold: usize) -> usize {
        self.fold_sizes[fold]
    }

    /// Pairs whose fold id equals `fold`.
    pub fn test_mask(&self, fold: usize) -> SubsetMask {
        self.assignments
            .iter()
            .map(|&f| f as usize == fold)
            .collect()
    }

    /// Pairs whose fold id differs from `fold`.
    pub fn train_mask(&self, fold: usize) -> SubsetMask {
        !self.test_mask(fold)
    }
}
