//! Feature pair data model.

use std::fmt;

use crate::constants::{GENUINE_FLAG, IMPOSTOR_FLAG};

use super::error::{InputError, InputResult};

/// Ground truth for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Same identity (`+1`).
    Genuine,
    /// Different identity (`-1`).
    Impostor,
}

impl Label {
    /// Parses a `+1` / `-1` flag.
    pub fn from_flag(flag: i32) -> Option<Self> {
        match flag {
            GENUINE_FLAG => Some(Self::Genuine),
            IMPOSTOR_FLAG => Some(Self::Impostor),
            _ => None,
        }
    }

    /// Returns the `+1` / `-1` flag.
    pub fn flag(self) -> i32 {
        match self {
            Self::Genuine => GENUINE_FLAG,
            Self::Impostor => IMPOSTOR_FLAG,
        }
    }

    pub fn is_genuine(self) -> bool {
        matches!(self, Self::Genuine)
    }
}

impl TryFrom<i32> for Label {
    type Error = i32;

    fn try_from(flag: i32) -> Result<Self, Self::Error> {
        Self::from_flag(flag).ok_or(flag)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genuine => write!(f, "genuine"),
            Self::Impostor => write!(f, "impostor"),
        }
    }
}

/// Which half of a pair a feature vector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// A single owned pair, convenient for building small sets by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePair {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
    pub fold: u32,
    pub label: Label,
}

impl FeaturePair {
    pub fn new(left: Vec<f32>, right: Vec<f32>, fold: u32, label: Label) -> Self {
        Self {
            left,
            right,
            fold,
            label,
        }
    }
}

/// All `N` pairs of an evaluation run: two row-major `N x D` matrices plus
/// per-pair fold ids and labels.
///
/// Immutable once built. Every core component borrows it read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePairSet {
    dim: usize,
    left: Vec<f32>,
    right: Vec<f32>,
    folds: Vec<u32>,
    labels: Vec<Label>,
}

impl FeaturePairSet {
    /// Builds a pair set from flat row-major matrices and raw `+1`/`-1` flags.
    ///
    /// Rejects empty input, ragged matrices, length mismatches, non-finite values
    /// and labels other than `+1`/`-1`. Fold ids are range-checked later against a
    /// fold count by [`FoldPartition`](super::FoldPartition).
    pub fn new(
        dim: usize,
        left: Vec<f32>,
        right: Vec<f32>,
        folds: Vec<u32>,
        flags: &[i32],
    ) -> InputResult<Self> {
        if dim == 0 {
            return Err(InputError::ZeroDimension);
        }
        if !left.len().is_multiple_of(dim) {
            return Err(InputError::RaggedFeatures {
                side: Side::Left,
                len: left.len(),
                dim,
            });
        }
        if !right.len().is_multiple_of(dim) {
            return Err(InputError::RaggedFeatures {
                side: Side::Right,
                len: right.len(),
                dim,
            });
        }

        let len = left.len() / dim;
        if len == 0 {
            return Err(InputError::NoPairs);
        }
        if right.len() != left.len() {
            return Err(InputError::LengthMismatch {
                field: "right features",
                expected: len,
                actual: right.len() / dim,
            });
        }
        if folds.len() != len {
            return Err(InputError::LengthMismatch {
                field: "fold ids",
                expected: len,
                actual: folds.len(),
            });
        }
        if flags.len() != len {
            return Err(InputError::LengthMismatch {
                field: "labels",
                expected: len,
                actual: flags.len(),
            });
        }

        let labels = flags
            .iter()
            .enumerate()
            .map(|(pair, &value)| {
                Label::from_flag(value).ok_or(InputError::InvalidLabel { pair, value })
            })
            .collect::<InputResult<Vec<_>>>()?;

        for (side, matrix) in [(Side::Left, &left), (Side::Right, &right)] {
            if let Some(pair) = matrix
                .chunks_exact(dim)
                .position(|row| row.iter().any(|v| !v.is_finite()))
            {
                return Err(InputError::NonFiniteFeature { pair, side });
            }
        }

        Ok(Self {
            dim,
            left,
            right,
            folds,
            labels,
        })
    }

    /// Builds a pair set from owned pairs; the first pair fixes the dimension.
    pub fn from_pairs(pairs: Vec<FeaturePair>) -> InputResult<Self> {
        let dim = pairs.first().ok_or(InputError::NoPairs)?.left.len();

        let mut left = Vec::with_capacity(pairs.len() * dim);
        let mut right = Vec::with_capacity(pairs.len() * dim);
        let mut folds = Vec::with_capacity(pairs.len());
        let mut flags = Vec::with_capacity(pairs.len());

        for (index, pair) in pairs.into_iter().enumerate() {
            for (side, feature) in [(Side::Left, &pair.left), (Side::Right, &pair.right)] {
                if feature.len() != dim {
                    return Err(InputError::DimensionMismatch {
                        pair: index,
                        side,
                        expected: dim,
                        actual: feature.len(),
                    });
                }
            }
            left.extend_from_slice(&pair.left);
            right.extend_from_slice(&pair.right);
            folds.push(pair.fold);
            flags.push(pair.label.flag());
        }

        Self::new(dim, left, right, folds, &flags)
    }

    /// Number of pairs `N`.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Feature dimension `D`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn left(&self, pair: usize) -> &[f32] {
        &self.left[pair * self.dim..(pair + 1) * self.dim]
    }

    pub fn right(&self, pair: usize) -> &[f32] {
        &self.right[pair * self.dim..(pair + 1) * self.dim]
    }

    pub fn feature(&self, pair: usize, side: Side) -> &[f32] {
        match side {
            Side::Left => self.left(pair),
            Side::Right => self.right(pair),
        }
    }

    /// Row-major left matrix.
    pub fn left_matrix(&self) -> &[f32] {
        &self.left
    }

    /// Row-major right matrix.
    pub fn right_matrix(&self) -> &[f32] {
        &self.right
    }

    pub fn folds(&self) -> &[u32] {
        &self.folds
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Labels as `+1`/`-1` flags.
    pub fn flags(&self) -> Vec<i32> {
        self.labels.iter().map(|l| l.flag()).collect()
    }

    /// Copies pair `index` out as an owned [`FeaturePair`].
    pub fn pair(&self, index: usize) -> FeaturePair {
        FeaturePair::new(
            self.left(index).to_vec(),
            self.right(index).to_vec(),
            self.folds[index],
            self.labels[index],
        )
    }
}
