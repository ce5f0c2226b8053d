use thiserror::Error;

use super::model::Side;

/// Violations of the input contract, detected before any fold is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("feature pair set is empty")]
    NoPairs,

    #[error("feature dimension cannot be zero")]
    ZeroDimension,

    #[error("{side} feature matrix has {len} values, not a multiple of dimension {dim}")]
    RaggedFeatures { side: Side, len: usize, dim: usize },

    #[error("{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("pair {pair}: {side} feature has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        pair: usize,
        side: Side,
        expected: usize,
        actual: usize,
    },

    #[error("pair {pair}: {side} feature contains a non-finite value")]
    NonFiniteFeature { pair: usize, side: Side },

    #[error("pair {pair}: label {value} is not +1 or -1")]
    InvalidLabel { pair: usize, value: i32 },

    #[error("pair {pair}: fold id {fold} is outside [0, {fold_count})")]
    FoldOutOfRange {
        pair: usize,
        fold: u32,
        fold_count: usize,
    },

    #[error("fold {fold} has no test pairs")]
    EmptyFold { fold: usize },
}

pub type InputResult<T> = Result<T, InputError>;
