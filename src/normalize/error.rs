use thiserror::Error;

use crate::features::Side;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("pair {pair}: centered {side} feature has degenerate norm {norm}")]
    DegenerateFeature { pair: usize, side: Side, norm: f64 },

    #[error("training subset is empty, fold mean is undefined")]
    EmptyTraining,

    #[error("subset mask covers {actual} pairs, expected {expected}")]
    MaskLengthMismatch { expected: usize, actual: usize },
}

pub type NormalizeResult<T> = Result<T, NormalizeError>;
