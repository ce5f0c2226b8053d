use thiserror::Error;

use crate::features::Label;

/// The threshold search is ill-defined for this subset or grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("threshold grid needs at least one step per side")]
    ZeroSteps,

    #[error("training subset is empty")]
    EmptySubset,

    #[error("training subset contains only {present} pairs ({count}), no {missing} pairs")]
    SingleClass {
        present: Label,
        missing: Label,
        count: usize,
    },

    #[error("{field} covers {actual} pairs, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type ThresholdResult<T> = Result<T, ThresholdError>;
