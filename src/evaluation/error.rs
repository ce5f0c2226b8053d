use thiserror::Error;

use crate::features::InputError;
use crate::normalize::NormalizeError;
use crate::scoring::ScoringError;
use crate::threshold::ThresholdError;

/// Failure of a whole evaluation run. No partial result accompanies it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("fold {fold}: degenerate feature: {source}")]
    DegenerateFeature {
        fold: usize,
        #[source]
        source: NormalizeError,
    },

    #[error("fold {fold}: threshold search is ill-defined: {source}")]
    Configuration {
        fold: usize,
        #[source]
        source: ThresholdError,
    },

    #[error("fold {fold}: test accuracy failed: {source}")]
    Scoring {
        fold: usize,
        #[source]
        source: ScoringError,
    },

    #[error("fold {fold}: worker failed: {reason}")]
    WorkerFailed { fold: usize, reason: String },
}

impl EvalError {
    /// Fold that failed, if the error is tied to one.
    pub fn fold(&self) -> Option<usize> {
        match self {
            Self::DegenerateFeature { fold, .. }
            | Self::Configuration { fold, .. }
            | Self::Scoring { fold, .. }
            | Self::WorkerFailed { fold, .. } => Some(*fold),
            Self::InvalidSettings { .. } | Self::InvalidInput(_) => None,
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;
