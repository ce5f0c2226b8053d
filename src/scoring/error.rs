use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("{field} covers {actual} pairs, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("accuracy is undefined on an empty subset")]
    EmptySubset,
}

pub type ScoringResult<T> = Result<T, ScoringError>;
