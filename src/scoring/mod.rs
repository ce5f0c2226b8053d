//! Pair similarity scores and thresholded verification accuracy.
//!
//! [`ScoreComputer`] turns a fold's [`NormalizedPairs`](crate::normalize::NormalizedPairs)
//! into one cosine score per pair. [`accuracy`] applies a decision threshold to a
//! subset with strict comparisons on both sides.

pub mod accuracy;
pub mod error;
pub mod scorer;


pub use accuracy::{AccuracyCounts, accuracy};
pub use error::{ScoringError, ScoringResult};
pub use scorer::{ScoreComputer, dot};
