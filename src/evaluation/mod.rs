//! K-fold cross-validated verification accuracy.
//!
//! For each fold `i`, pairs with fold id `!= i` train the normalization mean and
//! the decision threshold; pairs with fold id `== i` are scored with them. The run
//! is a pure function of `(pairs, K, T)`: it either returns a complete
//! [`AccuracyResult`] or fails with an [`EvalError`] naming the offending fold or
//! input.
//!
//! [`Evaluator::evaluate_parallel`] runs the folds concurrently and writes each
//! outcome into a slot addressed by fold index, so it is interchangeable with the
//! sequential [`Evaluator::evaluate`].

pub mod error;
pub mod evaluator;
pub mod types;


pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use types::{AccuracyResult, EvalSettings, FoldOutcome};
