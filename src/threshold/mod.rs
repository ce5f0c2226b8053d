//! Decision threshold grid search.
//!
//! The searcher scans every candidate of a [`ThresholdGrid`] and keeps all
//! candidates that share the maximum training accuracy; the returned threshold is
//! their mean. A subset that is empty or holds a single label class is rejected
//! with [`ThresholdError`] before any candidate is scored.

pub mod error;
pub mod grid;
pub mod searcher;


pub use error::{ThresholdError, ThresholdResult};
pub use grid::ThresholdGrid;
pub use searcher::{ThresholdSearch, ThresholdSearcher};
