//! Input data model: paired feature vectors, labels and the fold partition.
//!
//! A [`FeaturePairSet`] is supplied by an external feature extractor (or loaded
//! from a [`FeatureRecord`](crate::storage::FeatureRecord)). Fold assignment is
//! treated as input data; [`FoldPartition`] only checks and indexes it.

pub mod error;
pub mod model;
pub mod partition;


pub use error::{InputError, InputResult};
pub use model::{FeaturePair, FeaturePairSet, Label, Side};
pub use partition::{FoldPartition, SubsetMask};
