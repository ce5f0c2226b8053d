//! Cross-cutting, shared constants.
//!
//! # Protocol Defaults
//!
//! The fold count and threshold grid resolution match the standard LFW / AgeDB-30
//! verification protocol. Use [`EvalSettings`](crate::evaluation::EvalSettings) or
//! [`Config`](crate::config::Config) to override them at runtime.

/// Number of cross-validation folds used by the standard protocol.
pub const DEFAULT_FOLD_COUNT: usize = 10;

/// Half-resolution `T` of the threshold grid: `2T + 1` candidates over `[-1, 1]`.
pub const DEFAULT_THRESHOLD_STEPS: u32 = 10_000;

/// Smallest fold count for which a train/test split exists.
pub const MIN_FOLD_COUNT: usize = 2;

/// Lower bound of the cosine score range (and of the threshold grid).
pub const SCORE_MIN: f64 = -1.0;

/// Upper bound of the cosine score range (and of the threshold grid).
pub const SCORE_MAX: f64 = 1.0;

/// Tolerance used when checking unit norms and score bounds.
pub const NORM_EPSILON: f64 = 1e-9;

/// Label value for a genuine (same identity) pair.
pub const GENUINE_FLAG: i32 = 1;

/// Label value for an impostor (different identity) pair.
pub const IMPOSTOR_FLAG: i32 = -1;

/// Number of grid candidates for a given half-resolution.
pub const fn grid_len(steps: u32) -> usize {
    2 * steps as usize + 1
}
