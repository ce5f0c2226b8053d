//! Text reporting and best-checkpoint selection.
//!
//! [`AccuracyReport`] renders the per-fold table used by the LFW / AgeDB-30
//! protocol:
//!
//! ```text
//! 1    99.50
//! 2    98.83
//! ...
//! --------
//! AVE    99.1667
//! ```


use std::fmt;

use tracing::info;

use crate::evaluation::AccuracyResult;

pub const SEPARATOR: &str = "--------";

/// Display adapter for an [`AccuracyResult`].
#[derive(Debug, Clone, Copy)]
pub struct AccuracyReport<'a> {
    result: &'a AccuracyResult,
}

impl<'a> AccuracyReport<'a> {
    pub fn new(result: &'a AccuracyResult) -> Self {
        Self { result }
    }

    /// One `(1-based fold index, accuracy %)` row per fold.
    pub fn rows(&self) -> Vec<(usize, f64)> {
        self.result
            .per_fold()
            .into_iter()
            .enumerate()
            .map(|(i, acc)| (i + 1, acc * 100.0))
            .collect()
    }

    pub fn average_percent(&self) -> f64 {
        self.result.mean() * 100.0
    }
}

impl fmt::Display for AccuracyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, percent) in self.rows() {
            writeln!(f, "{}    {:.2}", index, percent)?;
        }
        writeln!(f, "{}", SEPARATOR)?;
        write!(f, "AVE    {:.4}", self.average_percent())
    }
}

/// Best checkpoint seen so far.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCheckpoint {
    pub label: String,
    pub mean: f64,
}

impl fmt::Display for BestCheckpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "best accuracy: {:.4} in {}",
            self.mean * 100.0,
            self.label
        )
    }
}

/// Tracks the evaluation with the highest mean accuracy across checkpoints.
///
/// Only a strictly greater mean replaces the current best, so the earliest of
/// equally good checkpoints is kept.
#[derive(Debug, Clone, Default)]
pub struct CheckpointTracker {
    best: Option<BestCheckpoint>,
    observed: usize,
}

impl CheckpointTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a result; returns `true` if it became the new best.
    pub fn observe(&mut self, label: impl Into<String>, result: &AccuracyResult) -> bool {
        self.observed += 1;
        let mean = result.mean();

        let improved = self.best.as_ref().is_none_or(|best| mean > best.mean);
        if improved {
            let label = label.into();
            info!(checkpoint = %label, mean, "New best checkpoint");
            self.best = Some(BestCheckpoint { label, mean });
        }
        improved
    }

    pub fn best(&self) -> Option<&BestCheckpoint> {
        self.best.as_ref()
    }

    /// Number of results observed.
    pub fn observed(&self) -> usize {
        self.observed
    }
}
