use crate::normalize::NormalizedPairs;

/// Inner-product similarity of normalized pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreComputer;

impl ScoreComputer {
    /// One score per pair: `dot(left, right)` of the unit-norm vectors.
    ///
    /// Scores lie in `[-1, 1]` up to floating-point rounding.
    pub fn score(pairs: &NormalizedPairs) -> Vec<f64> {
        (0..pairs.len())
            .map(|i| dot(pairs.left(i), pairs.right(i)))
            .collect()
    }
}

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
