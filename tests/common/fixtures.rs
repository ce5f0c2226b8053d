//! Test fixtures for integration tests.

use verifold::{FeaturePair, FeaturePairSet, Label};

pub const DEFAULT_DIM: usize = 64;

pub const DEFAULT_FOLDS: usize = 10;

pub const DEFAULT_PAIRS_PER_FOLD: usize = 20;

/// Builds LFW-shaped synthetic pair sets: each fold holds a block of genuine
/// pairs followed by a block of impostor pairs.
///
/// Genuine pairs are an identity vector and a noisy copy of it; impostor pairs
/// are two unrelated identity vectors. All values come from a seeded generator,
/// so the same builder always yields the same set.
#[derive(Debug, Clone)]
pub struct PairSetBuilder {
    dim: usize,
    folds: usize,
    pairs_per_fold: usize,
    noise: f32,
    seed: u64,
}

impl Default for PairSetBuilder {
    fn default() -> Self {
        Self {
            dim: DEFAULT_DIM,
            folds: DEFAULT_FOLDS,
            pairs_per_fold: DEFAULT_PAIRS_PER_FOLD,
            noise: 0.05,
            seed: 0x5EED,
        }
    }
}

impl PairSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dim(mut self, dim: usize) -> Self {
        self.dim = dim;
        self
    }

    pub fn folds(mut self, folds: usize) -> Self {
        self.folds = folds;
        self
    }

    /// Pairs per fold; half genuine, half impostor (rounded towards genuine).
    pub fn pairs_per_fold(mut self, n: usize) -> Self {
        self.pairs_per_fold = n;
        self
    }

    /// Amplitude of the perturbation applied to the right side of genuine pairs.
    pub fn noise(mut self, noise: f32) -> Self {
        self.noise = noise;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build_pairs(&self) -> Vec<FeaturePair> {
        let mut rng = SplitMix64::new(self.seed);
        let genuine_per_fold = self.pairs_per_fold.div_ceil(2);
        let mut pairs = Vec::with_capacity(self.folds * self.pairs_per_fold);

        for fold in 0..self.folds {
            for i in 0..self.pairs_per_fold {
                let left = rng.vector(self.dim);
                let (right, label) = if i < genuine_per_fold {
                    let noisy = left
                        .iter()
                        .map(|v| v + self.noise * rng.next_signed())
                        .collect();
                    (noisy, Label::Genuine)
                } else {
                    (rng.vector(self.dim), Label::Impostor)
                };
                pairs.push(FeaturePair::new(left, right, fold as u32, label));
            }
        }

        pairs
    }

    pub fn build(&self) -> FeaturePairSet {
        FeaturePairSet::from_pairs(self.build_pairs()).expect("fixture pair set must be valid")
    }
}

/// Deterministic generator for fixture values.
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[-1, 1)`.
    pub fn next_signed(&mut self) -> f32 {
        ((self.next_u64() >> 40) as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
    }

    pub fn vector(&mut self, dim: usize) -> Vec<f32> {
        (0..dim).map(|_| self.next_signed()).collect()
    }
}

/// The four-pair, two-fold set whose genuine pairs always outscore impostors.
pub fn two_fold_separable() -> FeaturePairSet {
    FeaturePairSet::new(
        3,
        vec![1.0, 0.0, 0.0, -2.0, 0.0, 0.75, 0.0, 1.0, 0.0, 0.0, -2.0, 0.75],
        vec![1.0, 0.0, 0.25, 0.0, 0.0, -1.0, 0.0, 1.0, 0.25, 0.0, 0.0, -1.0],
        vec![0, 0, 1, 1],
        &[1, -1, 1, -1],
    )
    .expect("fixture pair set must be valid")
}
