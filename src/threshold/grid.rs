use crate::constants::{DEFAULT_THRESHOLD_STEPS, grid_len};

use super::error::{ThresholdError, ThresholdResult};

/// `2T + 1` evenly spaced candidates over `[-1, 1]`: `(i - T) / T` for `i = 0..=2T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdGrid {
    steps: u32,
}

impl Default for ThresholdGrid {
    fn default() -> Self {
        Self {
            steps: DEFAULT_THRESHOLD_STEPS,
        }
    }
}

impl ThresholdGrid {
    pub fn new(steps: u32) -> ThresholdResult<Self> {
        if steps == 0 {
            return Err(ThresholdError::ZeroSteps);
        }
        Ok(Self { steps })
    }

    /// Half-resolution `T`.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn len(&self) -> usize {
        grid_len(self.steps)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Candidate `i`, for `i` in `0..self.len()`.
    #[inline]
    pub fn candidate(&self, i: usize) -> f64 {
        let t = f64::from(self.steps);
        (i as f64 - t) / t
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(|i| self.candidate(i))
    }
}
