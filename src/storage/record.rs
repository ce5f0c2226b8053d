//! Persisted feature record.

use rkyv::{Archive, Deserialize, Serialize};

use crate::features::FeaturePairSet;

use super::error::{StorageError, StorageResult};

/// Digest value of a record that was never sealed.
pub const UNSEALED_DIGEST: [u8; 32] = [0; 32];

/// Extracted features of one evaluation set, as written by the feature extractor.
///
/// Stored as `rkyv` bytes and usually read through a memory map. Matrices are
/// row-major `N x dim`.
///
/// # Example
/// ```rust
/// use verifold::storage::FeatureRecord;
///
/// let record = FeatureRecord::new(1, vec![1.0, 2.0], vec![1.5, -2.0], vec![0, 1], vec![1, -1]);
/// assert!(record.is_sealed());
/// assert!(record.verify_digest());
/// assert_eq!(record.len(), 2);
/// ```
#[derive(Archive, Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct FeatureRecord {
    /// Feature dimension `D`.
    pub dim: u32,
    /// Left features, `N x D`.
    pub left: Vec<f32>,
    /// Right features, `N x D`.
    pub right: Vec<f32>,
    /// Fold id per pair.
    pub folds: Vec<u32>,
    /// `+1` genuine / `-1` impostor per pair.
    pub labels: Vec<i8>,
    /// BLAKE3 digest of the fields above, or [`UNSEALED_DIGEST`].
    pub digest: [u8; 32],
}

impl FeatureRecord {
    /// Builds a sealed record.
    pub fn new(
        dim: u32,
        left: Vec<f32>,
        right: Vec<f32>,
        folds: Vec<u32>,
        labels: Vec<i8>,
    ) -> Self {
        let mut record = Self {
            dim,
            left,
            right,
            folds,
            labels,
            digest: UNSEALED_DIGEST,
        };
        record.seal();
        record
    }

    /// Converts a validated pair set into a sealed record.
    pub fn from_pair_set(pairs: &FeaturePairSet) -> StorageResult<Self> {
        let dim = u32::try_from(pairs.dim())
            .map_err(|_| StorageError::OutOfRange(format!("dimension {}", pairs.dim())))?;
        // Labels are +1/-1 by construction of the pair set.
        let labels = pairs.labels().iter().map(|l| l.flag() as i8).collect();

        Ok(Self::new(
            dim,
            pairs.left_matrix().to_vec(),
            pairs.right_matrix().to_vec(),
            pairs.folds().to_vec(),
            labels,
        ))
    }

    /// Validates the record and converts it into a [`FeaturePairSet`].
    pub fn into_pair_set(self) -> StorageResult<FeaturePairSet> {
        let flags: Vec<i32> = self.labels.iter().map(|&l| i32::from(l)).collect();
        Ok(FeaturePairSet::new(
            self.dim as usize,
            self.left,
            self.right,
            self.folds,
            &flags,
        )?)
    }

    /// Number of pairs `N` (by label count).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.digest != UNSEALED_DIGEST
    }

    /// Recomputes and stores the digest.
    pub fn seal(&mut self) {
        self.digest = self.compute_digest();
    }

    /// `true` if the stored digest matches the content.
    pub fn verify_digest(&self) -> bool {
        self.digest == self.compute_digest()
    }

    pub fn compute_digest(&self) -> [u8; 32] {
        record_digest(self.dim, &self.left, &self.right, &self.folds, &self.labels)
    }
}

/// BLAKE3 over the length-prefixed raw bytes of every field.
pub fn record_digest(
    dim: u32,
    left: &[f32],
    right: &[f32],
    folds: &[u32],
    labels: &[i8],
) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&dim.to_le_bytes());
    for bytes in [
        bytemuck::cast_slice::<f32, u8>(left),
        bytemuck::cast_slice::<f32, u8>(right),
        bytemuck::cast_slice::<u32, u8>(folds),
        bytemuck::cast_slice::<i8, u8>(labels),
    ] {
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    *hasher.finalize().as_bytes()
}
