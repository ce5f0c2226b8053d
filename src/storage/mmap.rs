use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use memmap2::Mmap;
use rkyv::rancor::Error as RkyvError;

use super::error::{StorageError, StorageResult};
use super::record::{ArchivedFeatureRecord, FeatureRecord, UNSEALED_DIGEST};

pub const RKYV_ALIGNMENT: usize = 16;

/// Read-only memory map of a persisted [`FeatureRecord`].
#[derive(Clone)]
pub struct RecordHandle {
    inner: Arc<Mmap>,
    path: Arc<PathBuf>,
}

impl std::fmt::Debug for RecordHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordHandle")
            .field("path", &self.path)
            .field("len", &self.len())
            .finish()
    }
}

impl RecordHandle {
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        if file.metadata()?.len() == 0 {
            return Err(StorageError::EmptyFile {
                path: path.to_path_buf(),
            });
        }

        // SAFETY: Record files are written once via temp file + rename and never
        // modified in place, so the mapping is not mutated underneath us.
        let mmap = unsafe { Mmap::map(&file)? };

        Ok(Self {
            inner: Arc::new(mmap),
            path: Arc::new(path.to_path_buf()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_slice(&self) -> &[u8] {
        self.inner.deref()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validated zero-copy view of the archived record.
    pub fn access(&self) -> StorageResult<&ArchivedFeatureRecord> {
        let data = self.as_slice();

        if !(data.as_ptr() as usize).is_multiple_of(RKYV_ALIGNMENT) {
            return Err(StorageError::AlignmentError {
                path: self.path.to_path_buf(),
                alignment: RKYV_ALIGNMENT,
            });
        }

        rkyv::access::<ArchivedFeatureRecord, RkyvError>(data)
            .map_err(|e| StorageError::ValidationFailed(format!("{:?}", e)))
    }

    /// Pair count and dimension, read without copying the matrices.
    pub fn summary(&self) -> StorageResult<RecordSummary> {
        let archived = self.access()?;
        Ok(RecordSummary {
            pairs: archived.labels.len(),
            dim: archived.dim.to_native() as usize,
            sealed: archived.digest != UNSEALED_DIGEST,
        })
    }

    /// Copies the record out of the mapping and checks its digest.
    ///
    /// Unsealed records are returned as-is.
    pub fn to_record(&self) -> StorageResult<FeatureRecord> {
        let archived = self.access()?;
        let record = rkyv::deserialize::<FeatureRecord, RkyvError>(archived)
            .map_err(|e| StorageError::ValidationFailed(format!("{:?}", e)))?;

        if record.is_sealed() && !record.verify_digest() {
            return Err(StorageError::ChecksumMismatch {
                path: self.path.to_path_buf(),
            });
        }

        Ok(record)
    }
}

/// Cheap metadata of a mapped record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSummary {
    pub pairs: usize,
    pub dim: usize,
    pub sealed: bool,
}
