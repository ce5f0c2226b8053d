//! Persisted feature records (rkyv files, mmap reads, JSON import).
//!
//! The feature extractor writes one [`FeatureRecord`] per evaluated model
//! checkpoint. Records are written atomically (temp file, `fsync`, rename) and
//! read back through a read-only memory map with rkyv validation and a BLAKE3
//! content digest check.

pub mod error;
pub mod json;
pub mod mmap;
pub mod record;


pub use error::{StorageError, StorageResult};
pub use json::JsonFeatureRecord;
pub use mmap::{RecordHandle, RecordSummary};
pub use record::{ArchivedFeatureRecord, FeatureRecord, UNSEALED_DIGEST, record_digest};

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use rkyv::rancor::Error as RkyvError;
use rkyv::to_bytes;
use tracing::{debug, warn};

use crate::features::FeaturePairSet;

pub const RKYV_EXTENSION: &str = "rkyv";

const TEMP_EXTENSION: &str = "rkyv.tmp";

/// Writes `record` to `path` atomically and returns a mapped handle to it.
pub fn write_record<P: AsRef<Path>>(path: P, record: &FeatureRecord) -> StorageResult<RecordHandle> {
    let path = path.as_ref();
    let bytes =
        to_bytes::<RkyvError>(record).map_err(|e| StorageError::Serialization(format!("{:?}", e)))?;

    let temp_path = path.with_extension(TEMP_EXTENSION);
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)?;

    debug!(path = %path.display(), bytes = bytes.len(), pairs = record.len(), "Wrote feature record");

    RecordHandle::open(path)
}

/// Reads a record file and returns its validated pair set.
pub fn read_pair_set<P: AsRef<Path>>(path: P) -> StorageResult<FeaturePairSet> {
    let handle = RecordHandle::open(path)?;
    let record = handle.to_record()?;
    if !record.is_sealed() {
        warn!(path = %handle.path().display(), "Feature record has no digest; skipping integrity check");
    }
    record.into_pair_set()
}

/// Reads a JSON record file and returns its validated pair set.
pub fn read_json_pair_set<P: AsRef<Path>>(path: P) -> StorageResult<FeaturePairSet> {
    let file = File::open(path)?;
    JsonFeatureRecord::from_reader(BufReader::new(file))?
        .into_record()?
        .into_pair_set()
}

/// Directory of named feature records (`<root>/<name>.rkyv`).
#[derive(Debug, Clone)]
pub struct FeatureStore {
    root: PathBuf,
}

impl FeatureStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_root(&self) -> StorageResult<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    pub fn record_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, RKYV_EXTENSION))
    }

    /// Stores `pairs` under `name`, replacing any previous record.
    pub fn store(&self, name: &str, pairs: &FeaturePairSet) -> StorageResult<RecordHandle> {
        self.ensure_root()?;
        let record = FeatureRecord::from_pair_set(pairs)?;
        write_record(self.record_path(name), &record)
    }

    pub fn open(&self, name: &str) -> StorageResult<RecordHandle> {
        let path = self.record_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound {
                name: name.to_string(),
            });
        }
        RecordHandle::open(path)
    }

    pub fn load(&self, name: &str) -> StorageResult<FeaturePairSet> {
        let path = self.record_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound {
                name: name.to_string(),
            });
        }
        read_pair_set(path)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.record_path(name).exists()
    }

    /// Record names in lexicographic order (e.g. `epoch-001`, `epoch-002`, ...).
    pub fn list(&self) -> StorageResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if let Some(ext) = path.extension()
                && ext == RKYV_EXTENSION
                && let Some(stem) = path.file_stem()
                && let Some(name) = stem.to_str()
            {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}
