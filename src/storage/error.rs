use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::features::InputError;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot map empty record file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("record not found: {name}")]
    NotFound { name: String },

    #[error("rkyv serialization failed: {0}")]
    Serialization(String),

    #[error("rkyv validation failed: {0}")]
    ValidationFailed(String),

    #[error("record data at {path} is not aligned to {alignment} bytes")]
    AlignmentError { path: PathBuf, alignment: usize },

    #[error("record digest mismatch (file corrupted or modified): {path}")]
    ChecksumMismatch { path: PathBuf },

    #[error("JSON record is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} row {row} has {actual} values, expected {expected}")]
    RaggedRows {
        field: &'static str,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("record value out of range: {0}")]
    OutOfRange(String),

    #[error("record violates the input contract: {0}")]
    Input(#[from] InputError),
}

pub type StorageResult<T> = Result<T, StorageError>;
