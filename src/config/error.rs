//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric environment variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    ParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A boolean environment variable was not one of the accepted spellings.
    #[error("invalid boolean {name}='{value}': expected true/false, 1/0, yes/no")]
    InvalidBool { name: &'static str, value: String },

    /// Fold count is too small to leave a training subset.
    #[error("invalid fold count {value}: must be at least {min}")]
    InvalidFoldCount { value: usize, min: usize },

    /// Threshold grid needs at least one step per side.
    #[error("invalid threshold steps {value}: must be at least 1")]
    InvalidThresholdSteps { value: u32 },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },
}
