//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERIFOLD_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_FOLD_COUNT, DEFAULT_THRESHOLD_STEPS, MIN_FOLD_COUNT};
use crate::evaluation::EvalSettings;

/// Evaluation configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERIFOLD_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of cross-validation folds. Default: `10`.
    pub fold_count: usize,

    /// Threshold grid half-resolution. Default: `10_000`.
    pub threshold_steps: u32,

    /// Feature records (`.rkyv` / `.json`) or record directories to evaluate.
    pub feature_paths: Vec<PathBuf>,

    /// Evaluate folds concurrently. Default: `true`.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fold_count: DEFAULT_FOLD_COUNT,
            threshold_steps: DEFAULT_THRESHOLD_STEPS,
            feature_paths: Vec::new(),
            parallel: true,
        }
    }
}

impl Config {
    const ENV_FOLDS: &'static str = "VERIFOLD_FOLDS";
    const ENV_THRESHOLD_STEPS: &'static str = "VERIFOLD_THRESHOLD_STEPS";
    const ENV_FEATURE_PATHS: &'static str = "VERIFOLD_FEATURE_PATHS";
    const ENV_PARALLEL: &'static str = "VERIFOLD_PARALLEL";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let fold_count = Self::parse_from_env(Self::ENV_FOLDS, defaults.fold_count)?;
        let threshold_steps =
            Self::parse_from_env(Self::ENV_THRESHOLD_STEPS, defaults.threshold_steps)?;
        let feature_paths = Self::parse_path_list_from_env(Self::ENV_FEATURE_PATHS);
        let parallel = Self::parse_bool_from_env(Self::ENV_PARALLEL, defaults.parallel)?;

        Ok(Self {
            fold_count,
            threshold_steps,
            feature_paths,
            parallel,
        })
    }

    /// Validates ranges and that every feature path exists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fold_count < MIN_FOLD_COUNT {
            return Err(ConfigError::InvalidFoldCount {
                value: self.fold_count,
                min: MIN_FOLD_COUNT,
            });
        }

        if self.threshold_steps == 0 {
            return Err(ConfigError::InvalidThresholdSteps {
                value: self.threshold_steps,
            });
        }

        if let Some(path) = self.feature_paths.iter().find(|p| !p.exists()) {
            return Err(ConfigError::PathNotFound { path: path.clone() });
        }

        Ok(())
    }

    /// Settings for [`Evaluator`](crate::evaluation::Evaluator).
    pub fn eval_settings(&self) -> EvalSettings {
        EvalSettings::new(self.fold_count, self.threshold_steps)
    }

    fn parse_from_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::ParseError {
                    name,
                    value,
                    source,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(name) {
            Ok(value) => match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool { name, value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_path_list_from_env(name: &str) -> Vec<PathBuf> {
        env::var(name)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}
