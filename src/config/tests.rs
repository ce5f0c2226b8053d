use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_verifold_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("VERIFOLD_FOLDS");
        env::remove_var("VERIFOLD_THRESHOLD_STEPS");
        env::remove_var("VERIFOLD_FEATURE_PATHS");
        env::remove_var("VERIFOLD_PARALLEL");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.fold_count, 10);
    assert_eq!(config.threshold_steps, 10_000);
    assert!(config.feature_paths.is_empty());
    assert!(config.parallel);
}

#[test]
fn test_eval_settings() {
    let config = Config {
        fold_count: 5,
        threshold_steps: 100,
        ..Default::default()
    };
    let settings = config.eval_settings();
    assert_eq!(settings.fold_count, 5);
    assert_eq!(settings.threshold_steps, 100);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_verifold_env();

    let config = Config::from_env().expect("should parse with defaults");
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_verifold_env();

    let config = with_env_vars(
        &[
            ("VERIFOLD_FOLDS", "5"),
            ("VERIFOLD_THRESHOLD_STEPS", " 2000 "),
            ("VERIFOLD_FEATURE_PATHS", "a.rkyv, b.json,,"),
            ("VERIFOLD_PARALLEL", "no"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.fold_count, 5);
    assert_eq!(config.threshold_steps, 2000);
    assert_eq!(
        config.feature_paths,
        vec![PathBuf::from("a.rkyv"), PathBuf::from("b.json")]
    );
    assert!(!config.parallel);
}

#[test]
#[serial]
fn test_from_env_invalid_number() {
    clear_verifold_env();

    let result = with_env_vars(&[("VERIFOLD_FOLDS", "ten")], Config::from_env);
    assert!(matches!(
        result,
        Err(ConfigError::ParseError {
            name: "VERIFOLD_FOLDS",
            ..
        })
    ));

    let result = with_env_vars(&[("VERIFOLD_THRESHOLD_STEPS", "-1")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
#[serial]
fn test_from_env_invalid_bool() {
    clear_verifold_env();

    let result = with_env_vars(&[("VERIFOLD_PARALLEL", "maybe")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidBool { .. })));
}

#[test]
fn test_validate_default() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_fold_count() {
    let config = Config {
        fold_count: 1,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidFoldCount { value: 1, min: 2 })
    ));
}

#[test]
fn test_validate_threshold_steps() {
    let config = Config {
        threshold_steps: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidThresholdSteps { value: 0 })
    ));
}

#[test]
fn test_validate_missing_feature_path() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let present = dir.path().join("present.rkyv");
    std::fs::write(&present, b"x").expect("write");
    let missing = dir.path().join("missing.rkyv");

    let config = Config {
        feature_paths: vec![present.clone()],
        ..Default::default()
    };
    assert!(config.validate().is_ok());

    let config = Config {
        feature_paths: vec![present, missing.clone()],
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { path }) if path == missing
    ));
}
