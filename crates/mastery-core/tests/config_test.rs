//! Tests for the mastery configuration system.

use std::sync::Mutex;

use mastery_core::config::{CliOverrides, MasteryConfig};
use mastery_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const MASTERY_ENV_VARS: [&str; 9] = [
    "MASTERY_PRIOR_ALPHA",
    "MASTERY_PRIOR_BETA",
    "MASTERY_THRESHOLDS_FAMILIAR",
    "MASTERY_THRESHOLDS_PROFICIENT",
    "MASTERY_THRESHOLDS_CONFIDENCE",
    "MASTERY_SOLVER_TOLERANCE",
    "MASTERY_SOLVER_MAX_ITERATIONS",
    "MASTERY_BATCH_THREADS",
    "MASTERY_BATCH_FAIL_FAST",
];

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear MASTERY_ env vars and point HOME at an empty directory so a real
/// user config cannot leak into the test.
fn isolate_env(home: &std::path::Path) {
    for key in MASTERY_ENV_VARS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".mastery")).unwrap();
    std::fs::write(
        home.path().join(".mastery/config.toml"),
        r#"
[prior]
alpha = 1.0
beta = 1.0

[thresholds]
confidence = 0.9
"#,
    )
    .unwrap();

    let project = tempdir();
    std::fs::write(
        project.path().join("mastery.toml"),
        r#"
[prior]
alpha = 3.0

[thresholds]
familiar = 0.25
proficient = 0.6
"#,
    )
    .unwrap();

    std::env::set_var("MASTERY_THRESHOLDS_PROFICIENT", "0.7");

    let cli = CliOverrides {
        familiar: Some(0.35),
        ..Default::default()
    };

    let config = MasteryConfig::load(project.path(), Some(&cli)).unwrap();

    // Project overrides user
    assert_eq!(config.prior.alpha, Some(3.0));
    // User survives where nothing overrides it
    assert_eq!(config.prior.beta, Some(1.0));
    assert_eq!(config.thresholds.confidence, Some(0.9));
    // Env overrides project
    assert_eq!(config.thresholds.proficient, Some(0.7));
    // CLI overrides project
    assert_eq!(config.thresholds.familiar, Some(0.35));

    isolate_env(home.path());
}

#[test]
fn test_load_missing_files_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = MasteryConfig::load(dir.path(), None).unwrap();
    let settings = config.resolve().unwrap();

    assert_eq!(settings.prior.alpha, 2.0);
    assert_eq!(settings.prior.beta, 2.0);
    assert_eq!(settings.thresholds.familiar, 0.3);
    assert_eq!(settings.thresholds.proficient, 0.5);
    assert_eq!(settings.thresholds.confidence, 0.8);
    assert!(!config.batch.effective_fail_fast());
}

#[test]
fn test_invalid_env_value_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("MASTERY_PRIOR_ALPHA", "two");
    let dir = tempdir();
    let err = MasteryConfig::load(dir.path(), None).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "MASTERY_PRIOR_ALPHA"),
        "unexpected error: {err:?}"
    );

    isolate_env(home.path());
}

#[test]
fn test_non_monotonic_thresholds_fail_fast() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let cli = CliOverrides {
        familiar: Some(0.8),
        proficient: Some(0.4),
        ..Default::default()
    };
    let err = MasteryConfig::load(dir.path(), Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("mastery.toml"), "[prior\nalpha = ").unwrap();
    let err = MasteryConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_from_toml_and_validate() {
    let config = MasteryConfig::from_toml(
        r#"
[thresholds]
confidence = 1.0
"#,
    )
    .unwrap();
    assert!(MasteryConfig::validate(&config).is_err());

    let config = MasteryConfig::from_toml("[batch]\nthreads = 0\n").unwrap();
    assert!(MasteryConfig::validate(&config).is_err());

    let config = MasteryConfig::from_toml("[solver]\nmax_iterations = 500\n").unwrap();
    assert!(MasteryConfig::validate(&config).is_ok());
    assert_eq!(config.resolve().unwrap().solver.max_iterations, 500);
}

#[test]
fn test_to_toml_round_trip() {
    let config = MasteryConfig::from_toml(
        r#"
[prior]
alpha = 1.5

[batch]
fail_fast = true
"#,
    )
    .unwrap();

    let effective = config.effective();
    let text = effective.to_toml().unwrap();
    let reparsed = MasteryConfig::from_toml(&text).unwrap();
    assert_eq!(reparsed, effective);
    assert_eq!(reparsed.prior.alpha, Some(1.5));
    assert_eq!(reparsed.prior.beta, Some(2.0));
    assert_eq!(reparsed.batch.fail_fast, Some(true));
}
