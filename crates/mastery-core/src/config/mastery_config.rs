//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{BatchConfig, PriorConfig, SolverConfig, ThresholdConfig};
use crate::errors::ConfigError;
use crate::types::{EngineSettings, PriorParameters, SolverSettings, Thresholds};

/// Project config file name looked up in the config directory.
pub const PROJECT_CONFIG_FILE: &str = "mastery.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`MASTERY_*`)
/// 3. Project config (`mastery.toml` in the config directory)
/// 4. User config (`~/.mastery/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MasteryConfig {
    pub prior: PriorConfig,
    pub thresholds: ThresholdConfig,
    pub solver: SolverConfig,
    pub batch: BatchConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub alpha_prior: Option<f64>,
    pub beta_prior: Option<f64>,
    pub familiar: Option<f64>,
    pub proficient: Option<f64>,
    pub confidence: Option<f64>,
    pub threads: Option<usize>,
    pub fail_fast: Option<bool>,
}

impl MasteryConfig {
    /// Load configuration with layered resolution rooted at `root`.
    ///
    /// Fails before any record is processed if a layer cannot be parsed or
    /// the merged result does not validate.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
                tracing::debug!(path = %user_config_path.display(), "merged user config");
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            tracing::debug!(path = %project_config_path.display(), "merged project config");
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &MasteryConfig) -> Result<(), ConfigError> {
        if config.batch.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "batch.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        config.resolve().map(|_| ())
    }

    /// Turn the effective values into validated engine settings.
    pub fn resolve(&self) -> Result<EngineSettings, ConfigError> {
        Ok(EngineSettings {
            prior: PriorParameters::new(self.prior.effective_alpha(), self.prior.effective_beta())?,
            thresholds: Thresholds::new(
                self.thresholds.effective_familiar(),
                self.thresholds.effective_proficient(),
                self.thresholds.effective_confidence(),
            )?,
            solver: SolverSettings::new(
                self.solver.effective_tolerance(),
                self.solver.effective_max_iterations(),
            )?,
        })
    }

    /// Returns the user config path: `~/.mastery/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".mastery").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut MasteryConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: MasteryConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a `Some` value.
    fn merge(base: &mut MasteryConfig, other: &MasteryConfig) {
        overlay(&mut base.prior.alpha, other.prior.alpha);
        overlay(&mut base.prior.beta, other.prior.beta);

        overlay(&mut base.thresholds.familiar, other.thresholds.familiar);
        overlay(&mut base.thresholds.proficient, other.thresholds.proficient);
        overlay(&mut base.thresholds.confidence, other.thresholds.confidence);

        overlay(&mut base.solver.tolerance, other.solver.tolerance);
        overlay(&mut base.solver.max_iterations, other.solver.max_iterations);

        overlay(&mut base.batch.threads, other.batch.threads);
        overlay(&mut base.batch.fail_fast, other.batch.fail_fast);
    }

    /// Apply environment variable overrides.
    /// Pattern: `MASTERY_PRIOR_ALPHA`, `MASTERY_THRESHOLDS_CONFIDENCE`, etc.
    fn apply_env_overrides(config: &mut MasteryConfig) -> Result<(), ConfigError> {
        env_override("MASTERY_PRIOR_ALPHA", &mut config.prior.alpha)?;
        env_override("MASTERY_PRIOR_BETA", &mut config.prior.beta)?;
        env_override("MASTERY_THRESHOLDS_FAMILIAR", &mut config.thresholds.familiar)?;
        env_override("MASTERY_THRESHOLDS_PROFICIENT", &mut config.thresholds.proficient)?;
        env_override("MASTERY_THRESHOLDS_CONFIDENCE", &mut config.thresholds.confidence)?;
        env_override("MASTERY_SOLVER_TOLERANCE", &mut config.solver.tolerance)?;
        env_override("MASTERY_SOLVER_MAX_ITERATIONS", &mut config.solver.max_iterations)?;
        env_override("MASTERY_BATCH_THREADS", &mut config.batch.threads)?;
        env_override("MASTERY_BATCH_FAIL_FAST", &mut config.batch.fail_fast)?;
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut MasteryConfig, cli: &CliOverrides) {
        overlay(&mut config.prior.alpha, cli.alpha_prior);
        overlay(&mut config.prior.beta, cli.beta_prior);
        overlay(&mut config.thresholds.familiar, cli.familiar);
        overlay(&mut config.thresholds.proficient, cli.proficient);
        overlay(&mut config.thresholds.confidence, cli.confidence);
        overlay(&mut config.batch.threads, cli.threads);
        overlay(&mut config.batch.fail_fast, cli.fail_fast);
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// The config with every default filled in, for display.
    pub fn effective(&self) -> MasteryConfig {
        MasteryConfig {
            prior: PriorConfig {
                alpha: Some(self.prior.effective_alpha()),
                beta: Some(self.prior.effective_beta()),
            },
            thresholds: ThresholdConfig {
                familiar: Some(self.thresholds.effective_familiar()),
                proficient: Some(self.thresholds.effective_proficient()),
                confidence: Some(self.thresholds.effective_confidence()),
            },
            solver: SolverConfig {
                tolerance: Some(self.solver.effective_tolerance()),
                max_iterations: Some(self.solver.effective_max_iterations()),
            },
            batch: BatchConfig {
                threads: self.batch.threads,
                fail_fast: Some(self.batch.effective_fail_fast()),
            },
        }
    }
}

fn overlay<T>(base: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *base = other;
    }
}

fn env_override<T: FromStr>(key: &str, slot: &mut Option<T>) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var(key) {
        let parsed = val.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            field: key.to_string(),
            message: format!("cannot parse {val:?}"),
        })?;
        *slot = Some(parsed);
    }
    Ok(())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
