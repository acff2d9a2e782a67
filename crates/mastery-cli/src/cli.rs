//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use mastery_core::config::CliOverrides;

use crate::io::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "mastery",
    version,
    about = "Classify grouped attempt/success counts into mastery tiers with a Beta-Binomial model"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Directory searched for `mastery.toml`.
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    /// Worker threads for batch and grid runs.
    #[arg(long, global = true)]
    pub threads: Option<usize>,
}

/// Prior and threshold overrides shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct ModelArgs {
    /// Prior pseudo-successes (default 2.0).
    #[arg(long, global = true, alias = "alpha_prior")]
    pub alpha_prior: Option<f64>,

    /// Prior pseudo-failures (default 2.0).
    #[arg(long, global = true, alias = "beta_prior")]
    pub beta_prior: Option<f64>,

    /// Lower credible bound needed for "Familiar" (default 0.3).
    #[arg(long, global = true)]
    pub familiar: Option<f64>,

    /// Lower credible bound needed for "Proficient" (default 0.5).
    #[arg(long, global = true)]
    pub proficient: Option<f64>,

    /// Central credible interval mass, strictly between 0 and 1 (default 0.8).
    #[arg(long, global = true)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify every group in a CSV of `group_id,attempts,successes`.
    Classify(ClassifyArgs),
    /// Label every (attempts, successes) pair up to a maximum.
    Grid(GridArgs),
    /// Print the resolved configuration as TOML.
    Config,
}

#[derive(Debug, Clone, Args)]
pub struct ClassifyArgs {
    /// Input CSV.
    #[arg(long, default_value = "data/beta_binomial_examples.csv")]
    pub input: PathBuf,

    /// Output path, `-` for stdout.
    #[arg(long, default_value = "data/beta_binomial_classified.csv")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Stop at the first rejected record instead of skipping it.
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Largest attempt count in the grid.
    #[arg(long, alias = "max_attempts", default_value_t = 20)]
    pub max_attempts: u64,

    /// Output path, `-` for stdout.
    #[arg(long, alias = "out", default_value = "data/mastery_map.csv")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

impl Cli {
    /// Flags that take part in configuration resolution.
    pub fn overrides(&self) -> CliOverrides {
        let fail_fast = match &self.command {
            Command::Classify(args) if args.fail_fast => Some(true),
            _ => None,
        };
        CliOverrides {
            alpha_prior: self.model.alpha_prior,
            beta_prior: self.model.beta_prior,
            familiar: self.model.familiar,
            proficient: self.model.proficient,
            confidence: self.model.confidence,
            threads: self.threads,
            fail_fast,
        }
    }
}
