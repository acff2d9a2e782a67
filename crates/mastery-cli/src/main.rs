//! mastery - Beta-Binomial mastery classifier.
//!
//! `mastery classify` reads `group_id,attempts,successes` rows and writes one
//! classified record per valid row; `mastery grid` writes the label of every
//! `(attempts, successes)` pair up to a maximum; `mastery config` prints the
//! resolved configuration.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use mastery_cli::cli::{Cli, Command};
use mastery_cli::commands;
use mastery_core::errors::MasteryErrorCode;
use mastery_core::tracing::init_tracing;
use mastery_core::MasteryConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Configuration errors surface once, before any record is read.
    let config = MasteryConfig::load(&cli.config_dir, Some(&cli.overrides()))
        .map_err(|e| anyhow::anyhow!(e.report_string()))
        .context("failed to resolve configuration")?;

    match &cli.command {
        Command::Classify(args) => {
            let outcome = commands::classify(args, &config)
                .map_err(|e| anyhow::anyhow!(e.report_string()))?;
            info!(
                "Wrote {} classifications to {}",
                outcome.written,
                args.output.display()
            );
            if !outcome.rejected.is_empty() {
                for error in &outcome.rejected {
                    eprintln!("{}", error.report_string());
                }
                bail!("{} record(s) rejected", outcome.rejected.len());
            }
        }
        Command::Grid(args) => {
            let grid = commands::grid(args, &config)
                .map_err(|e| anyhow::anyhow!(e.report_string()))?;
            info!(
                "Saved mastery grid ({} cells) to {}",
                grid.len(),
                args.output.display()
            );
        }
        Command::Config => {
            let rendered = commands::show_config(&config)
                .map_err(|e| anyhow::anyhow!(e.report_string()))?;
            print!("{rendered}");
        }
    }

    Ok(())
}
