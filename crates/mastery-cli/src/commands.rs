//! Command runners. Each takes a resolved [`MasteryConfig`] and reports
//! failures as [`PipelineError`]; `main` decides the exit status.

use std::io::Write;

use mastery_analysis::engine::tier_counts;
use mastery_analysis::{MasteryClassifier, MasteryGrid};
use mastery_core::errors::{MasteryErrorCode, PipelineError, SinkError};
use mastery_core::MasteryConfig;

use crate::cli::{ClassifyArgs, GridArgs};
use crate::io::{open_output, read_observations, write_grid, write_records};

/// What a `classify` run produced.
#[derive(Debug, Default)]
pub struct ClassifyOutcome {
    /// Records written to the sink.
    pub written: usize,
    /// Rows rejected by the source or the engine, in file order.
    pub rejected: Vec<PipelineError>,
}

/// Build a classifier from the resolved configuration.
pub fn build_classifier(config: &MasteryConfig) -> Result<MasteryClassifier, PipelineError> {
    let classifier = MasteryClassifier::new(config.resolve()?);
    match config.batch.threads {
        Some(threads) => Ok(classifier.with_threads(threads)?),
        None => Ok(classifier),
    }
}

/// Read observations, classify them, write the results.
///
/// Parse and engine rejections are merged by CSV line. In fail-fast mode
/// the earliest rejected row aborts the run before anything is written.
/// Otherwise rejected rows are logged and returned while the valid ones
/// are still written.
pub fn classify(
    args: &ClassifyArgs,
    config: &MasteryConfig,
) -> Result<ClassifyOutcome, PipelineError> {
    let classifier = build_classifier(config)?;
    let fail_fast = config.batch.effective_fail_fast();

    let batch = read_observations(&args.input)?;
    let outcomes = classifier.classify_each(&batch.observations);

    let mut records = Vec::with_capacity(batch.observations.len());
    let mut rejected: Vec<PipelineError> = Vec::new();
    let mut parse_errors = batch.rejected.into_iter().peekable();

    for ((observation, &line), outcome) in batch
        .observations
        .iter()
        .zip(&batch.lines)
        .zip(outcomes)
    {
        while let Some(error) = parse_errors.next_if(|e| e.line().unwrap_or(0) < line) {
            reject(error.into(), fail_fast, &mut rejected)?;
        }
        match outcome {
            Ok(record) => records.push(record),
            Err(error) => reject(
                PipelineError::record(observation.group_id.clone(), error),
                fail_fast,
                &mut rejected,
            )?,
        }
    }
    for error in parse_errors {
        reject(error.into(), fail_fast, &mut rejected)?;
    }

    let mut writer = open_output(&args.output)?;
    write_records(&mut writer, &records, args.format)?;
    flush(&mut writer, &args.output)?;

    tracing::info!(
        output = %args.output.display(),
        written = records.len(),
        rejected = rejected.len(),
        counts = ?tier_counts(records.iter().map(|r| r.label)),
        "wrote classifications"
    );

    Ok(ClassifyOutcome {
        written: records.len(),
        rejected,
    })
}

fn reject(
    error: PipelineError,
    fail_fast: bool,
    rejected: &mut Vec<PipelineError>,
) -> Result<(), PipelineError> {
    if fail_fast {
        return Err(error);
    }
    tracing::warn!(
        group_id = error.group_id().unwrap_or("<unknown>"),
        code = error.error_code(),
        %error,
        "row rejected"
    );
    rejected.push(error);
    Ok(())
}

/// Compute and write the mastery grid.
pub fn grid(args: &GridArgs, config: &MasteryConfig) -> Result<MasteryGrid, PipelineError> {
    let classifier = build_classifier(config)?;
    let grid = MasteryGrid::compute(args.max_attempts, &classifier)?;

    let mut writer = open_output(&args.output)?;
    write_grid(&mut writer, &grid, args.format)?;
    flush(&mut writer, &args.output)?;

    tracing::info!(
        output = %args.output.display(),
        cells = grid.len(),
        counts = ?grid.tier_counts(),
        "saved mastery grid"
    );
    Ok(grid)
}

/// Render the effective configuration.
pub fn show_config(config: &MasteryConfig) -> Result<String, PipelineError> {
    Ok(config.effective().to_toml()?)
}

fn flush(writer: &mut dyn Write, path: &std::path::Path) -> Result<(), SinkError> {
    writer.flush().map_err(|e| SinkError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
