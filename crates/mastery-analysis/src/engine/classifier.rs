//! Per-record and batch classification under one fixed configuration.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use mastery_core::errors::{
    ConfigError, EngineError, MasteryErrorCode, PipelineError, PipelineResult,
};
use mastery_core::types::{EngineSettings, GroupObservation};

use super::types::{tier_counts, ClassifiedRecord};
use crate::posterior::{self, PosteriorResult};

/// Classifies observations against a validated [`EngineSettings`].
///
/// Holds only immutable state, so one instance can be shared across
/// threads. Batch work runs on rayon's global pool unless a dedicated pool
/// was requested with [`MasteryClassifier::with_threads`].
#[derive(Clone)]
pub struct MasteryClassifier {
    settings: EngineSettings,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl MasteryClassifier {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            pool: None,
        }
    }

    /// Classifier with the documented default prior and thresholds.
    pub fn with_defaults() -> Self {
        Self::new(EngineSettings::default())
    }

    /// Run batch and grid work on a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Result<Self, ConfigError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("mastery-worker-{i}"))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "batch.threads".to_string(),
                message: e.to_string(),
            })?;
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Evaluate raw counts. Used directly by the grid driver.
    pub fn evaluate(&self, attempts: u64, successes: u64) -> Result<PosteriorResult, EngineError> {
        posterior::evaluate(
            &self.settings.prior,
            attempts,
            successes,
            &self.settings.thresholds,
            &self.settings.solver,
        )
    }

    /// Classify one observation.
    pub fn classify(&self, observation: &GroupObservation) -> Result<ClassifiedRecord, EngineError> {
        let result = self.evaluate(observation.attempts, observation.successes)?;
        Ok(ClassifiedRecord::new(observation, result))
    }

    /// Classify a batch in parallel, skipping and collecting failed records.
    ///
    /// `data` keeps the input order of the records that succeeded; `errors`
    /// keeps the input order of the ones that did not.
    pub fn classify_batch(
        &self,
        observations: &[GroupObservation],
    ) -> PipelineResult<Vec<ClassifiedRecord>> {
        let started = Instant::now();
        let outcomes = self.classify_each(observations);

        let mut result = PipelineResult::new(Vec::with_capacity(observations.len()));
        for (observation, outcome) in observations.iter().zip(outcomes) {
            match outcome {
                Ok(record) => result.data.push(record),
                Err(error) => {
                    tracing::warn!(
                        group_id = %observation.group_id,
                        code = error.error_code(),
                        %error,
                        "record rejected"
                    );
                    result.add_error(PipelineError::record(observation.group_id.clone(), error));
                }
            }
        }

        let counts = tier_counts(result.data.iter().map(|r| r.label));
        tracing::info!(
            records = observations.len(),
            classified = result.data.len(),
            rejected = result.error_count(),
            ?counts,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch classified"
        );
        result
    }

    /// Classify a batch in parallel, failing on the first rejected record
    /// in input order.
    pub fn classify_batch_strict(
        &self,
        observations: &[GroupObservation],
    ) -> Result<Vec<ClassifiedRecord>, PipelineError> {
        let outcomes = self.classify_each(observations);
        observations
            .iter()
            .zip(outcomes)
            .map(|(observation, outcome)| {
                outcome.map_err(|e| PipelineError::record(observation.group_id.clone(), e))
            })
            .collect()
    }

    /// Run `op` on the dedicated pool if there is one.
    pub(crate) fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Classify every observation in parallel, returning one outcome per
    /// input in input order.
    pub fn classify_each(
        &self,
        observations: &[GroupObservation],
    ) -> Vec<Result<ClassifiedRecord, EngineError>> {
        self.install(|| {
            observations
                .par_iter()
                .map(|observation| self.classify(observation))
                .collect()
        })
    }
}

impl std::fmt::Debug for MasteryClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasteryClassifier")
            .field("settings", &self.settings)
            .field("threads", &self.pool.as_ref().map(|p| p.current_num_threads()))
            .finish()
    }
}
