//! Pipeline errors and non-fatal error collection.

use super::error_code::MasteryErrorCode;
use super::{ConfigError, EngineError, SinkError, SourceError};

/// Errors that can occur while running a batch through the classifier.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Record {group_id}: {source}")]
    Record {
        group_id: String,
        #[source]
        source: EngineError,
    },

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// Attach a group id to an engine error.
    pub fn record(group_id: impl Into<String>, source: EngineError) -> Self {
        Self::Record {
            group_id: group_id.into(),
            source,
        }
    }

    /// The offending group, if the error is tied to one.
    pub fn group_id(&self) -> Option<&str> {
        match self {
            Self::Record { group_id, .. } => Some(group_id),
            Self::Source(e) => e.group_id(),
            _ => None,
        }
    }
}

impl MasteryErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Record { source, .. } => source.error_code(),
            Self::Engine(e) => e.error_code(),
            Self::Source(e) => e.error_code(),
            Self::Sink(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Result of a batch run that accumulates non-fatal errors.
/// Allows partial results to be returned even when some records fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run, in input order.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new pipeline result with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
