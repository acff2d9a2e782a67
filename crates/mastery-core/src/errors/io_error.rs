//! Record source and sink errors.

use super::error_code::{self, MasteryErrorCode};

/// Errors reading observation records from an external source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Cannot open {path}: {message}")]
    Open { path: String, message: String },

    #[error("Malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("Invalid {field} for group {group_id} at line {line}: {message}")]
    InvalidField {
        line: u64,
        group_id: String,
        field: &'static str,
        message: String,
    },
}

impl SourceError {
    /// The group the error belongs to, when the row was readable far enough.
    pub fn group_id(&self) -> Option<&str> {
        match self {
            Self::InvalidField { group_id, .. } => Some(group_id),
            _ => None,
        }
    }

    /// CSV line the error was raised on; `None` for errors about the whole source.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedRow { line, .. } | Self::InvalidField { line, .. } => Some(*line),
            Self::Open { .. } => None,
        }
    }
}

impl MasteryErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        error_code::SOURCE_ERROR
    }
}

/// Errors writing classified records or grids to an external sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Cannot write {path}: {message}")]
    Write { path: String, message: String },

    #[error("Serialization failed: {0}")]
    Serialize(String),
}

impl MasteryErrorCode for SinkError {
    fn error_code(&self) -> &'static str {
        error_code::SINK_ERROR
    }
}
