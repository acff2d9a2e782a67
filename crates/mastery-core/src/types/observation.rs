//! Validated input record.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// One group's attempt/success counts.
///
/// Counts are unsigned, and the only constructor from untyped data checks
/// `successes <= attempts`, so the engine never sees a negative or
/// inconsistent observation coming out of a record source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupObservation {
    pub group_id: String,
    pub attempts: u64,
    pub successes: u64,
}

impl GroupObservation {
    /// Build an observation from already-unsigned counts.
    pub fn new(
        group_id: impl Into<String>,
        attempts: u64,
        successes: u64,
    ) -> Result<Self, EngineError> {
        if successes > attempts {
            return Err(EngineError::invalid(
                "successes",
                format!("successes ({successes}) exceeds attempts ({attempts})"),
            ));
        }
        Ok(Self {
            group_id: group_id.into(),
            attempts,
            successes,
        })
    }

    /// Build an observation from signed counts as read from a loosely typed source.
    pub fn try_new(
        group_id: impl Into<String>,
        attempts: i64,
        successes: i64,
    ) -> Result<Self, EngineError> {
        let attempts = u64::try_from(attempts).map_err(|_| {
            EngineError::invalid("attempts", format!("must be non-negative, got {attempts}"))
        })?;
        let successes = u64::try_from(successes).map_err(|_| {
            EngineError::invalid("successes", format!("must be non-negative, got {successes}"))
        })?;
        Self::new(group_id, attempts, successes)
    }

    /// Observed failures, `attempts - successes`.
    pub fn failures(&self) -> u64 {
        self.attempts.saturating_sub(self.successes)
    }
}
