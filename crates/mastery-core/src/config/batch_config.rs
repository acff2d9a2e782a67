//! Batch driver configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads for batch and grid runs. Default: rayon's global pool.
    pub threads: Option<usize>,
    /// Abort on the first rejected record instead of skipping it. Default: false.
    pub fail_fast: Option<bool>,
}

impl BatchConfig {
    pub fn effective_fail_fast(&self) -> bool {
        self.fail_fast.unwrap_or(false)
    }
}
