//! MasteryErrorCode trait for machine-readable error reporting.

/// Every error enum implements this to expose a stable code string,
/// so callers can branch on the error kind without matching on messages.
pub trait MasteryErrorCode {
    /// Returns the error code string (e.g., "INVALID_INPUT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const NUMERICAL_ERROR: &str = "NUMERICAL_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SOURCE_ERROR: &str = "SOURCE_ERROR";
pub const SINK_ERROR: &str = "SINK_ERROR";
