//! Error handling for the mastery classifier.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod io_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::MasteryErrorCode;
pub use io_error::{SinkError, SourceError};
pub use pipeline_error::{PipelineError, PipelineResult};
