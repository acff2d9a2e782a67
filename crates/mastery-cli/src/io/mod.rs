//! Record source and sinks.

pub mod sink;
pub mod source;

pub use sink::{open_output, write_grid, write_records, OutputFormat};
pub use source::{read_observations, CsvObservationSource, ObservationBatch};
