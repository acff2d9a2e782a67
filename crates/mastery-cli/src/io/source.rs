//! CSV observation source.
//!
//! Expects a header row containing `group_id`, `attempts` and `successes`
//! (any order, extra columns ignored). Every data row is validated into a
//! [`GroupObservation`] here, so the engine only ever sees typed records.

use std::fs::File;
use std::io::Read;
use std::num::IntErrorKind;
use std::path::Path;

use mastery_core::errors::{EngineError, SourceError};
use mastery_core::types::GroupObservation;

const GROUP_ID: &str = "group_id";
const ATTEMPTS: &str = "attempts";
const SUCCESSES: &str = "successes";

/// Positions of the required columns in the header.
#[derive(Debug, Clone, Copy)]
struct Columns {
    group_id: usize,
    attempts: usize,
    successes: usize,
}

/// Streaming reader that yields one validated observation per data row.
pub struct CsvObservationSource<R: Read> {
    reader: csv::Reader<R>,
    columns: Columns,
}

/// Everything read from a source, split into usable and rejected rows.
#[derive(Debug, Default)]
pub struct ObservationBatch {
    /// Valid observations in file order.
    pub observations: Vec<GroupObservation>,
    /// CSV line of each entry in `observations`.
    pub lines: Vec<u64>,
    /// Rows that failed validation, in file order.
    pub rejected: Vec<SourceError>,
}

impl CsvObservationSource<File> {
    /// Open a CSV file and read its header.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvObservationSource<R> {
    /// Wrap any reader and read its header.
    pub fn from_reader(inner: R) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(inner);

        let headers = reader
            .headers()
            .map_err(|e| SourceError::MalformedRow {
                line: 1,
                message: format!("failed to read header: {e}"),
            })?
            .clone();

        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SourceError::MalformedRow {
                    line: 1,
                    message: format!(
                        "missing column {name:?}; found {:?}",
                        headers.iter().collect::<Vec<_>>()
                    ),
                })
        };

        let columns = Columns {
            group_id: find(GROUP_ID)?,
            attempts: find(ATTEMPTS)?,
            successes: find(SUCCESSES)?,
        };

        Ok(Self { reader, columns })
    }

    /// Iterate rows, validating each one independently.
    pub fn observations(
        &mut self,
    ) -> impl Iterator<Item = Result<GroupObservation, SourceError>> + '_ {
        self.rows().map(|(_, row)| row)
    }

    /// Like [`observations`](Self::observations), paired with the CSV line
    /// each row starts on.
    pub fn rows(
        &mut self,
    ) -> impl Iterator<Item = (u64, Result<GroupObservation, SourceError>)> + '_ {
        let columns = self.columns;
        self.reader.records().map(move |row| {
            let position = match &row {
                Ok(record) => record.position(),
                Err(e) => e.position(),
            };
            let line = position.map(|p| p.line()).unwrap_or(0);
            (line, parse_row(row, columns))
        })
    }
}

/// Read a whole CSV file, keeping valid rows and collecting rejected ones.
pub fn read_observations(path: &Path) -> Result<ObservationBatch, SourceError> {
    let mut source = CsvObservationSource::open(path)?;
    let mut batch = ObservationBatch::default();
    for (line, row) in source.rows() {
        match row {
            Ok(observation) => {
                batch.observations.push(observation);
                batch.lines.push(line);
            }
            Err(error) => batch.rejected.push(error),
        }
    }
    tracing::debug!(
        path = %path.display(),
        rows = batch.observations.len() + batch.rejected.len(),
        rejected = batch.rejected.len(),
        "observations read"
    );
    Ok(batch)
}

fn parse_row(
    row: Result<csv::StringRecord, csv::Error>,
    columns: Columns,
) -> Result<GroupObservation, SourceError> {
    let row = row.map_err(|e| SourceError::MalformedRow {
        line: e.position().map(|p| p.line()).unwrap_or(0),
        message: e.to_string(),
    })?;
    let line = row.position().map(|p| p.line()).unwrap_or(0);

    let group_id = row.get(columns.group_id).unwrap_or_default().to_string();
    if group_id.is_empty() {
        return Err(SourceError::MalformedRow {
            line,
            message: "empty group_id".to_string(),
        });
    }

    let invalid = |field: &'static str, message: String| SourceError::InvalidField {
        line,
        group_id: group_id.clone(),
        field,
        message,
    };

    let attempts = parse_count(row.get(columns.attempts)).map_err(|m| invalid(ATTEMPTS, m))?;
    let successes = parse_count(row.get(columns.successes)).map_err(|m| invalid(SUCCESSES, m))?;

    GroupObservation::try_new(group_id.clone(), attempts, successes).map_err(|e| match e {
        EngineError::InvalidInput { field, message } => invalid(field, message),
        other => invalid("record", other.to_string()),
    })
}

/// Integer counts; whole-valued floats such as `7.0` are accepted as well.
/// Values outside the `i64` range are rejected rather than clamped.
fn parse_count(raw: Option<&str>) -> Result<i64, String> {
    let raw = raw.ok_or_else(|| "missing value".to_string())?;
    match raw.parse::<i64>() {
        Ok(value) => return Ok(value),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(format!("out of range: {raw:?}"));
        }
        Err(_) => {}
    }
    match raw.parse::<f64>() {
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
        Ok(value) if value >= i64::MIN as f64 && value < i64::MAX as f64 => {
            if value.fract() == 0.0 {
                Ok(value as i64)
            } else {
                Err(format!("not an integer: {raw:?}"))
            }
        }
        Ok(value) if value.is_finite() => Err(format!("out of range: {raw:?}")),
        _ => Err(format!("not an integer: {raw:?}")),
    }
}
