//! CSV and JSON sinks for classified records and mastery grids.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use mastery_analysis::{ClassifiedRecord, GridCell, MasteryGrid};
use mastery_core::errors::SinkError;

/// Output encodings understood by the sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Header row of field names, one line per record.
    #[default]
    Csv,
    /// Pretty-printed JSON array.
    Json,
}

/// Open `path` for writing, creating parent directories. `-` is stdout.
pub fn open_output(path: &Path) -> Result<Box<dyn Write>, SinkError> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    }
    let write_err = |e: std::io::Error| SinkError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let file = File::create(path).map_err(write_err)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Write classified records in input order.
pub fn write_records<W: Write>(
    writer: W,
    records: &[ClassifiedRecord],
    format: OutputFormat,
) -> Result<(), SinkError> {
    write_rows(writer, records, format)
}

/// Write every grid cell in `(attempts, successes)` order.
pub fn write_grid<W: Write>(
    writer: W,
    grid: &MasteryGrid,
    format: OutputFormat,
) -> Result<(), SinkError> {
    let cells: Vec<GridCell> = grid.cells().copied().collect();
    write_rows(writer, &cells, format)
}

fn write_rows<W: Write, T: Serialize>(
    mut writer: W,
    rows: &[T],
    format: OutputFormat,
) -> Result<(), SinkError> {
    match format {
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in rows {
                csv_writer
                    .serialize(row)
                    .map_err(|e| SinkError::Serialize(e.to_string()))?;
            }
            csv_writer
                .flush()
                .map_err(|e| SinkError::Serialize(e.to_string()))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, rows)
                .map_err(|e| SinkError::Serialize(e.to_string()))?;
            writer
                .write_all(b"\n")
                .and_then(|_| writer.flush())
                .map_err(|e| SinkError::Serialize(e.to_string()))?;
        }
    }
    Ok(())
}
