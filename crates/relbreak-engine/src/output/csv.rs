use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use relbreak_core::Individual;

use super::{CountingWriter, audit_row, redacted_row};
use crate::errors::EngineError;

/// Write records as CSV with a header row and stable column order.
pub fn write_records_csv(
    path: &Path,
    records: &[Individual],
    redact_original: bool,
) -> Result<u64, EngineError> {
    let writer = BufWriter::new(File::create(path)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(counting);

    for record in records {
        if redact_original {
            writer.serialize(redacted_row(record))?;
        } else {
            writer.serialize(audit_row(record))?;
        }
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}
