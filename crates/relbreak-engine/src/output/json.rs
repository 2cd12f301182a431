use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use relbreak_core::Individual;

use super::{CountingWriter, audit_row, redacted_row};
use crate::errors::EngineError;

/// Write records as a pretty-printed JSON array.
pub fn write_records_json(
    path: &Path,
    records: &[Individual],
    redact_original: bool,
) -> Result<u64, EngineError> {
    let mut writer = CountingWriter::new(BufWriter::new(File::create(path)?));
    if redact_original {
        let rows: Vec<_> = records.iter().map(redacted_row).collect();
        serde_json::to_writer_pretty(&mut writer, &rows)?;
    } else {
        let rows: Vec<_> = records.iter().map(audit_row).collect();
        serde_json::to_writer_pretty(&mut writer, &rows)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(writer.bytes_written())
}
