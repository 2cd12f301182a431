pub mod csv;
pub mod json;

use std::fmt;
use std::fs::create_dir_all;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use relbreak_core::{Error, Individual};

use crate::errors::EngineError;

/// Serialization format for the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        extension.parse().ok()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidArgument(format!(
                "unsupported output format '{other}'"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for writing the final record set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputOptions {
    pub format: OutputFormat,
    /// Emit only `id, name, address` (the assigned one), dropping the
    /// original address from the artifact.
    pub redact_original: bool,
}

/// Write `records` to `path`, creating parent directories. Returns bytes written.
pub fn write_records(
    path: &Path,
    records: &[Individual],
    options: &OutputOptions,
) -> Result<u64, EngineError> {
    if path.as_os_str().is_empty() {
        return Err(
            Error::InvalidArgument("output file must be a non-empty path".to_string()).into(),
        );
    }
    if let Some(unassigned) = records.iter().find(|record| record.assigned_address.is_none()) {
        return Err(Error::InvalidArgument(format!(
            "record '{}' has no assigned address",
            unassigned.id
        ))
        .into());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }

    match options.format {
        OutputFormat::Csv => {
            self::csv::write_records_csv(path, records, options.redact_original)
        }
        OutputFormat::Json => {
            self::json::write_records_json(path, records, options.redact_original)
        }
    }
}

#[derive(Serialize)]
struct AuditRow<'a> {
    id: &'a str,
    name: &'a str,
    original_address: &'a str,
    assigned_address: &'a str,
}

#[derive(Serialize)]
struct RedactedRow<'a> {
    id: &'a str,
    name: &'a str,
    address: &'a str,
}

fn audit_row(record: &Individual) -> AuditRow<'_> {
    AuditRow {
        id: &record.id,
        name: &record.name,
        original_address: &record.original_address,
        assigned_address: record.assigned_address.as_deref().unwrap_or_default(),
    }
}

fn redacted_row(record: &Individual) -> RedactedRow<'_> {
    RedactedRow {
        id: &record.id,
        name: &record.name,
        address: record.assigned_address.as_deref().unwrap_or_default(),
    }
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
