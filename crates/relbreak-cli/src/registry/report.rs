use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use serde::Serialize;

use relbreak_core::{AssignmentReport, AuditSummary};

use super::{RegistryError, RegistryResult};

/// Where the individuals of a run came from.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordOrigin {
    Synthetic { locale: String },
    Csv { path: PathBuf },
}

/// Output artifact written by the run.
#[derive(Debug, Clone, Serialize)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub format: String,
    pub redact_original: bool,
    pub bytes_written: u64,
}

/// JSON report written when `--report_file` is set.
///
/// Never carries the seed value, only whether one was supplied.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: String,
    pub city: String,
    pub origin: RecordOrigin,
    pub records: usize,
    pub seeded: bool,
    pub assignment: AssignmentReport,
    pub audit: AuditSummary,
    pub output: OutputSummary,
    pub duration_ms: u64,
}

pub fn write_report(path: &Path, report: &RunReport) -> RegistryResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, report).map_err(RegistryError::from)
}
