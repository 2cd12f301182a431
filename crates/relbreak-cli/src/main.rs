mod config;
mod registry;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use uuid::Uuid;

use config::{ConfigError, LogFormat, RelbreakConfig};
use registry::{
    OutputSummary, RecordOrigin, RegistryError, RunReport, init_logging, write_report,
};
use relbreak_core::{Error as CoreError, Seed, record_count, validate_city};
use relbreak_engine::{
    EngineError, OutputFormat, OutputOptions, RelationshipBreaker, write_records,
};
use relbreak_generate::{FakeRsFaker, SourceError, read_records_csv};

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl CliError {
    /// 2 for rejected input, 1 for everything else.
    fn exit_code(&self) -> u8 {
        let invalid = match self {
            CliError::Core(err) => err.is_invalid_argument(),
            CliError::Source(err) => err.is_invalid_argument(),
            CliError::Engine(err) => err.is_invalid_argument(),
            CliError::Config(_) => true,
            CliError::Registry(_) => false,
        };
        if invalid { 2 } else { 1 }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "relbreak",
    version,
    about = "Breaks relationships between data points to prevent re-identification."
)]
struct Cli {
    /// The city to reassign addresses within.
    #[arg(long)]
    city: String,
    /// The number of records to generate and reassign. Not accepted
    /// together with `--input_file`, whose row count is used instead.
    #[arg(
        long = "num_records",
        visible_alias = "num-records",
        allow_negative_numbers = true,
        required_unless_present = "input_file",
        conflicts_with = "input_file"
    )]
    num_records: Option<i64>,
    /// The file to write the anonymized data to.
    #[arg(long = "output_file", visible_alias = "output-file")]
    output_file: PathBuf,
    /// Seed (integer or text) for reproducible runs.
    #[arg(long)]
    seed: Option<String>,
    /// Existing records (CSV with name and address columns) to reassign
    /// instead of generating synthetic ones.
    #[arg(long = "input_file", visible_alias = "input-file")]
    input_file: Option<PathBuf>,
    /// Output format. Inferred from the output file extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Locale for synthetic names and addresses (en_US, pt_BR).
    #[arg(long)]
    locale: Option<String>,
    /// Drop the original address column from the output.
    #[arg(long = "redact-original")]
    redact_original: bool,
    /// Write a JSON run report to this path.
    #[arg(long = "report_file", visible_alias = "report-file")]
    report_file: Option<PathBuf>,
    /// Config file (defaults to ./relbreak.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log output format.
    #[arg(long = "log-format", value_enum)]
    log_format: Option<LogFormatArg>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("relbreak: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = RelbreakConfig::load(cli.config.as_deref())?;
    let log_format = cli
        .log_format
        .map(LogFormat::from)
        .unwrap_or(config.logging.format);
    init_logging(&config.logging, log_format)?;

    let run_id = Uuid::new_v4().to_string();
    let result = execute(&cli, &config, &run_id);
    if let Err(err) = &result {
        tracing::error!(event = "run_failed", run_id = %run_id, error = %err);
    }
    result
}

fn execute(cli: &Cli, config: &RelbreakConfig, run_id: &str) -> Result<(), CliError> {
    let started_at = chrono::Utc::now();
    let timer = Instant::now();

    validate_city(&cli.city)?;
    if cli.output_file.as_os_str().is_empty() {
        return Err(CoreError::InvalidArgument(
            "output file must be a non-empty string".to_string(),
        )
        .into());
    }
    let requested = cli.num_records.map(record_count).transpose()?;
    let seed = cli.seed.as_deref().map(str::parse::<Seed>).transpose()?;
    let format = cli
        .format
        .map(OutputFormat::from)
        .or_else(|| OutputFormat::from_path(&cli.output_file))
        .or(config.output.format)
        .unwrap_or_default();
    let output_options = OutputOptions {
        format,
        redact_original: cli.redact_original || config.output.redact_original,
    };
    let locale = cli
        .locale
        .as_deref()
        .or(config.generate.locale.as_deref());
    let faker = FakeRsFaker::for_locale(locale)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        city = %cli.city,
        num_records = ?requested,
        output_file = %cli.output_file.display(),
        format = %format,
        seeded = seed.is_some()
    );

    let existing = match &cli.input_file {
        Some(path) => {
            let records = read_records_csv(path)?;
            tracing::info!(
                event = "records_ingested",
                path = %path.display(),
                records = records.len()
            );
            Some(records)
        }
        None => None,
    };
    let num_records = requested
        .or_else(|| existing.as_ref().map(Vec::len))
        .unwrap_or_default();

    let breaker = RelationshipBreaker::new(faker).with_assign_options(config.assign.clone());
    let result = breaker.break_relationships(&cli.city, num_records, seed.as_ref(), existing)?;

    let bytes_written = write_records(&cli.output_file, result.records(), &output_options)?;
    tracing::info!(
        event = "output_written",
        path = %cli.output_file.display(),
        bytes_written
    );

    if let Some(report_path) = &cli.report_file {
        let origin = match &cli.input_file {
            Some(path) => RecordOrigin::Csv { path: path.clone() },
            None => RecordOrigin::Synthetic {
                locale: faker.locale().to_string(),
            },
        };
        let report = RunReport {
            run_id: run_id.to_string(),
            started_at: started_at.to_rfc3339(),
            city: cli.city.clone(),
            origin,
            records: result.records().len(),
            seeded: seed.is_some(),
            assignment: result.report().clone(),
            audit: result.audit().clone(),
            output: OutputSummary {
                path: cli.output_file.clone(),
                format: format.to_string(),
                redact_original: output_options.redact_original,
                bytes_written,
            },
            duration_ms: timer.elapsed().as_millis() as u64,
        };
        write_report(report_path, &report)?;
        tracing::info!(event = "report_written", path = %report_path.display());
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        records = result.records().len(),
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}
