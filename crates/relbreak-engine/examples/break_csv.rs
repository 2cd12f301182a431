use std::env;
use std::path::PathBuf;

use relbreak_core::Seed;
use relbreak_engine::{OutputOptions, RelationshipBreaker, write_records};
use relbreak_generate::{FakeRsFaker, read_records_csv};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut input: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;
    let mut seed: Option<Seed> = None;
    let mut city = "Springfield".to_string();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => input = args.next().map(PathBuf::from),
            "--out" => out = args.next().map(PathBuf::from),
            "--seed" => seed = args.next().map(|value| value.parse()).transpose()?,
            "--city" => city = args.next().ok_or("missing --city value")?,
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let out = out.ok_or("missing --out path")?;
    let existing = input.as_deref().map(read_records_csv).transpose()?;

    let breaker = RelationshipBreaker::new(FakeRsFaker::default());
    let result = breaker.break_relationships(&city, 10, seed.as_ref(), existing)?;
    let bytes = write_records(&out, result.records(), &OutputOptions::default())?;

    println!("output={} bytes={bytes}", out.display());
    Ok(())
}
