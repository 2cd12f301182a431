//! Record sources for relbreak.
//!
//! Produces the population whose address linkage gets broken: either
//! synthetic individuals from an injected realistic-value generator, or
//! existing records read from CSV.

pub mod errors;
pub mod faker;
pub mod faker_rs;
pub mod ingest;
pub mod source;

pub use errors::SourceError;
pub use faker::AddressFaker;
pub use faker_rs::{FakeRsFaker, LocaleKey};
pub use ingest::{read_records, read_records_csv};
pub use source::SyntheticRecordSource;
