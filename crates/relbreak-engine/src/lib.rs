//! Relationship-breaking engine for relbreak.
//!
//! Redistributes the address pool of a record set with a seeded derangement
//! so no individual keeps a predictable link to their original address,
//! then hands the result to the CSV/JSON writers.

pub mod assigner;
pub mod breaker;
pub mod errors;
pub mod model;
pub mod output;

pub use assigner::DerangementAssigner;
pub use breaker::RelationshipBreaker;
pub use errors::EngineError;
pub use model::{AssignOptions, Assignment};
pub use output::{OutputFormat, OutputOptions, write_records};
