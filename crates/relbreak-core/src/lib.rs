//! Core contracts and helpers for relbreak.
//!
//! This crate defines the record model, the address pool, seed streams and
//! the invariant audit shared by the record sources, the engine and the CLI.

pub mod audit;
pub mod error;
pub mod model;
pub mod pool;
pub mod seed;

pub use audit::{AuditSummary, audit_records, fixed_points, is_derangement, is_permutation};
pub use error::{Error, Result};
pub use model::{
    AssignmentFlag, AssignmentReport, AssignmentStrategy, Individual, RelationshipBreakResult,
    record_count, validate_city, validate_records,
};
pub use pool::AddressPool;
pub use seed::{ASSIGN_STREAM, RECORDS_STREAM, Seed, hash_seed, stage_rng};
