use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::audit::AuditSummary;
use crate::error::{Error, Result};

/// A single person in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    pub id: String,
    pub name: String,
    pub original_address: String,
    /// Set exactly once by the relationship breaker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_address: Option<String>,
}

impl Individual {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        original_address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            original_address: original_address.into(),
            assigned_address: None,
        }
    }

    /// True when the assigned address equals the original one.
    pub fn keeps_original_address(&self) -> bool {
        self.assigned_address.as_deref() == Some(self.original_address.as_str())
    }
}

/// How the assigner arrived at its permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    /// A shuffle was accepted without modification.
    Sampled,
    /// The last shuffle was patched by swapping colliding slots.
    Repaired,
    /// Repair failed and the pool was rotated by one position.
    Rotated,
    /// The pool holds a single address.
    Identity,
}

impl AssignmentStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sampled => "sampled",
            Self::Repaired => "repaired",
            Self::Rotated => "rotated",
            Self::Identity => "identity",
        }
    }
}

/// Degenerate outcomes that succeed but deserve a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentFlag {
    /// `n == 1`: the only individual keeps the only address.
    UnavoidableIdentity,
    /// Duplicate address values left some individuals with an equal string.
    DuplicateAddressCollisions,
}

/// Summary of a single assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentReport {
    pub pool_size: usize,
    pub strategy: AssignmentStrategy,
    pub shuffle_attempts: u32,
    pub repaired_slots: u64,
    pub value_collisions: u64,
    pub seeded: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<AssignmentFlag>,
}

impl AssignmentReport {
    pub fn new(pool_size: usize, strategy: AssignmentStrategy) -> Self {
        Self {
            pool_size,
            strategy,
            shuffle_attempts: 0,
            repaired_slots: 0,
            value_collisions: 0,
            seeded: false,
            flags: Vec::new(),
        }
    }

    pub fn has_flag(&self, flag: AssignmentFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn record_flag(&mut self, flag: AssignmentFlag) {
        if !self.has_flag(flag) {
            self.flags.push(flag);
        }
    }
}

/// Final output of a relationship-breaking run.
///
/// Records keep both `original_address` and `assigned_address` so callers
/// can audit the mapping; writers decide what to expose.
#[derive(Debug, Clone, Serialize)]
pub struct RelationshipBreakResult {
    records: Vec<Individual>,
    permutation: Vec<usize>,
    report: AssignmentReport,
    audit: AuditSummary,
}

impl RelationshipBreakResult {
    pub fn new(
        records: Vec<Individual>,
        permutation: Vec<usize>,
        report: AssignmentReport,
        audit: AuditSummary,
    ) -> Self {
        Self {
            records,
            permutation,
            report,
            audit,
        }
    }

    pub fn records(&self) -> &[Individual] {
        &self.records
    }

    /// `permutation()[i]` is the pool slot whose address individual `i` received.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn report(&self) -> &AssignmentReport {
        &self.report
    }

    pub fn audit(&self) -> &AuditSummary {
        &self.audit
    }

    pub fn is_flagged(&self) -> bool {
        !self.report.flags.is_empty()
    }

    pub fn into_records(self) -> Vec<Individual> {
        self.records
    }
}

/// Validate a requested record count from untyped input.
pub fn record_count(value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(Error::InvalidArgument(format!(
            "number of records must be a positive integer, got {value}"
        )));
    }
    usize::try_from(value).map_err(|_| {
        Error::InvalidArgument(format!("number of records {value} does not fit this platform"))
    })
}

pub fn validate_city(city: &str) -> Result<()> {
    if city.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "city must be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

/// Reject records with blank addresses or duplicate ids.
pub fn validate_records(records: &[Individual]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(Error::InvalidArgument(format!(
                "record {index} has an empty id"
            )));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(Error::InvalidArgument(format!(
                "duplicate record id '{}'",
                record.id
            )));
        }
        if record.original_address.trim().is_empty() {
            return Err(Error::InvalidArgument(format!(
                "record '{}' has an empty address",
                record.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_count_rejects_non_positive() {
        assert!(matches!(record_count(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(record_count(-3), Err(Error::InvalidArgument(_))));
        assert_eq!(record_count(12).ok(), Some(12));
    }

    #[test]
    fn validate_records_rejects_duplicate_ids() {
        let records = vec![
            Individual::new("1", "Ada", "1 Main St"),
            Individual::new("1", "Grace", "2 Main St"),
        ];
        let err = validate_records(&records).unwrap_err();
        assert!(err.to_string().contains("duplicate record id '1'"));
    }

    #[test]
    fn validate_records_rejects_blank_address() {
        let records = vec![Individual::new("7", "Ada", "   ")];
        assert!(matches!(
            validate_records(&records),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn blank_city_is_invalid() {
        assert!(validate_city(" ").is_err());
        assert!(validate_city("Springfield").is_ok());
    }

    #[test]
    fn report_flags_are_recorded_once() {
        let mut report = AssignmentReport::new(1, AssignmentStrategy::Identity);
        report.record_flag(AssignmentFlag::UnavoidableIdentity);
        report.record_flag(AssignmentFlag::UnavoidableIdentity);
        assert_eq!(report.flags, vec![AssignmentFlag::UnavoidableIdentity]);

        let json = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(json["strategy"], "identity");
        assert_eq!(json["flags"][0], "unavoidable_identity");
    }
}
