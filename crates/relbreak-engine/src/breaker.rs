use std::time::Instant;

use tracing::{info, warn};

use relbreak_core::{
    AddressPool, Error, Individual, RelationshipBreakResult, Seed, audit_records, validate_records,
};
use relbreak_generate::{AddressFaker, SyntheticRecordSource};

use crate::assigner::DerangementAssigner;
use crate::errors::EngineError;
use crate::model::AssignOptions;

/// Entry point for breaking the identity/address linkage of a record set.
#[derive(Debug, Clone)]
pub struct RelationshipBreaker<F> {
    source: SyntheticRecordSource<F>,
    assigner: DerangementAssigner,
}

impl<F: AddressFaker> RelationshipBreaker<F> {
    pub fn new(faker: F) -> Self {
        Self {
            source: SyntheticRecordSource::new(faker),
            assigner: DerangementAssigner::default(),
        }
    }

    pub fn with_assign_options(mut self, options: AssignOptions) -> Self {
        self.assigner = DerangementAssigner::new(options);
        self
    }

    /// Generate (or take) records, redistribute their addresses and return
    /// them with `assigned_address` populated.
    ///
    /// When `existing_records` is given, `city` and `num_records` are not
    /// used for generation; any previous assignment on the records is
    /// replaced.
    pub fn break_relationships(
        &self,
        city: &str,
        num_records: usize,
        seed: Option<&Seed>,
        existing_records: Option<Vec<Individual>>,
    ) -> Result<RelationshipBreakResult, EngineError> {
        let start = Instant::now();
        let ingested = existing_records.is_some();
        let mut records = match existing_records {
            Some(records) => {
                validate_records(&records)?;
                records
            }
            None => self.source.generate(city, num_records, seed)?,
        };

        info!(
            city,
            faker = self.source.faker().id(),
            records = records.len(),
            ingested,
            seeded = seed.is_some(),
            "breaking address relationships"
        );

        let pool = AddressPool::extract(&records);
        let assignment = self.assigner.assign(&pool, seed)?;
        let assigned = pool.permuted(&assignment.permutation)?;
        for (record, address) in records.iter_mut().zip(assigned) {
            record.assigned_address = Some(address);
        }

        let audit = audit_records(&records, &assignment.permutation);
        if !audit.is_clean() {
            return Err(Error::Audit(format!(
                "assignment failed invariants: {} fixed points, {} unassigned, multiset preserved: {}",
                audit.index_fixed_points, audit.unassigned, audit.multiset_preserved
            ))
            .into());
        }

        let report = assignment.report;
        for flag in &report.flags {
            warn!(flag = ?flag, "assignment flagged");
        }
        info!(
            records = records.len(),
            strategy = report.strategy.as_str(),
            shuffle_attempts = report.shuffle_attempts,
            repaired_slots = report.repaired_slots,
            value_collisions = report.value_collisions,
            duration_ms = start.elapsed().as_millis() as u64,
            "address relationships broken"
        );

        Ok(RelationshipBreakResult::new(
            records,
            assignment.permutation,
            report,
            audit,
        ))
    }
}
