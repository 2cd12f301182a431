use serde::{Deserialize, Serialize};

use crate::model::Individual;

/// Invariant checks over a finished assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub records: usize,
    pub index_fixed_points: usize,
    pub value_collisions: usize,
    pub unassigned: usize,
    pub multiset_preserved: bool,
}

impl AuditSummary {
    /// Holds when nobody kept their own slot, except the lone record of a
    /// single-record pool.
    pub fn is_clean(&self) -> bool {
        self.multiset_preserved
            && self.unassigned == 0
            && (self.records <= 1 || self.index_fixed_points == 0)
    }
}

pub fn is_permutation(permutation: &[usize]) -> bool {
    let mut seen = vec![false; permutation.len()];
    for &slot in permutation {
        match seen.get_mut(slot) {
            Some(flag) if !*flag => *flag = true,
            _ => return false,
        }
    }
    true
}

pub fn fixed_points(permutation: &[usize]) -> Vec<usize> {
    permutation
        .iter()
        .enumerate()
        .filter(|(index, slot)| index == *slot)
        .map(|(index, _)| index)
        .collect()
}

pub fn is_derangement(permutation: &[usize]) -> bool {
    is_permutation(permutation) && fixed_points(permutation).is_empty()
}

pub fn audit_records(records: &[Individual], permutation: &[usize]) -> AuditSummary {
    let mut original: Vec<&str> = records
        .iter()
        .map(|record| record.original_address.as_str())
        .collect();
    let mut assigned: Vec<&str> = records
        .iter()
        .filter_map(|record| record.assigned_address.as_deref())
        .collect();
    let unassigned = records.len() - assigned.len();
    original.sort_unstable();
    assigned.sort_unstable();

    AuditSummary {
        records: records.len(),
        index_fixed_points: fixed_points(permutation).len(),
        value_collisions: records
            .iter()
            .filter(|record| record.keeps_original_address())
            .count(),
        unassigned,
        multiset_preserved: unassigned == 0 && original == assigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned(pairs: &[(&str, &str)]) -> Vec<Individual> {
        pairs
            .iter()
            .enumerate()
            .map(|(index, (original, assigned))| {
                let mut record = Individual::new((index + 1).to_string(), "x", *original);
                record.assigned_address = Some(assigned.to_string());
                record
            })
            .collect()
    }

    #[test]
    fn permutation_checks() {
        assert!(is_permutation(&[]));
        assert!(is_permutation(&[1, 0, 2]));
        assert!(!is_permutation(&[1, 1, 2]));
        assert!(!is_permutation(&[0, 3]));
        assert_eq!(fixed_points(&[1, 0, 2]), vec![2]);
        assert!(is_derangement(&[1, 2, 0]));
        assert!(!is_derangement(&[1, 0, 2]));
    }

    #[test]
    fn audit_detects_dropped_address() {
        let records = assigned(&[("A", "B"), ("B", "B")]);
        let summary = audit_records(&records, &[1, 0]);
        assert!(!summary.multiset_preserved);
        assert_eq!(summary.value_collisions, 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn audit_accepts_swap() {
        let records = assigned(&[("A", "B"), ("B", "A")]);
        let summary = audit_records(&records, &[1, 0]);
        assert!(summary.is_clean());
        assert_eq!(summary.value_collisions, 0);
    }

    #[test]
    fn single_record_identity_is_clean() {
        let records = assigned(&[("A", "A")]);
        let summary = audit_records(&records, &[0]);
        assert_eq!(summary.index_fixed_points, 1);
        assert!(summary.is_clean());
    }
}
