use serde::{Deserialize, Serialize};

use relbreak_core::{AssignmentReport, AssignmentStrategy};

/// Options for the derangement assigner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssignOptions {
    /// Shuffles drawn before the last one is repaired in place.
    pub max_shuffle_attempts: u32,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            max_shuffle_attempts: 8,
        }
    }
}

/// Permutation chosen for a pool plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// `permutation[i]` is the pool slot whose address goes to individual `i`.
    pub permutation: Vec<usize>,
    pub report: AssignmentReport,
}

impl Assignment {
    pub(crate) fn new(permutation: Vec<usize>, strategy: AssignmentStrategy) -> Self {
        let report = AssignmentReport::new(permutation.len(), strategy);
        Self {
            permutation,
            report,
        }
    }
}
