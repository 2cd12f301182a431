use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::Individual;

/// Ordered multiset of addresses taken from a record set.
///
/// Slot `i` holds the original address of individual `i`. The pool is only
/// ever read through a permutation; its values are never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPool {
    addresses: Vec<String>,
}

impl AddressPool {
    pub fn extract(records: &[Individual]) -> Self {
        Self {
            addresses: records
                .iter()
                .map(|record| record.original_address.clone())
                .collect(),
        }
    }

    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// True when handing slot `source`'s address to individual `target`
    /// would give them a string equal to their own.
    pub fn collides(&self, target: usize, source: usize) -> bool {
        self.addresses[target] == self.addresses[source]
    }

    /// Largest number of slots sharing one address value.
    pub fn max_multiplicity(&self) -> usize {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for address in &self.addresses {
            *counts.entry(address.as_str()).or_insert(0) += 1;
        }
        counts.values().copied().max().unwrap_or(0)
    }

    /// Whether some permutation leaves nobody with an equal address string.
    pub fn admits_value_derangement(&self) -> bool {
        self.len() >= 2 && self.max_multiplicity() * 2 <= self.len()
    }

    /// Read the pool through `permutation`: entry `i` is `pool[permutation[i]]`.
    pub fn permuted(&self, permutation: &[usize]) -> Result<Vec<String>> {
        if !crate::audit::is_permutation(permutation) || permutation.len() != self.len() {
            return Err(Error::Audit(format!(
                "assignment of length {} is not a permutation of a pool of {}",
                permutation.len(),
                self.len()
            )));
        }
        Ok(permutation
            .iter()
            .map(|&source| self.addresses[source].clone())
            .collect())
    }
}
