use rand::Rng;
use tracing::{debug, warn};

use relbreak_core::{
    ASSIGN_STREAM, AddressPool, AssignmentFlag, AssignmentStrategy, Error, Seed, is_derangement,
    stage_rng,
};

use crate::errors::EngineError;
use crate::model::{AssignOptions, Assignment};

/// Computes address permutations with no individual keeping their own slot.
///
/// Draws uniform Fisher–Yates shuffles and accepts the first one in which
/// nobody receives an address string equal to their own. When every draw
/// collides, the last draw is repaired by swaps; rotation by one is the last
/// resort. For a fixed pool and seed the result is fully determined.
#[derive(Debug, Clone, Default)]
pub struct DerangementAssigner {
    options: AssignOptions,
}

impl DerangementAssigner {
    pub fn new(options: AssignOptions) -> Self {
        Self { options }
    }

    /// Assign with an RNG derived from `seed`, or from OS entropy when absent.
    pub fn assign(
        &self,
        pool: &AddressPool,
        seed: Option<&Seed>,
    ) -> Result<Assignment, EngineError> {
        let mut rng = stage_rng(seed, ASSIGN_STREAM);
        let mut assignment = self.assign_with_rng(pool, &mut rng)?;
        assignment.report.seeded = seed.is_some();
        Ok(assignment)
    }

    pub fn assign_with_rng<R: Rng + ?Sized>(
        &self,
        pool: &AddressPool,
        rng: &mut R,
    ) -> Result<Assignment, EngineError> {
        if pool.is_empty() {
            return Err(Error::UnbreakableRelationship(
                "address pool is empty; there is nothing to reassign".to_string(),
            )
            .into());
        }
        let n = pool.len();
        if n == 1 {
            warn!(
                pool_size = n,
                "single-address pool keeps its only address (unavoidable identity)"
            );
            let mut assignment = Assignment::new(vec![0], AssignmentStrategy::Identity);
            assignment
                .report
                .record_flag(AssignmentFlag::UnavoidableIdentity);
            assignment.report.value_collisions = 1;
            return Ok(assignment);
        }

        let max_attempts = self.options.max_shuffle_attempts.max(1);
        let mut permutation = Vec::new();
        for attempt in 1..=max_attempts {
            permutation = shuffled_indices(n, rng);
            if count_collisions(pool, &permutation) == 0 {
                let mut assignment = Assignment::new(permutation, AssignmentStrategy::Sampled);
                assignment.report.shuffle_attempts = attempt;
                debug!(pool_size = n, attempts = attempt, "shuffle accepted");
                return Ok(assignment);
            }
        }

        let mut repaired = repair_collisions(pool, &mut permutation, rng);
        repaired += repair_fixed_points(&mut permutation, rng);
        let mut strategy = AssignmentStrategy::Repaired;
        if !is_derangement(&permutation) {
            warn!(pool_size = n, "repair left fixed points; rotating pool");
            permutation = rotation(n);
            strategy = AssignmentStrategy::Rotated;
        }

        let collisions = count_collisions(pool, &permutation);
        let mut assignment = Assignment::new(permutation, strategy);
        assignment.report.shuffle_attempts = max_attempts;
        assignment.report.repaired_slots = repaired;
        assignment.report.value_collisions = collisions;
        if collisions > 0 {
            warn!(
                pool_size = n,
                collisions,
                max_multiplicity = pool.max_multiplicity(),
                avoidable = pool.admits_value_derangement(),
                "duplicate addresses leave some individuals with an equal address"
            );
            assignment
                .report
                .record_flag(AssignmentFlag::DuplicateAddressCollisions);
        }
        debug!(
            pool_size = n,
            strategy = strategy.as_str(),
            repaired,
            "shuffle repaired"
        );
        Ok(assignment)
    }
}

/// Uniform permutation of `0..n` (Durstenfeld's Fisher–Yates).
fn shuffled_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        permutation.swap(i, j);
    }
    permutation
}

fn count_collisions(pool: &AddressPool, permutation: &[usize]) -> u64 {
    permutation
        .iter()
        .enumerate()
        .filter(|&(target, &source)| pool.collides(target, source))
        .count() as u64
}

/// Swap each colliding slot with a partner such that neither collides
/// afterwards. Succeeds for every value whose multiplicity is at most n/2.
fn repair_collisions<R: Rng + ?Sized>(
    pool: &AddressPool,
    permutation: &mut [usize],
    rng: &mut R,
) -> u64 {
    let n = permutation.len();
    let mut repaired = 0;
    for i in 0..n {
        if !pool.collides(i, permutation[i]) {
            continue;
        }
        let start = rng.random_range(0..n);
        for step in 0..n {
            let j = (start + step) % n;
            if j != i
                && !pool.collides(i, permutation[j])
                && !pool.collides(j, permutation[i])
            {
                permutation.swap(i, j);
                repaired += 1;
                break;
            }
        }
    }
    repaired
}

/// Swap every index fixed point with a random other index. Neither side of
/// such a swap can be a fixed point afterwards.
fn repair_fixed_points<R: Rng + ?Sized>(permutation: &mut [usize], rng: &mut R) -> u64 {
    let n = permutation.len();
    let mut repaired = 0;
    for i in 0..n {
        if permutation[i] != i {
            continue;
        }
        let mut j = rng.random_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        permutation.swap(i, j);
        repaired += 1;
    }
    repaired
}

fn rotation(n: usize) -> Vec<usize> {
    (0..n).map(|i| (i + 1) % n).collect()
}
