use rand::{Rng, RngCore};

use relbreak_core::{AssignmentFlag, AssignmentStrategy, Error, Individual, Seed};
use relbreak_engine::{AssignOptions, EngineError, RelationshipBreaker};
use relbreak_generate::{AddressFaker, FakeRsFaker, SourceError};

struct NumberedFaker;

impl AddressFaker for NumberedFaker {
    fn id(&self) -> &'static str {
        "test.numbered"
    }

    fn name(&self, rng: &mut dyn RngCore) -> Result<String, SourceError> {
        Ok(format!("Person {}", rng.random_range(1..=99_999)))
    }

    fn address(&self, city: &str, rng: &mut dyn RngCore) -> Result<String, SourceError> {
        Ok(format!("{} Main Street, {city}", rng.random_range(1..=99_999)))
    }
}

fn records(addresses: &[&str]) -> Vec<Individual> {
    addresses
        .iter()
        .enumerate()
        .map(|(index, address)| {
            Individual::new((index + 1).to_string(), format!("Person {}", index + 1), *address)
        })
        .collect()
}

fn assigned(records: &[Individual]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.assigned_address.clone().expect("assigned address"))
        .collect()
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

#[test]
fn springfield_scenario_is_a_derangement() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let seed = Seed::Int(42);
    let result = breaker
        .break_relationships("Springfield", 4, Some(&seed), Some(records(&["A", "B", "C", "D"])))
        .expect("break relationships");

    let out = result.records();
    assert_eq!(out.len(), 4);
    for (index, record) in out.iter().enumerate() {
        assert_eq!(record.id, (index + 1).to_string());
        assert_ne!(record.assigned_address.as_deref(), Some(record.original_address.as_str()));
    }
    assert_eq!(sorted(assigned(out)), vec!["A", "B", "C", "D"]);
    assert!(result.audit().is_clean());
    assert!(result.report().seeded);
    assert!(!result.is_flagged());
}

#[test]
fn springfield_seed_42_permutation_is_pinned() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let result = breaker
        .break_relationships(
            "Springfield",
            4,
            Some(&Seed::Int(42)),
            Some(records(&["A", "B", "C", "D"])),
        )
        .expect("break relationships");

    assert_eq!(result.permutation(), &[2, 0, 3, 1]);
    assert_eq!(assigned(result.records()), vec!["C", "A", "D", "B"]);
    assert_eq!(result.report().strategy, AssignmentStrategy::Sampled);
    assert_eq!(result.report().shuffle_attempts, 2);
}

#[test]
fn seeded_runs_are_deterministic() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let seed = Seed::from("audit-2024");
    let input = records(&["A", "B", "C", "D", "E", "F", "G", "H"]);

    let first = breaker
        .break_relationships("Springfield", 8, Some(&seed), Some(input.clone()))
        .expect("first run");
    let second = breaker
        .break_relationships("Springfield", 8, Some(&seed), Some(input))
        .expect("second run");

    assert_eq!(assigned(first.records()), assigned(second.records()));
    assert_eq!(first.permutation(), second.permutation());
}

#[test]
fn seeded_generated_runs_are_deterministic() {
    let breaker = RelationshipBreaker::new(FakeRsFaker::default());
    let seed = Seed::Int(7);
    let first = breaker
        .break_relationships("Springfield", 30, Some(&seed), None)
        .expect("first run");
    let second = breaker
        .break_relationships("Springfield", 30, Some(&seed), None)
        .expect("second run");
    assert_eq!(first.records(), second.records());
}

#[test]
fn assignment_does_not_depend_on_record_origin() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let seed = Seed::Int(99);
    let generated = breaker
        .break_relationships("Springfield", 12, Some(&seed), None)
        .expect("generated run");

    let mut replay = generated.records().to_vec();
    for record in &mut replay {
        record.assigned_address = None;
    }
    let ingested = breaker
        .break_relationships("Springfield", 12, Some(&seed), Some(replay))
        .expect("ingested run");

    assert_eq!(generated.permutation(), ingested.permutation());
}

#[test]
fn unseeded_runs_differ() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let input = records(&[
        "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P",
    ]);
    let first = breaker
        .break_relationships("Springfield", 16, None, Some(input.clone()))
        .expect("first run");
    let second = breaker
        .break_relationships("Springfield", 16, None, Some(input))
        .expect("second run");

    assert!(!first.report().seeded);
    assert_ne!(first.permutation(), second.permutation());
}

#[test]
fn empty_pool_is_unbreakable() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let result = breaker.break_relationships("Springfield", 0, None, Some(Vec::new()));
    assert!(matches!(
        result,
        Err(EngineError::Core(Error::UnbreakableRelationship(_)))
    ));
}

#[test]
fn single_record_is_flagged_identity() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let result = breaker
        .break_relationships("Springfield", 1, Some(&Seed::Int(1)), None)
        .expect("single record succeeds");

    let record = &result.records()[0];
    assert_eq!(result.permutation(), &[0]);
    assert!(record.keeps_original_address());
    assert_eq!(result.report().strategy, AssignmentStrategy::Identity);
    assert!(result.report().has_flag(AssignmentFlag::UnavoidableIdentity));
    assert!(result.is_flagged());
}

#[test]
fn zero_requested_records_is_invalid_argument() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let err = breaker
        .break_relationships("Springfield", 0, None, None)
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(matches!(err, EngineError::Source(_)));
}

#[test]
fn duplicate_ids_are_invalid_argument() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let mut input = records(&["A", "B", "C"]);
    input[2].id = "1".to_string();
    let err = breaker
        .break_relationships("Springfield", 3, None, Some(input))
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn duplicates_within_half_never_collide() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let input = records(&["A", "A", "A", "B", "C", "D"]);
    for seed in 0..50_u64 {
        let result = breaker
            .break_relationships("Springfield", 6, Some(&Seed::Int(seed)), Some(input.clone()))
            .expect("break relationships");
        assert_eq!(result.audit().value_collisions, 0, "seed {seed}");
        assert_eq!(sorted(assigned(result.records())), vec!["A", "A", "A", "B", "C", "D"]);
    }
}

#[test]
fn identical_addresses_are_flagged_but_deranged() {
    let breaker = RelationshipBreaker::new(NumberedFaker)
        .with_assign_options(AssignOptions { max_shuffle_attempts: 3 });
    let result = breaker
        .break_relationships("Springfield", 5, Some(&Seed::Int(5)), Some(records(&["Z"; 5])))
        .expect("break relationships");

    assert_eq!(result.audit().index_fixed_points, 0);
    assert_eq!(result.report().value_collisions, 5);
    assert_eq!(result.report().shuffle_attempts, 3);
    assert!(result
        .report()
        .has_flag(AssignmentFlag::DuplicateAddressCollisions));
}

#[test]
fn original_addresses_are_retained() {
    let breaker = RelationshipBreaker::new(NumberedFaker);
    let input = records(&["A", "B", "C"]);
    let result = breaker
        .break_relationships("Springfield", 3, Some(&Seed::Int(3)), Some(input.clone()))
        .expect("break relationships");

    for (before, after) in input.iter().zip(result.records()) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.name, after.name);
        assert_eq!(before.original_address, after.original_address);
    }
}
