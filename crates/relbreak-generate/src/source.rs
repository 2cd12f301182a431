use rand::RngCore;
use tracing::debug;

use relbreak_core::{Individual, RECORDS_STREAM, Seed, stage_rng, validate_city};

use crate::errors::SourceError;
use crate::faker::AddressFaker;

/// Produces synthetic individuals bound to a city.
#[derive(Debug, Clone)]
pub struct SyntheticRecordSource<F> {
    faker: F,
}

impl<F: AddressFaker> SyntheticRecordSource<F> {
    pub fn new(faker: F) -> Self {
        Self { faker }
    }

    pub fn faker(&self) -> &F {
        &self.faker
    }

    /// Generate `num_records` individuals living in `city`.
    ///
    /// With a seed, the output is reproducible for the same `(city,
    /// num_records, seed)`; without one each call is independently random.
    pub fn generate(
        &self,
        city: &str,
        num_records: usize,
        seed: Option<&Seed>,
    ) -> Result<Vec<Individual>, SourceError> {
        validate_request(city, num_records)?;
        let mut rng = stage_rng(seed, RECORDS_STREAM);
        self.generate_with_rng(city, num_records, &mut rng)
    }

    pub fn generate_with_rng(
        &self,
        city: &str,
        num_records: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual>, SourceError> {
        validate_request(city, num_records)?;
        let city = city.trim();

        let mut records = Vec::new();
        records.try_reserve(num_records).map_err(|err| {
            SourceError::generation_failure(format!(
                "cannot hold {num_records} synthetic records: {err}"
            ))
        })?;
        for index in 0..num_records {
            let name = self.faker.name(rng)?;
            let address = self.faker.address(city, rng)?;
            let name = require_text(self.faker.id(), "name", index, name)?;
            let address = require_text(self.faker.id(), "address", index, address)?;
            records.push(Individual::new(
                (index + 1).to_string(),
                name,
                bind_to_city(address, city),
            ));
        }

        debug!(
            faker = self.faker.id(),
            city,
            records = records.len(),
            "synthetic records generated"
        );
        Ok(records)
    }
}

fn validate_request(city: &str, num_records: usize) -> Result<(), SourceError> {
    validate_city(city)?;
    if num_records == 0 {
        return Err(SourceError::invalid_argument(
            "number of records must be a positive integer",
        ));
    }
    Ok(())
}

fn require_text(
    faker: &str,
    field: &str,
    index: usize,
    value: String,
) -> Result<String, SourceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SourceError::generation_failure(format!(
            "{faker} returned an empty {field} for record {}",
            index + 1
        )));
    }
    Ok(trimmed.to_string())
}

/// Append the city when the generated address does not mention it.
pub fn bind_to_city(address: String, city: &str) -> String {
    if address.to_lowercase().contains(&city.to_lowercase()) {
        address
    } else {
        format!("{address}, {city}")
    }
}
