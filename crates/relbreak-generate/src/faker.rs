use rand::RngCore;

use crate::errors::SourceError;

/// Realistic-value generator consumed by [`crate::SyntheticRecordSource`].
///
/// Implementations must draw every random choice from `rng` so a seeded
/// source stays reproducible. Addresses should be plausibly located in
/// `city`; the source only checks that they are non-blank.
pub trait AddressFaker {
    fn id(&self) -> &'static str;

    fn name(&self, rng: &mut dyn RngCore) -> Result<String, SourceError>;

    fn address(&self, city: &str, rng: &mut dyn RngCore) -> Result<String, SourceError>;
}

impl<F: AddressFaker + ?Sized> AddressFaker for Box<F> {
    fn id(&self) -> &'static str {
        (**self).id()
    }

    fn name(&self, rng: &mut dyn RngCore) -> Result<String, SourceError> {
        (**self).name(rng)
    }

    fn address(&self, city: &str, rng: &mut dyn RngCore) -> Result<String, SourceError> {
        (**self).address(city, rng)
    }
}
