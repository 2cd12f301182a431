use fake::Fake;
use fake::faker::address::{en as address_en, pt_br as address_pt_br};
use fake::faker::name::{en as name_en, pt_br as name_pt_br};
use rand::RngCore;

use crate::errors::SourceError;
use crate::faker::AddressFaker;
use crate::faker_rs::locales::LocaleKey;

const DEFAULT_LOCALE: LocaleKey = LocaleKey::EnUs;

/// [`AddressFaker`] backed by the `fake` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeRsFaker {
    locale: LocaleKey,
}

impl FakeRsFaker {
    pub fn new(locale: LocaleKey) -> Self {
        Self { locale }
    }

    /// Resolve an optional locale string, defaulting to `en_US`.
    pub fn for_locale(locale: Option<&str>) -> Result<Self, SourceError> {
        let Some(locale_str) = locale else {
            return Ok(Self::new(DEFAULT_LOCALE));
        };
        let locale = LocaleKey::parse(locale_str).ok_or_else(|| {
            SourceError::invalid_argument(format!(
                "unsupported faker locale '{}' (expected one of: {})",
                locale_str,
                LocaleKey::ALL
                    .iter()
                    .map(|key| key.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;
        Ok(Self::new(locale))
    }

    pub fn locale(&self) -> LocaleKey {
        self.locale
    }
}

impl AddressFaker for FakeRsFaker {
    fn id(&self) -> &'static str {
        match self.locale {
            LocaleKey::EnUs => "faker.en_US",
            LocaleKey::PtBr => "faker.pt_BR",
        }
    }

    fn name(&self, rng: &mut dyn RngCore) -> Result<String, SourceError> {
        let value: String = match self.locale {
            LocaleKey::EnUs => name_en::Name().fake_with_rng(rng),
            LocaleKey::PtBr => name_pt_br::Name().fake_with_rng(rng),
        };
        Ok(value)
    }

    fn address(&self, city: &str, rng: &mut dyn RngCore) -> Result<String, SourceError> {
        let value = match self.locale {
            LocaleKey::EnUs => {
                let building: String = address_en::BuildingNumber().fake_with_rng(rng);
                let street: String = address_en::StreetName().fake_with_rng(rng);
                let state: String = address_en::StateAbbr().fake_with_rng(rng);
                let zip: String = address_en::ZipCode().fake_with_rng(rng);
                format!("{building} {street}, {city}, {state} {zip}")
            }
            LocaleKey::PtBr => {
                let street: String = address_pt_br::StreetName().fake_with_rng(rng);
                let building: String = address_pt_br::BuildingNumber().fake_with_rng(rng);
                let state: String = address_pt_br::StateAbbr().fake_with_rng(rng);
                let zip: String = address_pt_br::ZipCode().fake_with_rng(rng);
                format!("{street}, {building} - {city}/{state}, {zip}")
            }
        };
        Ok(value)
    }
}
