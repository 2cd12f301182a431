mod adapter;
mod locales;

pub use adapter::FakeRsFaker;
pub use locales::LocaleKey;
