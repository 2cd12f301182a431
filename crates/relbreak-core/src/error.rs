use thiserror::Error;

/// Core error type shared across relbreak crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied value was rejected before any work started.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The realistic-value generator produced missing or malformed output.
    #[error("generation failure: {0}")]
    GenerationFailure(String),
    /// There are no addresses to redistribute.
    #[error("unbreakable relationship: {0}")]
    UnbreakableRelationship(String),
    /// A computed assignment violated an engine invariant.
    #[error("audit failed: {0}")]
    Audit(String),
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

/// Convenience alias for results returned by relbreak crates.
pub type Result<T> = std::result::Result<T, Error>;
