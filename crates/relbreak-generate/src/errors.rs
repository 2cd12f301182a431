use thiserror::Error;

/// Errors emitted while producing or ingesting records.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Core(#[from] relbreak_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl SourceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SourceError::Core(relbreak_core::Error::InvalidArgument(message.into()))
    }

    pub fn generation_failure(message: impl Into<String>) -> Self {
        SourceError::Core(relbreak_core::Error::GenerationFailure(message.into()))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SourceError::Core(err) if err.is_invalid_argument())
    }
}
