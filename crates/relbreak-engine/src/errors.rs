use thiserror::Error;

use relbreak_generate::SourceError;

/// Errors emitted by the relationship-breaking engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] relbreak_core::Error),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// The underlying core error, looking through record-source failures.
    pub fn core(&self) -> Option<&relbreak_core::Error> {
        match self {
            EngineError::Core(err) | EngineError::Source(SourceError::Core(err)) => Some(err),
            _ => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.core().is_some_and(relbreak_core::Error::is_invalid_argument)
    }
}
