use thiserror::Error;

/// Errors related to the core functionality of the URL shortener.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("empty input: {0} must not be empty")]
    EmptyInput(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("empty input: {0} must not be empty")]
    EmptyInput(&'static str),
    #[error("failed to persist record {code}: {reason}")]
    Persistence { code: String, reason: String },
    #[error("no free short code for {url} after {probes} probes")]
    CollisionExhausted { url: String, probes: u32 },
    #[error("repository has already been restored")]
    AlreadyRestored,
    #[error("repository has not been restored from the durable log yet")]
    NotRestored,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::EmptyInput(what) => Self::EmptyInput(what),
        }
    }
}
