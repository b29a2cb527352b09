//! Domain errors for the cacheperf harness.

use thiserror::Error;

/// Domain-level errors surfaced by the data-access facade and the stores.
///
/// An absent id or an unknown category is not an error: those produce
/// `None` or an empty list.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Backing store unavailable: {0}")]
    BackingStoreUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Stable machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::BackingStoreUnavailable(_) => "BACKING_STORE_UNAVAILABLE",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::BackingStoreUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}
