//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An identifier was empty or whitespace-only
    #[error("{kind} must not be empty")]
    EmptyIdentifier { kind: &'static str },

    /// A presence event could not be interpreted
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

impl DomainError {
    /// Get an error code string for logs and wire responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyIdentifier { .. } => "EMPTY_IDENTIFIER",
            Self::InvalidEvent(_) => "INVALID_EVENT",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyIdentifier { .. })
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
