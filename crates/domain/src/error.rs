//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A reference is malformed.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Compiler settings could not be read.
    #[error("invalid compiler settings: {0}")]
    InvalidSettings(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
