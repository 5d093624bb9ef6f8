//! Application error types

use keyforge_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The caller passed input that breaks the use case contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested key was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
