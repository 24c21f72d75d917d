//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// A single validation kind surfaces to API callers; `InvalidId` and
/// `NotFound` exist for internal routing and collapse to validation
/// messages at the facade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A business rule was violated (duplicate email, negative price, ...).
    #[error("{0}")]
    Validation(String),

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced entity does not exist.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Human-readable message as callers see it.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
