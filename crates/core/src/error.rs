//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// lookups). Storage concerns belong to the catalog crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty product name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested product was not found.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// True for failures the user can fix by correcting input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_prefixed() {
        let err = DomainError::validation("name cannot be empty");
        assert_eq!(err.to_string(), "validation failed: name cannot be empty");
        assert!(err.is_validation());
        assert!(!DomainError::not_found().is_validation());
    }
}
