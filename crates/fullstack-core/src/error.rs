//! Unified error handling for fullstack-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for fullstack-core operations.
#[derive(Debug, Error, Clone)]
pub enum FullstackError {
    /// Errors from the domain layer (invalid input, catalog defects).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (filesystem, rollback).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl FullstackError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in fullstack".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Catalog => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The domain error at the bottom of this error, looking through
    /// `PartialWrite` wrappers.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Application(ApplicationError::PartialWrite { cause, .. }) => cause.as_domain(),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad user input: invalid configuration, existing project.
    Validation,
    /// The configuration asks for a variant the catalog lacks.
    NotFound,
    /// The catalog itself is defective.
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type FullstackResult<T> = Result<T, FullstackError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> FullstackResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> FullstackResult<T> {
        self.map_err(|e| FullstackError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_defects_map_to_configuration() {
        let err: FullstackError = DomainError::DuplicateKey { key: "readme".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn unknown_variant_maps_to_not_found() {
        let err: FullstackError = DomainError::UnknownVariant {
            group: "db-env".into(),
            selector: "database".into(),
            requested: "sqlite".into(),
            available: vec!["postgres".into()],
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn context_wraps_foreign_errors_as_internal() {
        let res: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = res.context("formatting manifest").unwrap_err();
        assert!(matches!(err, FullstackError::Internal { .. }));
        assert!(err.to_string().contains("formatting manifest"));
    }
}
