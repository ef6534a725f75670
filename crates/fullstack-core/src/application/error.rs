//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, FullstackError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The project root already exists. Nothing was written.
    #[error("project directory already exists: {}", path.display())]
    ProjectAlreadyExists { path: PathBuf },

    /// A write failed after the root was created. The root has been removed.
    #[error("writing {} failed and was rolled back: {cause}", root.display())]
    PartialWrite {
        root: PathBuf,
        #[source]
        cause: Box<FullstackError>,
    },

    /// Filesystem operation failed.
    #[error("filesystem error at {}: {reason}", path.display())]
    Filesystem { path: PathBuf, reason: String },

    /// A write failed and the cleanup that followed failed too.
    #[error("rollback of {} failed ({reason}) after: {cause}", path.display())]
    RollbackFailed {
        path: PathBuf,
        reason: String,
        cause: Box<FullstackError>,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectAlreadyExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or use --output-dir to generate somewhere else".into(),
            ],
            Self::PartialWrite { cause, .. } => {
                let mut out = vec!["No files were left behind; the project directory was removed".into()];
                out.extend(cause.suggestions());
                out
            }
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check that enough disk space is available".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Remove {} manually before retrying", path.display()),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectAlreadyExists { .. } => ErrorCategory::Validation,
            Self::PartialWrite { .. } | Self::Filesystem { .. } | Self::RollbackFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
