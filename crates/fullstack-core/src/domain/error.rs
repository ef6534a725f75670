// ============================================================================
// DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the render service logs and returns the same value)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    // ========================================================================
    // Resolution Errors
    // ========================================================================
    #[error("no template variant in group '{group}' for {selector} = '{requested}'")]
    UnknownVariant {
        group: String,
        selector: String,
        requested: String,
        available: Vec<String>,
    },

    // ========================================================================
    // Catalog Authoring Defects
    // ========================================================================
    #[error("template '{key}' uses unresolved placeholder '{{{{{token}}}}}'")]
    UnresolvedPlaceholder { key: String, token: String },

    #[error("templates {} collide at path '{path}'", .keys.join(", "))]
    PathCollision { path: String, keys: Vec<String> },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("duplicate template key: {key}")]
    DuplicateKey { key: String },

    #[error("variant group '{group}' registers '{value}' more than once")]
    DuplicateVariant { group: String, value: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("path '{path}' escapes the project root")]
    PathEscapesRoot { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfiguration { field, reason } => vec![
                format!("Fix the value of '{}': {}", field, reason),
                "Use --help to see accepted values and defaults".into(),
            ],
            Self::UnknownVariant {
                selector,
                available,
                ..
            } => {
                let mut out = vec![format!("Supported values for {}:", selector)];
                out.extend(available.iter().map(|v| format!("  • {}", v)));
                out.push("Try: fullstack list to see the template catalog".into());
                out
            }
            Self::UnresolvedPlaceholder { key, .. } => vec![
                format!("Template '{}' references a value the renderer does not provide", key),
                "Known placeholders: project_name, api_port, frontend_port, db_name, ...".into(),
                "Fix the template or report this issue if it is built in".into(),
            ],
            Self::PathCollision { keys, .. } => vec![
                format!(
                    "Entries {} write the same file, or one writes a file where another needs a directory",
                    keys.join(", ")
                ),
                "Give one of them a different path or put them in one variant group".into(),
            ],
            Self::DuplicateKey { .. } | Self::DuplicateVariant { .. } => vec![
                "Each template key and each (group, value) pair must be unique".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration { .. } => ErrorCategory::Validation,
            Self::UnknownVariant { .. } => ErrorCategory::NotFound,
            Self::UnresolvedPlaceholder { .. }
            | Self::PathCollision { .. }
            | Self::InvalidTemplate(_)
            | Self::DuplicateKey { .. }
            | Self::DuplicateVariant { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. } => ErrorCategory::Catalog,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Catalog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_placeholder_message_shows_braces() {
        let err = DomainError::UnresolvedPlaceholder {
            key: "backend/main".into(),
            token: "secret".into(),
        };
        assert_eq!(
            err.to_string(),
            "template 'backend/main' uses unresolved placeholder '{{secret}}'"
        );
    }

    #[test]
    fn path_collision_lists_every_key() {
        let err = DomainError::PathCollision {
            path: "src/config.py".into(),
            keys: vec!["a".into(), "b".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("a, b"));
        assert!(msg.contains("src/config.py"));
    }

    #[test]
    fn unknown_variant_suggests_available_values() {
        let err = DomainError::UnknownVariant {
            group: "db-env".into(),
            selector: "database".into(),
            requested: "mysql".into(),
            available: vec!["postgres".into(), "sqlite".into()],
        };
        let s = err.suggestions();
        assert!(s.iter().any(|l| l.contains("postgres")));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
