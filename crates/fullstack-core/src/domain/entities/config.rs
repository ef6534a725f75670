//! The `ProjectConfig` aggregate and its builder.
//!
//! A `ProjectConfig` is the fully-resolved, validated description of the
//! project the user wants to generate. Defaults are filled in and invariants
//! checked at `build()`; once a `ProjectConfig` exists it is guaranteed
//! consistent.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::fmt;

use crate::domain::{error::DomainError, value_objects::DatabaseEngine};

use super::render_context::to_snake_case;

pub const DEFAULT_API_PORT: u16 = 8000;
pub const DEFAULT_FRONTEND_PORT: u16 = 3000;
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PASSWORD: &str = "change_me_in_production";

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-validated project configuration.
///
/// Guaranteed on construction:
/// - `project_name` is usable as a single directory name
/// - ports are non-zero and `api_port != frontend_port`
/// - `db_port` is present when the engine listens on a port
/// - `db_name` is a plain identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectConfig {
    project_name: String,
    api_port: u16,
    frontend_port: u16,
    database_engine: DatabaseEngine,
    db_name: String,
    db_port: Option<u16>,
    db_user: String,
    db_password: String,
    db_host: String,
}

impl ProjectConfig {
    /// Start building a configuration for `project_name`.
    pub fn builder(project_name: impl Into<String>) -> ProjectConfigBuilder {
        ProjectConfigBuilder::new(project_name)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
    pub const fn api_port(&self) -> u16 {
        self.api_port
    }
    pub const fn frontend_port(&self) -> u16 {
        self.frontend_port
    }
    pub const fn database_engine(&self) -> DatabaseEngine {
        self.database_engine
    }
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Port of the database server. Always `None` for engines without one,
    /// even if a port was supplied to the builder.
    pub const fn db_port(&self) -> Option<u16> {
        self.db_port
    }
    pub fn db_user(&self) -> &str {
        &self.db_user
    }
    pub fn db_password(&self) -> &str {
        &self.db_password
    }
    pub fn db_host(&self) -> &str {
        &self.db_host
    }

    /// Validate internal consistency.
    ///
    /// Called automatically by the builder.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_project_name(&self.project_name)?;

        if self.api_port == 0 {
            return Err(invalid("api_port", "port must be between 1 and 65535"));
        }
        if self.frontend_port == 0 {
            return Err(invalid("frontend_port", "port must be between 1 and 65535"));
        }
        if self.api_port == self.frontend_port {
            return Err(invalid(
                "frontend_port",
                format!("must differ from api_port ({})", self.api_port),
            ));
        }

        match (self.database_engine.uses_port(), self.db_port) {
            (true, None) => {
                return Err(invalid(
                    "db_port",
                    format!("required for {}", self.database_engine),
                ));
            }
            (true, Some(0)) => {
                return Err(invalid("db_port", "port must be between 1 and 65535"));
            }
            _ => {}
        }

        validate_identifier("db_name", &self.db_name)?;
        validate_identifier("db_user", &self.db_user)?;

        // Lands inside a quoted SQL literal in the init script.
        if self.db_password.contains('\'') {
            return Err(invalid("db_password", "cannot contain a single quote (')"));
        }

        if self.db_host.trim().is_empty() {
            return Err(invalid("db_host", "cannot be empty"));
        }

        Ok(())
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (api :{}, frontend :{}, {} '{}'",
            self.project_name, self.api_port, self.frontend_port, self.database_engine, self.db_name
        )?;
        if let Some(port) = self.db_port {
            write!(f, " :{port}")?;
        }
        f.write_str(")")
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ProjectConfig`].
///
/// Every field except the project name has a default:
///
/// | Field | Default |
/// |-------|---------|
/// | `api_port` | 8000 |
/// | `frontend_port` | 3000 |
/// | `database` | postgres |
/// | `db_port` | engine default (5432 for postgres) |
/// | `db_name` | `<name_snake>_db` |
/// | `db_user` | `<name_snake>_user` |
/// | `db_password` | `change_me_in_production` |
/// | `db_host` | `localhost` |
#[derive(Debug, Clone)]
pub struct ProjectConfigBuilder {
    project_name: String,
    api_port: Option<u16>,
    frontend_port: Option<u16>,
    database_engine: Option<DatabaseEngine>,
    db_name: Option<String>,
    db_port: Option<u16>,
    db_user: Option<String>,
    db_password: Option<String>,
    db_host: Option<String>,
}

impl ProjectConfigBuilder {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            api_port: None,
            frontend_port: None,
            database_engine: None,
            db_name: None,
            db_port: None,
            db_user: None,
            db_password: None,
            db_host: None,
        }
    }

    pub fn api_port(mut self, port: u16) -> Self {
        self.api_port = Some(port);
        self
    }

    pub fn frontend_port(mut self, port: u16) -> Self {
        self.frontend_port = Some(port);
        self
    }

    pub fn database(mut self, engine: DatabaseEngine) -> Self {
        self.database_engine = Some(engine);
        self
    }

    pub fn db_name(mut self, name: impl Into<String>) -> Self {
        self.db_name = Some(name.into());
        self
    }

    pub fn db_port(mut self, port: u16) -> Self {
        self.db_port = Some(port);
        self
    }

    pub fn db_user(mut self, user: impl Into<String>) -> Self {
        self.db_user = Some(user.into());
        self
    }

    pub fn db_password(mut self, password: impl Into<String>) -> Self {
        self.db_password = Some(password.into());
        self
    }

    pub fn db_host(mut self, host: impl Into<String>) -> Self {
        self.db_host = Some(host.into());
        self
    }

    /// Fill defaults, then validate.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` naming the first offending field.
    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        // Checked before deriving defaults from the name.
        validate_project_name(&self.project_name)?;

        let engine = self.database_engine.unwrap_or_default();
        let base = identifier_base(&self.project_name);

        // A port is meaningless for an embedded database; drop it.
        let db_port = if engine.uses_port() {
            self.db_port.or(engine.default_port())
        } else {
            None
        };

        let config = ProjectConfig {
            api_port: self.api_port.unwrap_or(DEFAULT_API_PORT),
            frontend_port: self.frontend_port.unwrap_or(DEFAULT_FRONTEND_PORT),
            database_engine: engine,
            db_name: self.db_name.unwrap_or_else(|| format!("{base}_db")),
            db_port,
            db_user: self.db_user.unwrap_or_else(|| format!("{base}_user")),
            db_password: self
                .db_password
                .unwrap_or_else(|| DEFAULT_DB_PASSWORD.to_string()),
            db_host: self.db_host.unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            project_name: self.project_name,
        };

        config.validate()?;
        Ok(config)
    }
}

// ── Validation helpers ────────────────────────────────────────────────────────

fn invalid(field: &'static str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidConfiguration {
        field,
        reason: reason.into(),
    }
}

/// A project name becomes exactly one directory under the output root.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(invalid("project_name", "name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("project_name", "name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("project_name", "name cannot contain path separators"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_control() || matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*'))
    {
        return Err(invalid(
            "project_name",
            format!("name cannot contain {c:?}"),
        ));
    }
    if name != name.trim() {
        return Err(invalid(
            "project_name",
            "name cannot start or end with whitespace",
        ));
    }
    if to_snake_case(name).is_empty() {
        return Err(invalid(
            "project_name",
            "name must contain at least one letter or digit",
        ));
    }
    Ok(())
}

/// Identifier stem for the derived `db_name` and `db_user` defaults.
///
/// The snake-cased project name reduced to ASCII letters, digits and `_`,
/// prefixed with `db_` when it would start with a digit. Falls back to
/// `app` when nothing survives.
fn identifier_base(project_name: &str) -> String {
    let snake = to_snake_case(project_name);
    let mut base = String::with_capacity(snake.len());
    for c in snake.chars() {
        if c.is_ascii_alphanumeric() || (c == '_' && !base.is_empty() && !base.ends_with('_')) {
            base.push(c);
        }
    }
    let base = base.trim_end_matches('_');

    if base.is_empty() {
        "app".to_string()
    } else if base.starts_with(|c: char| c.is_ascii_digit()) {
        format!("db_{base}")
    } else {
        base.to_string()
    }
}

/// Database identifiers land in SQL scripts and file names.
fn validate_identifier(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(invalid(field, "cannot be empty"));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(
            field,
            format!("'{value}' may only contain letters, digits and '_'"),
        ));
    }
    if value.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid(field, format!("'{value}' cannot start with a digit")));
    }
    Ok(())
}
