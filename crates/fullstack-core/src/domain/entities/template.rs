//! Template entries: the unit the catalog registers and the renderer consumes.
//!
//! An entry pairs a logical key (`backend/main`) with a path pattern and a
//! content pattern. Both patterns may contain `{{placeholder}}` tokens that
//! the [`RenderContext`](super::render_context::RenderContext) fills in.
//!
//! Entries that belong to a variant group are mutually exclusive with the
//! other members of that group; the catalog picks exactly one per group.

use std::fmt;

use crate::domain::{
    entities::common::Permissions,
    error::DomainError,
    value_objects::{DatabaseEngine, VariantSelector},
};

use super::config::ProjectConfig;

// ============================================================================
// Identity
// ============================================================================

/// Logical name of a template, unique within a catalog.
///
/// Keys are slash-separated (`db/postgres.env`) and never change with the
/// configuration, unlike the paths they render to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateKey(String);

impl TemplateKey {
    pub fn try_new(key: impl Into<String>) -> Result<Self, DomainError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(DomainError::InvalidTemplate("template key cannot be empty".into()));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidTemplate(format!(
                "template key '{key}' cannot contain whitespace"
            )));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Content storage
// ============================================================================

/// Where template text lives.
///
/// Built-in templates are compiled in with `include_str!` and borrowed;
/// templates loaded from a user directory own their text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compile-time string literal (e.g., `include_str!("main.py")`)
    Static(&'static str),

    /// Runtime-owned string (read from disk)
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    /// Get string slice regardless of storage type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    /// Quick check used by listings; rendering still scans every entry.
    pub fn contains_placeholder(&self) -> bool {
        self.as_str().contains("{{") && self.as_str().contains("}}")
    }
}

// ============================================================================
// Variants
// ============================================================================

/// Membership of an entry in a variant group.
///
/// `group` names the set of alternatives (`db-env`), `selector` names the
/// configuration field that chooses between them, and `value` is the field
/// value this entry answers to (`sqlite`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variant {
    group: String,
    selector: VariantSelector,
    value: String,
}

impl Variant {
    pub fn new(
        group: impl Into<String>,
        selector: VariantSelector,
        value: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let group = group.into();
        let value = value.into().to_ascii_lowercase();
        if group.trim().is_empty() {
            return Err(DomainError::InvalidTemplate("variant group cannot be empty".into()));
        }
        if value.trim().is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "variant value in group '{group}' cannot be empty"
            )));
        }
        Ok(Self {
            group,
            selector,
            value,
        })
    }

    /// Shorthand for the common case: a group selected by database engine.
    pub fn database(group: impl Into<String>, engine: DatabaseEngine) -> Result<Self, DomainError> {
        Self::new(group, VariantSelector::Database, engine.as_str())
    }

    pub fn group(&self) -> &str {
        &self.group
    }
    pub const fn selector(&self) -> VariantSelector {
        self.selector
    }
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether `config` selects this entry within its group.
    pub fn matches(&self, config: &ProjectConfig) -> bool {
        selected_value(self.selector, config) == self.value
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} = {}", self.group, self.selector, self.value)
    }
}

/// The value a configuration presents to a selector.
pub fn selected_value(selector: VariantSelector, config: &ProjectConfig) -> &'static str {
    match selector {
        VariantSelector::Database => config.database_engine().as_str(),
    }
}

// ============================================================================
// Entry
// ============================================================================

/// One registrable template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    key: TemplateKey,
    path_pattern: String,
    content: TemplateSource,
    variant: Option<Variant>,
    permissions: Permissions,
}

impl TemplateEntry {
    /// Create an always-selected entry.
    ///
    /// # Errors
    ///
    /// `InvalidTemplate` if the key or path pattern is empty.
    pub fn new(
        key: impl Into<String>,
        path_pattern: impl Into<String>,
        content: impl Into<TemplateSource>,
    ) -> Result<Self, DomainError> {
        let key = TemplateKey::try_new(key)?;
        let path_pattern = path_pattern.into();
        if path_pattern.trim().is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "template '{key}' has an empty path pattern"
            )));
        }
        Ok(Self {
            key,
            path_pattern,
            content: content.into(),
            variant: None,
            permissions: Permissions::default(),
        })
    }

    /// Place this entry in a variant group.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Mark the rendered file executable.
    pub fn executable(mut self) -> Self {
        self.permissions = Permissions::executable();
        self
    }

    pub fn key(&self) -> &TemplateKey {
        &self.key
    }
    pub fn path_pattern(&self) -> &str {
        &self.path_pattern
    }
    pub fn content(&self) -> &TemplateSource {
        &self.content
    }
    pub fn variant(&self) -> Option<&Variant> {
        self.variant.as_ref()
    }
    pub const fn permissions(&self) -> Permissions {
        self.permissions
    }

    /// Entries without a variant are always selected.
    pub fn is_selected_by(&self, config: &ProjectConfig) -> bool {
        self.variant.as_ref().is_none_or(|v| v.matches(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_config() -> ProjectConfig {
        ProjectConfig::builder("demo")
            .database(DatabaseEngine::Sqlite)
            .build()
            .unwrap()
    }

    #[test]
    fn key_rejects_blank_and_whitespace() {
        assert!(TemplateKey::try_new("").is_err());
        assert!(TemplateKey::try_new("backend main").is_err());
        assert_eq!(TemplateKey::try_new("backend/main").unwrap().as_str(), "backend/main");
    }

    #[test]
    fn entry_requires_path_pattern() {
        assert!(TemplateEntry::new("readme", "  ", "# hi").is_err());
    }

    #[test]
    fn plain_entry_is_always_selected() {
        let entry = TemplateEntry::new("readme", "README.md", "# {{project_name}}").unwrap();
        assert!(entry.is_selected_by(&sqlite_config()));
        assert!(entry.content().contains_placeholder());
    }

    #[test]
    fn variant_entry_follows_database_engine() {
        let pg = TemplateEntry::new("db/postgres.env", ".env", "")
            .unwrap()
            .with_variant(Variant::database("db-env", DatabaseEngine::Postgres).unwrap());
        let lite = TemplateEntry::new("db/sqlite.env", ".env", "")
            .unwrap()
            .with_variant(Variant::database("db-env", DatabaseEngine::Sqlite).unwrap());

        let cfg = sqlite_config();
        assert!(!pg.is_selected_by(&cfg));
        assert!(lite.is_selected_by(&cfg));
    }

    #[test]
    fn variant_value_is_case_insensitive() {
        let v = Variant::new("db-env", VariantSelector::Database, "SQLite").unwrap();
        assert_eq!(v.value(), "sqlite");
        assert!(v.matches(&sqlite_config()));
    }

    #[test]
    fn executable_sets_permission_flag() {
        let entry = TemplateEntry::new("scripts/start", "start.py", "").unwrap().executable();
        assert!(entry.permissions().executable_flag());
    }
}
