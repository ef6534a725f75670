//! Catalog Service - read-only queries over the template catalog.
//!
//! Separated from RenderService for single responsibility.

use serde::Serialize;
use tracing::debug;

use crate::{
    domain::{ProjectConfig, TemplateCatalog, TemplateEntry},
    error::FullstackResult,
};

/// Information about a catalog entry for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub key: String,
    pub path: String,
    /// `group=value` for variant entries.
    pub variant: Option<String>,
    pub executable: bool,
    pub bytes: usize,
}

impl From<&TemplateEntry> for EntryInfo {
    fn from(entry: &TemplateEntry) -> Self {
        Self {
            key: entry.key().to_string(),
            path: entry.path_pattern().to_string(),
            variant: entry
                .variant()
                .map(|v| format!("{}={}", v.group(), v.value())),
            executable: entry.permissions().executable_flag(),
            bytes: entry.content().as_str().len(),
        }
    }
}

/// Service for catalog queries.
pub struct CatalogService<'a> {
    catalog: &'a TemplateCatalog,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    pub fn new(catalog: &'a TemplateCatalog) -> Self {
        Self { catalog }
    }

    /// Every registered entry, in registration order.
    pub fn list(&self) -> Vec<EntryInfo> {
        self.catalog.all_entries().iter().map(EntryInfo::from).collect()
    }

    /// Entries that a render of `config` would write.
    pub fn resolved(&self, config: &ProjectConfig) -> FullstackResult<Vec<EntryInfo>> {
        let entries = self.catalog.resolve(config)?;
        debug!(
            database = %config.database_engine(),
            resolved = entries.len(),
            "listing resolved entries"
        );
        Ok(entries.into_iter().map(EntryInfo::from).collect())
    }

    /// Names of the variant groups with their values, for summaries.
    pub fn groups(&self) -> Vec<(String, Vec<String>)> {
        self.catalog
            .variant_groups()
            .into_iter()
            .map(|g| (g.name, g.values))
            .collect()
    }
}
