//! The template catalog: an immutable, validated registry of entries.
//!
//! Built once at startup through [`TemplateCatalogBuilder`] and then only
//! read. All operations are pure.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::{error::DomainError, value_objects::VariantSelector};

use super::{
    config::ProjectConfig,
    template::{TemplateEntry, selected_value},
};

/// Summary of one variant group, in first-registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup {
    pub name: String,
    pub selector: VariantSelector,
    /// Values in registration order.
    pub values: Vec<String>,
}

/// Immutable registry of template entries.
///
/// Guaranteed on construction:
/// - keys are unique
/// - every group uses a single selector
/// - no two entries in a group share a value
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    entries: Vec<TemplateEntry>,
    index: HashMap<String, usize>,
}

impl TemplateCatalog {
    pub fn builder() -> TemplateCatalogBuilder {
        TemplateCatalogBuilder::default()
    }

    /// Every registered entry, in registration order.
    pub fn all_entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&TemplateEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries active for `config`, in registration order.
    ///
    /// Plain entries are always included; each variant group contributes the
    /// single entry whose value matches the selector's field.
    ///
    /// # Errors
    ///
    /// `UnknownVariant` naming the first group with no entry for the
    /// configured value.
    pub fn resolve(&self, config: &ProjectConfig) -> Result<Vec<&TemplateEntry>, DomainError> {
        for group in self.variant_groups() {
            let requested = selected_value(group.selector, config);
            if !group.values.iter().any(|v| v == requested) {
                return Err(DomainError::UnknownVariant {
                    group: group.name,
                    selector: group.selector.to_string(),
                    requested: requested.to_string(),
                    available: group.values,
                });
            }
        }

        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.is_selected_by(config))
            .collect())
    }

    /// Variant groups in the order their first member was registered.
    pub fn variant_groups(&self) -> Vec<VariantGroup> {
        let mut groups: Vec<VariantGroup> = Vec::new();
        for variant in self.entries.iter().filter_map(TemplateEntry::variant) {
            match groups.iter_mut().find(|g| g.name == variant.group()) {
                Some(group) => group.values.push(variant.value().to_string()),
                None => groups.push(VariantGroup {
                    name: variant.group().to_string(),
                    selector: variant.selector(),
                    values: vec![variant.value().to_string()],
                }),
            }
        }
        groups
    }
}

/// Collects entries and validates them as a whole at `build()`.
#[derive(Debug, Default)]
pub struct TemplateCatalogBuilder {
    entries: Vec<TemplateEntry>,
}

impl TemplateCatalogBuilder {
    pub fn register(mut self, entry: TemplateEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Non-consuming form for loops.
    pub fn push(&mut self, entry: TemplateEntry) {
        self.entries.push(entry);
    }

    /// # Errors
    ///
    /// - `DuplicateKey` if two entries share a key
    /// - `InvalidTemplate` if a group mixes selectors
    /// - `DuplicateVariant` if a group registers a value twice
    pub fn build(self) -> Result<TemplateCatalog, DomainError> {
        let mut index = HashMap::with_capacity(self.entries.len());
        let mut selectors: BTreeMap<&str, VariantSelector> = BTreeMap::new();
        let mut variant_values: HashSet<(&str, &str)> = HashSet::new();

        for (i, entry) in self.entries.iter().enumerate() {
            let key = entry.key().as_str();
            if index.insert(key.to_string(), i).is_some() {
                return Err(DomainError::DuplicateKey {
                    key: key.to_string(),
                });
            }

            let Some(variant) = entry.variant() else {
                continue;
            };

            let selector = *selectors.entry(variant.group()).or_insert(variant.selector());
            if selector != variant.selector() {
                return Err(DomainError::InvalidTemplate(format!(
                    "variant group '{}' is selected by both {} and {}",
                    variant.group(),
                    selector,
                    variant.selector()
                )));
            }

            if !variant_values.insert((variant.group(), variant.value())) {
                return Err(DomainError::DuplicateVariant {
                    group: variant.group().to_string(),
                    value: variant.value().to_string(),
                });
            }
        }

        Ok(TemplateCatalog {
            entries: self.entries,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{entities::template::Variant, value_objects::DatabaseEngine};

    fn entry(key: &str, path: &str) -> TemplateEntry {
        TemplateEntry::new(key, path, "x").unwrap()
    }

    fn db(key: &str, group: &str, engine: DatabaseEngine) -> TemplateEntry {
        entry(key, ".env").with_variant(Variant::database(group, engine).unwrap())
    }

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::builder()
            .register(entry("readme", "README.md"))
            .register(db("db/postgres.env", "db-env", DatabaseEngine::Postgres))
            .register(entry("backend/main", "backend/app/main.py"))
            .register(db("db/sqlite.env", "db-env", DatabaseEngine::Sqlite))
            .build()
            .unwrap()
    }

    fn config(engine: DatabaseEngine) -> ProjectConfig {
        ProjectConfig::builder("demo").database(engine).build().unwrap()
    }

    fn keys<'a>(entries: &[&'a TemplateEntry]) -> Vec<&'a str> {
        entries.iter().map(|e| e.key().as_str()).collect()
    }

    #[test]
    fn resolve_keeps_registration_order() {
        let c = catalog();
        let resolved = c.resolve(&config(DatabaseEngine::Sqlite)).unwrap();
        assert_eq!(keys(&resolved), ["readme", "backend/main", "db/sqlite.env"]);
    }

    #[test]
    fn resolve_is_idempotent() {
        let c = catalog();
        let cfg = config(DatabaseEngine::Postgres);
        assert_eq!(c.resolve(&cfg).unwrap(), c.resolve(&cfg).unwrap());
    }

    #[test]
    fn each_group_contributes_exactly_one_entry() {
        let c = catalog();
        for engine in DatabaseEngine::ALL {
            let resolved = c.resolve(&config(engine)).unwrap();
            let in_group = resolved
                .iter()
                .filter(|e| e.variant().is_some_and(|v| v.group() == "db-env"))
                .count();
            assert_eq!(in_group, 1, "engine {engine}");
        }
    }

    #[test]
    fn missing_value_is_unknown_variant() {
        let c = TemplateCatalog::builder()
            .register(db("db/postgres.env", "db-env", DatabaseEngine::Postgres))
            .build()
            .unwrap();
        let err = c.resolve(&config(DatabaseEngine::Sqlite)).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownVariant {
                group: "db-env".into(),
                selector: "database".into(),
                requested: "sqlite".into(),
                available: vec!["postgres".into()],
            }
        );
    }

    #[test]
    fn all_entries_ignores_configuration() {
        assert_eq!(catalog().all_entries().len(), 4);
        assert_eq!(catalog().len(), 4);
    }

    #[test]
    fn get_by_key() {
        let c = catalog();
        assert_eq!(c.get("readme").unwrap().path_pattern(), "README.md");
        assert!(c.get("missing").is_none());
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let err = TemplateCatalog::builder()
            .register(entry("readme", "README.md"))
            .register(entry("readme", "README.txt"))
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateKey { .. }));
    }

    #[test]
    fn duplicate_variant_value_is_rejected() {
        let err = TemplateCatalog::builder()
            .register(db("a", "db-env", DatabaseEngine::Sqlite))
            .register(db("b", "db-env", DatabaseEngine::Sqlite))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateVariant {
                group: "db-env".into(),
                value: "sqlite".into()
            }
        );
    }

    #[test]
    fn variant_groups_summarise_values() {
        let groups = catalog().variant_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "db-env");
        assert_eq!(groups[0].values, ["postgres", "sqlite"]);
    }
}
