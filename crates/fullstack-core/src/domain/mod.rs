//! Core domain layer for fullstack.
//!
//! This module contains pure business logic. All I/O is handled via ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: `tracing` lives in the application layer
//! - **Immutable entities**: configs, catalogs and manifests never change after construction
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    common::{Permissions, RelativePath},
    catalog::{TemplateCatalog, TemplateCatalogBuilder, VariantGroup},
    config::{ProjectConfig, ProjectConfigBuilder},
    manifest::{ManifestEntry, RenderManifest},
    render_context::RenderContext,
    staged_project::{StagedFile, StagedProject},
    template::{TemplateEntry, TemplateKey, TemplateSource, Variant},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{DatabaseEngine, VariantSelector};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog(extra: Option<TemplateEntry>) -> TemplateCatalog {
        let mut builder = TemplateCatalog::builder()
            .register(TemplateEntry::new("readme", "README.md", "# {{project_name}}").unwrap())
            .register(
                TemplateEntry::new("db/postgres.env", ".env", "PORT={{db_port}}")
                    .unwrap()
                    .with_variant(Variant::database("db-env", DatabaseEngine::Postgres).unwrap()),
            )
            .register(
                TemplateEntry::new("db/sqlite.env", ".env", "URL={{database_url}}")
                    .unwrap()
                    .with_variant(Variant::database("db-env", DatabaseEngine::Sqlite).unwrap()),
            );
        if let Some(entry) = extra {
            builder = builder.register(entry);
        }
        builder.build().unwrap()
    }

    // ========================================================================
    // Cross-entity validation
    // ========================================================================

    #[test]
    fn validator_accepts_engine_specific_tokens_in_matching_variant() {
        // db_port only exists for postgres, and only the postgres entry uses it.
        assert!(DomainValidator::validate_catalog(&sample_catalog(None)).is_ok());
    }

    #[test]
    fn validator_rejects_db_port_in_shared_entry() {
        let extra = TemplateEntry::new("backend/main", "main.py", "PORT = {{db_port}}").unwrap();
        let err = DomainValidator::validate_catalog(&sample_catalog(Some(extra))).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedPlaceholder {
                key: "backend/main".into(),
                token: "db_port".into()
            }
        );
    }

    #[test]
    fn validator_checks_path_patterns() {
        let extra = TemplateEntry::new("init", "db/{{schema}}.sql", "").unwrap();
        assert!(DomainValidator::validate_catalog(&sample_catalog(Some(extra))).is_err());
    }

    #[test]
    fn validator_reports_missing_variant() {
        let catalog = TemplateCatalog::builder()
            .register(
                TemplateEntry::new("db/postgres.env", ".env", "")
                    .unwrap()
                    .with_variant(Variant::database("db-env", DatabaseEngine::Postgres).unwrap()),
            )
            .build()
            .unwrap();
        assert!(matches!(
            DomainValidator::validate_catalog(&catalog),
            Err(DomainError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn config_validation_is_repeatable() {
        let cfg = ProjectConfig::builder("demo").build().unwrap();
        assert!(DomainValidator::validate_config(&cfg).is_ok());
    }
}
