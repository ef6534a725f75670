//! The template catalog that ships with fullstack.
//!
//! Every template file lives under `templates/` in this crate and is compiled
//! into the binary with `include_str!`, so the built-in catalog never touches
//! the filesystem.
//!
//! # Layout of a generated project
//!
//! ```text
//! <project_name>/
//! ├── README.md
//! ├── .gitignore
//! ├── .env                      ← db-env group (postgres | sqlite)
//! ├── start.py                  ← executable
//! ├── backend/
//! │   ├── requirements.txt
//! │   └── app/
//! │       ├── main.py
//! │       ├── database.py       ← backend-database group
//! │       ├── api/__init__.py
//! │       └── models/__init__.py
//! ├── frontend/
//! │   ├── package.json
//! │   ├── .npmrc
//! │   ├── .env.local
//! │   ├── tsconfig.json
//! │   └── src/
//! │       ├── app/{layout,page}.tsx
//! │       └── styles/globals.css
//! └── db/init/<db_name>.sql     ← db-init group
//! ```

use tracing::{debug, instrument};

use fullstack_core::domain::{
    DatabaseEngine, DomainError, TemplateCatalog, TemplateEntry, Variant,
};

/// Variant group for the SQLAlchemy engine setup.
pub const GROUP_BACKEND_DATABASE: &str = "backend-database";
/// Variant group for the root `.env`.
pub const GROUP_DB_ENV: &str = "db-env";
/// Variant group for the database initialisation script.
pub const GROUP_DB_INIT: &str = "db-init";

macro_rules! template {
    ($path:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $path))
    };
}

/// Build the built-in catalog.
///
/// # Errors
///
/// Only on a defect in the entries below; the unit tests keep this from
/// happening in a release.
#[instrument]
pub fn builtin_catalog() -> Result<TemplateCatalog, DomainError> {
    let db = |group: &str, engine| Variant::database(group, engine);

    let catalog = TemplateCatalog::builder()
        .register(TemplateEntry::new("readme", "README.md", template!("README.md"))?)
        .register(TemplateEntry::new("gitignore", ".gitignore", template!("gitignore"))?)
        // ── backend ──────────────────────────────────────────────────────────
        .register(TemplateEntry::new(
            "backend/requirements",
            "backend/requirements.txt",
            template!("backend/requirements.txt"),
        )?)
        .register(TemplateEntry::new(
            "backend/main",
            "backend/app/main.py",
            template!("backend/main.py"),
        )?)
        .register(TemplateEntry::new(
            "backend/api",
            "backend/app/api/__init__.py",
            template!("backend/api.py"),
        )?)
        .register(TemplateEntry::new(
            "backend/models",
            "backend/app/models/__init__.py",
            template!("backend/models.py"),
        )?)
        .register(
            TemplateEntry::new(
                "backend/database.postgres",
                "backend/app/database.py",
                template!("backend/database.postgres.py"),
            )?
            .with_variant(db(GROUP_BACKEND_DATABASE, DatabaseEngine::Postgres)?),
        )
        .register(
            TemplateEntry::new(
                "backend/database.sqlite",
                "backend/app/database.py",
                template!("backend/database.sqlite.py"),
            )?
            .with_variant(db(GROUP_BACKEND_DATABASE, DatabaseEngine::Sqlite)?),
        )
        // ── frontend ─────────────────────────────────────────────────────────
        .register(TemplateEntry::new(
            "frontend/package",
            "frontend/package.json",
            template!("frontend/package.json"),
        )?)
        .register(TemplateEntry::new(
            "frontend/npmrc",
            "frontend/.npmrc",
            template!("frontend/npmrc"),
        )?)
        .register(TemplateEntry::new(
            "frontend/tsconfig",
            "frontend/tsconfig.json",
            template!("frontend/tsconfig.json"),
        )?)
        .register(TemplateEntry::new(
            "frontend/layout",
            "frontend/src/app/layout.tsx",
            template!("frontend/layout.tsx"),
        )?)
        .register(TemplateEntry::new(
            "frontend/page",
            "frontend/src/app/page.tsx",
            template!("frontend/page.tsx"),
        )?)
        .register(TemplateEntry::new(
            "frontend/styles",
            "frontend/src/styles/globals.css",
            template!("frontend/globals.css"),
        )?)
        .register(TemplateEntry::new(
            "frontend/env",
            "frontend/.env.local",
            template!("frontend/env.local"),
        )?)
        // ── database ─────────────────────────────────────────────────────────
        .register(
            TemplateEntry::new("db/postgres.env", ".env", template!("db/postgres.env"))?
                .with_variant(db(GROUP_DB_ENV, DatabaseEngine::Postgres)?),
        )
        .register(
            TemplateEntry::new("db/sqlite.env", ".env", template!("db/sqlite.env"))?
                .with_variant(db(GROUP_DB_ENV, DatabaseEngine::Sqlite)?),
        )
        .register(
            TemplateEntry::new(
                "db/postgres.init",
                "db/init/{{db_name}}.sql",
                template!("db/postgres.sql"),
            )?
            .with_variant(db(GROUP_DB_INIT, DatabaseEngine::Postgres)?),
        )
        .register(
            TemplateEntry::new(
                "db/sqlite.init",
                "db/init/{{db_name}}.sql",
                template!("db/sqlite.sql"),
            )?
            .with_variant(db(GROUP_DB_INIT, DatabaseEngine::Sqlite)?),
        )
        // ── scripts ──────────────────────────────────────────────────────────
        .register(
            TemplateEntry::new("scripts/start", "start.py", template!("scripts/start.py"))?
                .executable(),
        )
        .build()?;

    debug!(entries = catalog.len(), "built-in catalog ready");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fullstack_core::domain::{DomainValidator, ProjectConfig, RenderContext};

    fn config(engine: DatabaseEngine) -> ProjectConfig {
        ProjectConfig::builder("demo")
            .database(engine)
            .db_name("demo_db")
            .build()
            .unwrap()
    }

    #[test]
    fn builtin_catalog_builds() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.variant_groups().len(), 3);
    }

    #[test]
    fn builtin_catalog_passes_cross_engine_validation() {
        DomainValidator::validate_catalog(&builtin_catalog().unwrap()).unwrap();
    }

    #[test]
    fn every_entry_renders_completely_for_both_engines() {
        let catalog = builtin_catalog().unwrap();
        for engine in DatabaseEngine::ALL {
            let cfg = config(engine);
            let ctx = RenderContext::from_config(&cfg);
            for entry in catalog.resolve(&cfg).unwrap() {
                let key = entry.key().as_str();
                let path = ctx.render(key, entry.path_pattern()).unwrap();
                let content = ctx.render(key, entry.content().as_str()).unwrap();
                assert!(!path.contains("{{"), "{key}: {path}");
                assert!(!content.contains("{{"), "{key} ({engine}) left a placeholder");
            }
        }
    }

    #[test]
    fn each_variant_group_has_every_engine() {
        for group in builtin_catalog().unwrap().variant_groups() {
            for engine in DatabaseEngine::ALL {
                assert!(
                    group.values.iter().any(|v| v == engine.as_str()),
                    "{} lacks {engine}",
                    group.name
                );
            }
        }
    }

    #[test]
    fn start_script_is_executable() {
        let catalog = builtin_catalog().unwrap();
        let start = catalog.get("scripts/start").unwrap();
        assert!(start.permissions().executable_flag());
        assert!(start.content().as_str().starts_with("#!/usr/bin/env python3"));
    }

    #[test]
    fn registration_order_starts_with_readme_and_ends_with_start_script() {
        let catalog = builtin_catalog().unwrap();
        let keys: Vec<_> = catalog.all_entries().iter().map(|e| e.key().as_str()).collect();
        assert_eq!(keys.first(), Some(&"readme"));
        assert_eq!(keys.last(), Some(&"scripts/start"));
    }
}
