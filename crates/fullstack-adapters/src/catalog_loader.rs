//! Filesystem-based catalog loader.
//!
//! Reads a `catalog.toml` manifest from a template directory and turns it
//! into a [`TemplateCatalog`], going through the same validation as the
//! built-in catalog.
//!
//! # Directory layout expected
//!
//! ```text
//! my-templates/
//! ├── catalog.toml        ← manifest (required)
//! ├── README.md
//! ├── backend/
//! │   └── main.py
//! └── db/
//!     ├── postgres.env
//!     └── sqlite.env
//! ```
//!
//! # `catalog.toml` format
//!
//! ```toml
//! [[entries]]
//! key    = "readme"            # unique logical name
//! path   = "README.md"         # target path pattern, may use {{placeholders}}
//! source = "README.md"         # file relative to the template directory
//!
//! [[entries]]
//! key      = "db/sqlite.env"
//! path     = ".env"
//! source   = "db/sqlite.env"
//! group    = "db-env"          # optional variant group
//! value    = "sqlite"          # required with group
//! selector = "database"        # optional, defaults to database
//!
//! [[entries]]
//! key        = "scripts/start"
//! path       = "start.py"
//! source     = "start.py"
//! executable = true
//! ```
//!
//! Entries are registered in file order, which is also the order of the
//! render manifest.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use fullstack_core::domain::{
    DomainError, DomainValidator, RelativePath, TemplateCatalog, TemplateEntry, Variant,
    VariantSelector,
};

use crate::builtin_catalog::builtin_catalog;

/// Name of the manifest file inside a template directory.
pub const MANIFEST_FILE: &str = "catalog.toml";

/// Errors raised while loading a catalog from disk.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("templates directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("entry '{key}' sets only one of 'group' and 'value'")]
    IncompleteVariant { key: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CatalogLoadError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirectoryNotFound(_) => vec![
                "Check the --templates path".into(),
                format!("The directory must contain a {MANIFEST_FILE}"),
            ],
            Self::Parse { .. } => vec![
                format!("Each [[entries]] table in {MANIFEST_FILE} needs key, path and source"),
            ],
            Self::IncompleteVariant { .. } => {
                vec!["Set both 'group' and 'value', or neither".into()]
            }
            Self::Domain(e) => e.suggestions(),
            Self::Io { .. } => vec!["Check that the file exists and is readable".into()],
        }
    }
}

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `catalog.toml` file.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogManifest {
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

/// One `[[entries]]` table.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub key: String,
    pub path: String,
    /// Template file, relative to the template directory.
    pub source: String,
    pub group: Option<String>,
    pub value: Option<String>,
    #[serde(default = "default_selector")]
    pub selector: VariantSelector,
    #[serde(default)]
    pub executable: bool,
}

fn default_selector() -> VariantSelector {
    VariantSelector::Database
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads a [`TemplateCatalog`] from a directory holding `catalog.toml`.
pub struct CatalogLoader {
    templates_dir: PathBuf,
}

impl CatalogLoader {
    /// Create a loader pointed at `templates_dir`.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Read the manifest and every source it names.
    ///
    /// Files in the directory that no entry references are reported with a
    /// `WARN` log and otherwise ignored.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load(&self) -> Result<TemplateCatalog, CatalogLoadError> {
        if !self.templates_dir.is_dir() {
            return Err(CatalogLoadError::DirectoryNotFound(self.templates_dir.clone()));
        }

        let manifest_path = self.templates_dir.join(MANIFEST_FILE);
        let raw = read(&manifest_path)?;
        let manifest: CatalogManifest =
            toml::from_str(&raw).map_err(|source| CatalogLoadError::Parse {
                path: manifest_path.clone(),
                source,
            })?;

        let mut builder = TemplateCatalog::builder();
        let mut referenced = HashSet::new();

        for item in manifest.entries {
            let source = RelativePath::try_new(&item.source)?;
            let content = read(&self.templates_dir.join(source.as_path()))?;
            referenced.insert(source.to_slash_string());

            let mut entry = TemplateEntry::new(item.key.clone(), item.path, content)?;
            match (item.group, item.value) {
                (Some(group), Some(value)) => {
                    entry = entry.with_variant(Variant::new(group, item.selector, value)?);
                }
                (None, None) => {}
                _ => return Err(CatalogLoadError::IncompleteVariant { key: item.key }),
            }
            if item.executable {
                entry = entry.executable();
            }

            debug!(key = %entry.key(), source = %source, "loaded template");
            builder.push(entry);
        }

        let catalog = builder.build()?;
        self.warn_unreferenced(&referenced);

        if let Err(e) = DomainValidator::validate_catalog(&catalog) {
            warn!(error = %e, "catalog does not render for every database engine");
        }

        info!(entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    fn warn_unreferenced(&self, referenced: &HashSet<String>) {
        for walk_entry in WalkDir::new(&self.templates_dir)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let Ok(rel) = walk_entry.path().strip_prefix(&self.templates_dir) else {
                continue;
            };
            let Ok(rel) = RelativePath::try_new(rel) else {
                continue;
            };
            let rel = rel.to_slash_string();
            if rel != MANIFEST_FILE && !referenced.contains(&rel) {
                warn!(file = %rel, "template file is not referenced by {MANIFEST_FILE}");
            }
        }
    }
}

/// The catalog for this run: loaded from `templates_dir` when given,
/// otherwise the built-in one.
pub fn load_catalog(templates_dir: Option<&Path>) -> Result<TemplateCatalog, CatalogLoadError> {
    match templates_dir {
        Some(dir) => CatalogLoader::new(dir).load(),
        None => Ok(builtin_catalog()?),
    }
}

fn read(path: &Path) -> Result<String, CatalogLoadError> {
    fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fullstack_core::domain::{DatabaseEngine, ProjectConfig};
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn seeded() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.md", "# {{project_name}}\n");
        write(tmp.path(), "db/postgres.env", "PORT={{db_port}}\n");
        write(tmp.path(), "db/sqlite.env", "URL={{database_url}}\n");
        write(
            tmp.path(),
            MANIFEST_FILE,
            r#"
[[entries]]
key = "readme"
path = "README.md"
source = "README.md"

[[entries]]
key = "db/postgres.env"
path = ".env"
source = "db/postgres.env"
group = "db-env"
value = "postgres"

[[entries]]
key = "db/sqlite.env"
path = ".env"
source = "db/sqlite.env"
group = "db-env"
value = "sqlite"
executable = true
"#,
        );
        tmp
    }

    #[test]
    fn loads_entries_in_file_order() {
        let tmp = seeded();
        let catalog = CatalogLoader::new(tmp.path()).load().unwrap();

        let keys: Vec<_> = catalog.all_entries().iter().map(|e| e.key().as_str()).collect();
        assert_eq!(keys, ["readme", "db/postgres.env", "db/sqlite.env"]);
        assert!(catalog.get("db/sqlite.env").unwrap().permissions().executable_flag());

        let cfg = ProjectConfig::builder("demo")
            .database(DatabaseEngine::Sqlite)
            .build()
            .unwrap();
        assert_eq!(catalog.resolve(&cfg).unwrap().len(), 2);
    }

    #[test]
    fn missing_directory() {
        let err = CatalogLoader::new("/definitely/not/here").load().unwrap_err();
        assert!(matches!(err, CatalogLoadError::DirectoryNotFound(_)));
    }

    #[test]
    fn missing_source_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            MANIFEST_FILE,
            "[[entries]]\nkey = \"a\"\npath = \"a.txt\"\nsource = \"nope.txt\"\n",
        );
        let err = CatalogLoader::new(tmp.path()).load().unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }

    #[test]
    fn source_outside_directory_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            MANIFEST_FILE,
            "[[entries]]\nkey = \"a\"\npath = \"a.txt\"\nsource = \"../secret\"\n",
        );
        let err = CatalogLoader::new(tmp.path()).load().unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::Domain(DomainError::PathEscapesRoot { .. })
        ));
    }

    #[test]
    fn group_without_value_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.txt", "");
        write(
            tmp.path(),
            MANIFEST_FILE,
            "[[entries]]\nkey = \"a\"\npath = \"a.txt\"\nsource = \"a.txt\"\ngroup = \"g\"\n",
        );
        let err = CatalogLoader::new(tmp.path()).load().unwrap_err();
        assert!(matches!(err, CatalogLoadError::IncompleteVariant { .. }));
    }

    #[test]
    fn duplicate_variant_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.txt", "");
        write(
            tmp.path(),
            MANIFEST_FILE,
            r#"
[[entries]]
key = "a"
path = "a.txt"
source = "a.txt"
group = "g"
value = "sqlite"

[[entries]]
key = "b"
path = "b.txt"
source = "a.txt"
group = "g"
value = "sqlite"
"#,
        );
        let err = CatalogLoader::new(tmp.path()).load().unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::Domain(DomainError::DuplicateVariant { .. })
        ));
    }

    #[test]
    fn unknown_manifest_field_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            MANIFEST_FILE,
            "[[entries]]\nkey = \"a\"\npath = \"a\"\nsource = \"a\"\nmode = 755\n",
        );
        let err = CatalogLoader::new(tmp.path()).load().unwrap_err();
        assert!(matches!(err, CatalogLoadError::Parse { .. }));
    }

    #[test]
    fn load_catalog_defaults_to_builtin() {
        let catalog = load_catalog(None).unwrap();
        assert!(catalog.get("scripts/start").is_some());
    }
}
