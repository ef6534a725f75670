//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FULLSTACK_` prefix, `__` between sections
//!    (`FULLSTACK_DEFAULTS__API_PORT=9000`)
//! 3. The file passed with `--config`
//! 4. `.fullstack.toml` in the current directory
//! 5. The global config file ([`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fullstack_core::domain::DatabaseEngine;

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".fullstack.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "FULLSTACK";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

/// Values used by `fullstack new` when the matching flag is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub api_port: u16,
    pub frontend_port: u16,
    pub database: DatabaseEngine,
    /// Only used for PostgreSQL.
    pub db_port: u16,
    pub db_host: String,
    // Derived from the project name when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_password: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            api_port: 8000,
            frontend_port: 3000,
            database: DatabaseEngine::Postgres,
            db_port: 5432,
            db_host: "localhost".into(),
            db_user: None,
            db_password: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template directory used instead of the built-in catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, layering files and environment over defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; unlike the
    /// implicit locations it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(
                Config::try_from(&Self::default()).context("failed to encode built-in defaults")?,
            )
            .add_source(File::from(Self::config_path()).format(FileFormat::Toml).required(false))
            .add_source(
                File::from(Path::new(LOCAL_CONFIG_FILE))
                    .format(FileFormat::Toml)
                    .required(false),
            );

        if let Some(path) = config_file {
            debug!(path = %path.display(), "using explicit config file");
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?;

        config
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.fullstack.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "fullstack", "fullstack")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}
