//! Domain value objects: DatabaseEngine, VariantSelector.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Their only job is to define the variants, their string representations,
//! and their `FromStr` parsers.
//!
//! # Adding a Database Engine
//!
//! 1. Add the enum variant here, with its `as_str` and `FromStr` arms
//! 2. Register one catalog entry per variant group for the new value
//! 3. Done: the renderer never branches on the engine

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── DatabaseEngine ────────────────────────────────────────────────────────────

/// Persistence backend for the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    #[default]
    Postgres,
    Sqlite,
}

impl DatabaseEngine {
    pub const ALL: [DatabaseEngine; 2] = [Self::Postgres, Self::Sqlite];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// Whether the engine listens on a network port.
    pub const fn uses_port(self) -> bool {
        matches!(self, Self::Postgres)
    }

    pub const fn default_port(self) -> Option<u16> {
        match self {
            Self::Postgres => Some(5432),
            Self::Sqlite => None,
        }
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseEngine {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(DomainError::InvalidConfiguration {
                field: "database",
                reason: format!("unknown database engine: {other}"),
            }),
        }
    }
}

// ── VariantSelector ───────────────────────────────────────────────────────────

/// The configuration field a variant group is keyed on.
///
/// A variant group names *which* alternatives exist; the selector names
/// *what* picks between them. Every entry of one group shares a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantSelector {
    /// Selected by [`DatabaseEngine`].
    Database,
}

impl VariantSelector {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
        }
    }
}

impl fmt::Display for VariantSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantSelector {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(Self::Database),
            other => Err(DomainError::InvalidTemplate(format!(
                "unknown variant selector: {other}"
            ))),
        }
    }
}
