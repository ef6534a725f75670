//! fullstack-core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the fullstack
//! project scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          fullstack-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (RenderService, CatalogService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │            (Driven: Filesystem)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   fullstack-adapters (Infrastructure)   │
//! │ (LocalFilesystem, builtin catalog, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectConfig, TemplateCatalog, ...)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fullstack_core::prelude::*;
//!
//! let config = ProjectConfig::builder("demo")
//!     .database(DatabaseEngine::Sqlite)
//!     .build()?;
//!
//! // catalog and filesystem come from fullstack-adapters
//! let service = RenderService::new(filesystem, ".");
//! let manifest = service.render(&config, &catalog)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, CatalogService, EntryInfo, RenderPhase, RenderService,
        ports::Filesystem,
    };
    pub use crate::domain::{
        DatabaseEngine, DomainError, DomainValidator, ManifestEntry, Permissions, ProjectConfig,
        ProjectConfigBuilder, RenderContext, RenderManifest, StagedProject, TemplateCatalog,
        TemplateCatalogBuilder, TemplateEntry, TemplateSource, Variant, VariantSelector,
    };
    pub use crate::error::{ErrorCategory, FullstackError, FullstackResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
