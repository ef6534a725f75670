pub mod catalog;
pub mod common;
pub mod config;
pub mod manifest;
pub mod render_context;
pub mod staged_project;
pub mod template;

pub use crate::domain::DomainError;
pub use catalog::{TemplateCatalog, TemplateCatalogBuilder, VariantGroup};
pub use config::{ProjectConfig, ProjectConfigBuilder};
pub use manifest::{ManifestEntry, RenderManifest};
pub use render_context::RenderContext;
pub use staged_project::{StagedFile, StagedProject};
pub use template::{TemplateEntry, TemplateKey, TemplateSource, Variant};
