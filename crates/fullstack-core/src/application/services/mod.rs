//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "render a project" or "list the catalog".

pub mod catalog_service;
pub mod render_service;

pub use catalog_service::{CatalogService, EntryInfo};
pub use render_service::{RenderPhase, RenderService};
