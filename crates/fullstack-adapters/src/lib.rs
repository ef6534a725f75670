//! Infrastructure adapters for fullstack.
//!
//! This crate implements the ports defined in `fullstack-core::application::ports`
//! and supplies the template catalogs: the built-in one compiled into the
//! binary, and the loader for user catalogs on disk.

pub mod builtin_catalog;
pub mod catalog_loader;
pub mod filesystem;

// Re-export commonly used adapters
pub use builtin_catalog::builtin_catalog;
pub use catalog_loader::{CatalogLoadError, CatalogLoader, load_catalog};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
