//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fullstack-adapters` crate provides implementations.

use crate::error::FullstackResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `fullstack_adapters::filesystem::LocalFilesystem` (production)
/// - `fullstack_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `create_dir` must fail if the directory exists; the renderer relies on
///   it to claim the project root
/// - Permissions are capability-based, not Unix-specific
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create exactly one directory. Fails with `ProjectAlreadyExists` if
    /// the path exists.
    fn create_dir(&self, path: &Path) -> FullstackResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> FullstackResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> FullstackResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> FullstackResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> FullstackResult<()>;
}
