//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use tracing::trace;

use fullstack_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{FullstackError, FullstackResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir(&self, path: &Path) -> FullstackResult<()> {
        trace!(path = %path.display(), "create_dir");
        std::fs::create_dir(path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                ApplicationError::ProjectAlreadyExists {
                    path: path.to_path_buf(),
                }
                .into()
            } else {
                map_io_error(path, e, "create directory")
            }
        })
    }

    fn create_dir_all(&self, path: &Path) -> FullstackResult<()> {
        trace!(path = %path.display(), "create_dir_all");
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> FullstackResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write_file");
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> FullstackResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if executable {
                let metadata =
                    std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
                let mut perms = metadata.permissions();
                let mode = perms.mode();
                perms.set_mode(mode | 0o111);
                std::fs::set_permissions(path, perms)
                    .map_err(|e| map_io_error(path, e, "set permissions"))?;
            }
        }
        #[cfg(not(unix))]
        {
            // No executable bit outside Unix.
            let _ = (path, executable);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling symlink still counts as taken.
        path.symlink_metadata().is_ok()
    }

    fn remove_dir_all(&self, path: &Path) -> FullstackResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> FullstackError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_dir_refuses_existing_directory() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let err = fs.create_dir(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            FullstackError::Application(ApplicationError::ProjectAlreadyExists { .. })
        ));
    }

    #[test]
    fn write_and_remove_round_trip() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let root = tmp.path().join("demo");

        fs.create_dir(&root).unwrap();
        fs.create_dir_all(&root.join("backend/app")).unwrap();
        fs.write_file(&root.join("backend/app/main.py"), "print(1)\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(root.join("backend/app/main.py")).unwrap(),
            "print(1)\n"
        );

        fs.remove_dir_all(&root).unwrap();
        assert!(!fs.exists(&root));
    }

    #[test]
    fn write_into_missing_directory_is_a_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .write_file(&tmp.path().join("missing/file.txt"), "x")
            .unwrap_err();
        assert_eq!(err.category(), fullstack_core::error::ErrorCategory::Internal);
    }

    #[cfg(unix)]
    #[test]
    fn set_permissions_adds_execute_bits() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("start.py");
        std::fs::write(&path, "#!/usr/bin/env python3\n").unwrap();

        LocalFilesystem::new().set_permissions(&path, true).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
