//! In-memory filesystem adapter for testing and dry runs.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use fullstack_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{FullstackError, FullstackResult},
};

/// In-memory filesystem.
///
/// Clones share state, so a test can hand one clone to the render service
/// and inspect the other. Writes to a path registered with
/// [`fail_on_write`](Self::fail_on_write) fail, for exercising rollback.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
    fail_on_write: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write to `path` fail with a filesystem error.
    pub fn fail_on_write(&self, path: impl Into<PathBuf>) {
        self.write().fail_on_write.insert(path.into());
    }

    /// Read a file's content.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().files.get(path).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.read().executables.contains(path)
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().files.keys().cloned().collect()
    }

    /// Seed a directory, e.g. to simulate an existing project.
    pub fn add_directory(&self, path: impl Into<PathBuf>) {
        self.write().directories.insert(path.into());
    }

    // A poisoned lock only means another test thread panicked; the maps are
    // still usable.
    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn fs_error(path: &Path, reason: &str) -> FullstackError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> FullstackResult<()> {
        let mut inner = self.write();
        if inner.directories.contains(path) || inner.files.contains_key(path) {
            return Err(ApplicationError::ProjectAlreadyExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FullstackResult<()> {
        let mut inner = self.write();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(fs_error(&current, "not a directory"));
            }
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> FullstackResult<()> {
        let mut inner = self.write();

        if inner.fail_on_write.contains(path) {
            return Err(fs_error(path, "injected write failure"));
        }

        let parent_missing = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !inner.directories.contains(p));
        if parent_missing {
            return Err(fs_error(path, "parent directory does not exist"));
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> FullstackResult<()> {
        let mut inner = self.write();

        if !inner.files.contains_key(path) {
            return Err(fs_error(path, "no such file"));
        }
        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> FullstackResult<()> {
        let mut inner = self.write();

        if !inner.directories.contains(path) {
            return Err(fs_error(path, "no such directory"));
        }
        inner.directories.retain(|d| !d.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));

        Ok(())
    }
}
