//! The render manifest: what a committed render wrote, in catalog order.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Logical template key.
    pub key: String,
    /// Path relative to the project root, forward slashes.
    pub path: String,
    /// Length of the written content in bytes.
    pub bytes: usize,
    pub executable: bool,
}

/// Immutable record of a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderManifest {
    root: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl RenderManifest {
    pub(crate) fn new(root: PathBuf, entries: Vec<ManifestEntry>) -> Self {
        Self { root, entries }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.bytes).sum()
    }

    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
