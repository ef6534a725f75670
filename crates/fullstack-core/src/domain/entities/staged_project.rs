use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
};

use super::manifest::{ManifestEntry, RenderManifest};

/// Fully rendered project held in memory, ready for materialization.
///
/// This is the output of the staging phase. Nothing here has touched the
/// filesystem yet; `validate()` must pass before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedProject {
    root: PathBuf,
    files: Vec<StagedFile>,
}

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub key: String,
    pub path: RelativePath,
    pub content: String,
    pub permissions: Permissions,
}

impl StagedFile {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

impl StagedProject {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, file: StagedFile) {
        self.files.push(file);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Reject an empty project, any two files sharing a path, and a file
    /// whose path is also the parent directory of another file.
    ///
    /// The collision error lists every key that resolved to the first
    /// colliding path, in registration order. For a file shadowing a
    /// directory it names the file first, then the nested file.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "no templates resolved for this configuration".into(),
            ));
        }

        let mut by_path: BTreeMap<&RelativePath, Vec<&str>> = BTreeMap::new();
        for file in &self.files {
            by_path.entry(&file.path).or_default().push(&file.key);
        }

        // Report in staging order, not path order.
        for file in &self.files {
            if let Some(keys) = by_path.get(&file.path).filter(|k| k.len() > 1) {
                return Err(DomainError::PathCollision {
                    path: file.path.to_slash_string(),
                    keys: keys.iter().map(|k| k.to_string()).collect(),
                });
            }
        }

        for file in &self.files {
            let nested = self.files.iter().find(|other| {
                other.path != file.path && other.path.as_path().starts_with(file.path.as_path())
            });
            if let Some(nested) = nested {
                return Err(DomainError::PathCollision {
                    path: file.path.to_slash_string(),
                    keys: vec![file.key.clone(), nested.key.clone()],
                });
            }
        }

        Ok(())
    }

    /// Parent directories that must exist before writing, shallowest first,
    /// without duplicates. The root itself is not included.
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for file in &self.files {
            let mut ancestors: Vec<&Path> = file
                .path
                .as_path()
                .ancestors()
                .skip(1)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            ancestors.reverse();
            for dir in ancestors {
                if !dirs.iter().any(|d| d == dir) {
                    dirs.push(dir.to_path_buf());
                }
            }
        }
        dirs
    }

    /// Manifest describing these files, for dry runs and committed renders.
    pub fn to_manifest(&self) -> RenderManifest {
        RenderManifest::new(
            self.root.clone(),
            self.files
                .iter()
                .map(|f| ManifestEntry {
                    key: f.key.clone(),
                    path: f.path.to_slash_string(),
                    bytes: f.size(),
                    executable: f.permissions.executable_flag(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(key: &str, path: &str) -> StagedFile {
        StagedFile {
            key: key.into(),
            path: RelativePath::try_new(path).unwrap(),
            content: "print('hi')\n".into(),
            permissions: Permissions::default(),
        }
    }

    #[test]
    fn collision_lists_colliding_keys() {
        let mut project = StagedProject::new("demo");
        project.push(file("readme", "README.md"));
        project.push(file("a", "src/config.py"));
        project.push(file("b", "src/config.py"));

        assert_eq!(
            project.validate().unwrap_err(),
            DomainError::PathCollision {
                path: "src/config.py".into(),
                keys: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn file_cannot_shadow_a_directory() {
        let mut project = StagedProject::new("demo");
        project.push(file("backend/main", "backend/x.py"));
        project.push(file("backend", "backend"));

        assert_eq!(
            project.validate().unwrap_err(),
            DomainError::PathCollision {
                path: "backend".into(),
                keys: vec!["backend".into(), "backend/main".into()],
            }
        );
    }

    #[test]
    fn shared_name_prefix_is_not_a_collision() {
        let mut project = StagedProject::new("demo");
        project.push(file("a", "backend"));
        project.push(file("b", "backend_v2/x.py"));

        assert!(project.validate().is_ok());
    }

    #[test]
    fn empty_project_is_invalid() {
        assert!(StagedProject::new("demo").validate().is_err());
    }

    #[test]
    fn directories_are_unique_and_parent_first() {
        let mut project = StagedProject::new("demo");
        project.push(file("main", "backend/app/main.py"));
        project.push(file("api", "backend/app/api/__init__.py"));
        project.push(file("readme", "README.md"));

        assert_eq!(
            project.directories(),
            vec![
                PathBuf::from("backend"),
                PathBuf::from("backend/app"),
                PathBuf::from("backend/app/api"),
            ]
        );
    }

    #[test]
    fn manifest_mirrors_staged_order() {
        let mut project = StagedProject::new("demo");
        project.push(file("b", "b.txt"));
        project.push(file("a", "a.txt"));
        let manifest = project.to_manifest();
        let keys: Vec<_> = manifest.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(manifest.total_bytes(), 24);
    }
}
