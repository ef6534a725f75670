//! Render Service - main application orchestrator.
//!
//! This service coordinates one project generation:
//! 1. Resolve the active catalog entries for the configuration
//! 2. Render every path and content into an in-memory staged project
//! 3. Validate the staged project (path collisions)
//! 4. Write it all-or-nothing under `<base_dir>/<project_name>`
//!
//! Every failure before step 4 leaves the filesystem untouched. A failure
//! during step 4 removes the project root before the error is returned.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        DomainValidator as validator, ProjectConfig, RelativePath, RenderContext, RenderManifest,
        StagedFile, StagedProject, TemplateCatalog,
    },
    error::{FullstackError, FullstackResult},
};

/// Where a render is in its lifecycle.
///
/// `Idle → Resolving → Staging → Validating → Writing → Committed`, with
/// `RolledBack` reachable from any failing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    Resolving,
    Staging,
    Validating,
    Writing,
    Committed,
    RolledBack,
}

impl fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::Staging => "staging",
            Self::Validating => "validating",
            Self::Writing => "writing",
            Self::Committed => "committed",
            Self::RolledBack => "rolled-back",
        };
        f.write_str(s)
    }
}

/// Tracks the current phase of one render and logs each transition.
struct PhaseTracker {
    phase: RenderPhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            phase: RenderPhase::Idle,
        }
    }

    fn enter(&mut self, next: RenderPhase) {
        debug!(from = %self.phase, to = %next, "render phase");
        self.phase = next;
    }

    /// Record a failure in the current phase and pass the error through.
    fn fail(&mut self, err: FullstackError) -> FullstackError {
        debug!(phase = %self.phase, error = %err, "render failed");
        self.enter(RenderPhase::RolledBack);
        err
    }
}

/// Main rendering service.
///
/// Holds no state between renders; the catalog and configuration are passed
/// to each call.
pub struct RenderService {
    filesystem: Box<dyn Filesystem>,
    base_dir: PathBuf,
}

impl RenderService {
    /// Create a render service writing projects under `base_dir`.
    pub fn new(filesystem: Box<dyn Filesystem>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory the project for `config` is generated into.
    pub fn project_root(&self, config: &ProjectConfig) -> PathBuf {
        self.base_dir.join(config.project_name())
    }

    /// Resolve, stage and validate without touching the filesystem.
    ///
    /// # Errors
    ///
    /// `UnknownVariant`, `UnresolvedPlaceholder`, `PathCollision`, or a path
    /// error for a rendered path that leaves the project root.
    #[instrument(
        skip_all,
        fields(project = %config.project_name(), database = %config.database_engine())
    )]
    pub fn plan(
        &self,
        config: &ProjectConfig,
        catalog: &TemplateCatalog,
    ) -> FullstackResult<StagedProject> {
        let mut tracker = PhaseTracker::new();
        self.stage(config, catalog, &mut tracker)
            .map_err(|e| tracker.fail(e))
    }

    /// Generate the project described by `config` from `catalog`.
    ///
    /// Returns the manifest of written files in catalog registration order.
    /// A missing base directory is created first.
    ///
    /// # Errors
    ///
    /// Everything [`plan`](Self::plan) returns, plus:
    /// - `ProjectAlreadyExists` if the root exists (nothing is touched)
    /// - `PartialWrite` if a write failed (the root has been removed)
    /// - `RollbackFailed` if removing the root failed as well
    #[instrument(
        skip_all,
        fields(project = %config.project_name(), database = %config.database_engine())
    )]
    pub fn render(
        &self,
        config: &ProjectConfig,
        catalog: &TemplateCatalog,
    ) -> FullstackResult<RenderManifest> {
        let mut tracker = PhaseTracker::new();

        let staged = self
            .stage(config, catalog, &mut tracker)
            .map_err(|e| tracker.fail(e))?;

        let root = staged.root().to_path_buf();
        if self.filesystem.exists(&root) {
            return Err(tracker.fail(ApplicationError::ProjectAlreadyExists { path: root }.into()));
        }

        tracker.enter(RenderPhase::Writing);

        // The base directory sits outside the project root and survives a
        // rollback.
        if !self.base_dir.as_os_str().is_empty() {
            self.filesystem
                .create_dir_all(&self.base_dir)
                .map_err(|e| tracker.fail(e))?;
        }

        // Claiming the root is the first write below it. If it fails nothing
        // of ours exists yet, so there is nothing to roll back.
        self.filesystem
            .create_dir(&root)
            .map_err(|e| tracker.fail(e))?;

        if let Err(cause) = self.write_all(&staged) {
            warn!(error = %cause, root = %root.display(), "write failed, rolling back");
            let err = self.rollback(&root, cause);
            return Err(tracker.fail(err));
        }

        tracker.enter(RenderPhase::Committed);
        let manifest = staged.to_manifest();
        info!(
            files = manifest.len(),
            bytes = manifest.total_bytes(),
            root = %root.display(),
            "project generated"
        );
        Ok(manifest)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Resolving → Staging → Validating.
    fn stage(
        &self,
        config: &ProjectConfig,
        catalog: &TemplateCatalog,
        tracker: &mut PhaseTracker,
    ) -> FullstackResult<StagedProject> {
        tracker.enter(RenderPhase::Resolving);
        validator::validate_config(config)?;
        let entries = catalog.resolve(config)?;
        debug!(
            resolved = entries.len(),
            registered = catalog.len(),
            "catalog resolved"
        );

        tracker.enter(RenderPhase::Staging);
        let ctx = RenderContext::from_config(config);
        let mut staged = StagedProject::new(self.project_root(config));
        for entry in entries {
            let key = entry.key().as_str();
            let path = ctx.render(key, entry.path_pattern())?;
            let content = ctx.render(key, entry.content().as_str())?;
            let path = RelativePath::try_new(path)?;
            debug!(key, path = %path, bytes = content.len(), "staged");
            staged.push(StagedFile {
                key: key.to_string(),
                path,
                content,
                permissions: entry.permissions(),
            });
        }

        tracker.enter(RenderPhase::Validating);
        validator::validate_staged_project(&staged)?;

        Ok(staged)
    }

    /// Write every staged file below an already-created root.
    fn write_all(&self, staged: &StagedProject) -> FullstackResult<()> {
        let root = staged.root();

        for dir in staged.directories() {
            self.filesystem.create_dir_all(&root.join(dir))?;
        }

        for file in staged.files() {
            let path = root.join(file.path.as_path());
            self.filesystem.write_file(&path, &file.content)?;

            if file.permissions.executable_flag() {
                self.filesystem.set_permissions(&path, true)?;
            }
        }

        Ok(())
    }

    /// Remove the root after a failed write and wrap the cause.
    fn rollback(&self, root: &Path, cause: FullstackError) -> FullstackError {
        match self.filesystem.remove_dir_all(root) {
            Ok(()) => {
                info!(root = %root.display(), "rollback successful");
                ApplicationError::PartialWrite {
                    root: root.to_path_buf(),
                    cause: Box::new(cause),
                }
                .into()
            }
            Err(e) => {
                warn!(error = %e, root = %root.display(), "rollback failed");
                ApplicationError::RollbackFailed {
                    path: root.to_path_buf(),
                    reason: e.to_string(),
                    cause: Box::new(cause),
                }
                .into()
            }
        }
    }
}
