//! Implementation of the `fullstack new` command.
//!
//! Responsibility: turn CLI arguments and config defaults into a
//! `ProjectConfig`, pick the catalog, call the core render service, and
//! display the manifest. No business logic lives here.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use fullstack_adapters::{LocalFilesystem, load_catalog};
use fullstack_core::{
    application::RenderService,
    domain::{DatabaseEngine, ProjectConfig, RenderManifest},
    error::FullstackError,
};

use crate::{
    cli::NewArgs,
    config::{AppConfig, Defaults},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Command that starts the generated services.
const START_COMMAND: &str = "python start.py start both --daemon";

/// Execute the `fullstack new` command.
///
/// Dispatch sequence:
/// 1. Build and validate the project configuration
/// 2. Load the catalog (built-in or `--templates`)
/// 3. Plan only if `--dry-run`, otherwise render
/// 4. Print the manifest and next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Configuration
    let project = build_config(&args, &config.defaults)?;
    debug!(
        database = %project.database_engine(),
        api_port = project.api_port(),
        frontend_port = project.frontend_port(),
        "project configuration resolved"
    );

    if args.db_port.is_some() && !project.database_engine().uses_port() {
        output.warning(&format!(
            "--db-port is ignored for {}",
            project.database_engine()
        ))?;
    }

    // 2. Catalog
    let templates = args
        .templates
        .as_deref()
        .or(config.templates.local_path.as_deref());
    let catalog = load_catalog(templates)?;

    // An empty base keeps the root relative to the working directory.
    let base_dir = args.output_dir.clone().unwrap_or_default();
    let service = RenderService::new(Box::new(LocalFilesystem::new()), base_dir);

    // 3. Plan or render
    let manifest = if args.dry_run {
        service
            .plan(&project, &catalog)
            .with_cli_context(|| "planning project")?
            .to_manifest()
    } else {
        info!(root = %service.project_root(&project).display(), "render started");
        service
            .render(&project, &catalog)
            .with_cli_context(|| "rendering project")?
    };

    // 4. Report
    if output.is_json() {
        return output.json(&NewReport::new(&project, &manifest, args.dry_run));
    }
    print_summary(&project, &manifest, args.dry_run, &output)?;
    Ok(())
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Flags first, then config-file defaults. Fields absent from both are
/// derived from the project name by the builder.
pub(crate) fn build_config(args: &NewArgs, defaults: &Defaults) -> CliResult<ProjectConfig> {
    let engine = args
        .database
        .map(DatabaseEngine::from)
        .unwrap_or(defaults.database);

    let mut builder = ProjectConfig::builder(&args.name)
        .api_port(args.api_port.unwrap_or(defaults.api_port))
        .frontend_port(args.frontend_port.unwrap_or(defaults.frontend_port))
        .database(engine)
        .db_port(args.db_port.unwrap_or(defaults.db_port))
        .db_host(args.db_host.as_ref().unwrap_or(&defaults.db_host));

    if let Some(name) = &args.db_name {
        builder = builder.db_name(name);
    }
    if let Some(user) = args.db_user.as_ref().or(defaults.db_user.as_ref()) {
        builder = builder.db_user(user);
    }
    if let Some(password) = args.db_password.as_ref().or(defaults.db_password.as_ref()) {
        builder = builder.db_password(password);
    }

    Ok(builder.build().map_err(FullstackError::from)?)
}

// ── Reporting ─────────────────────────────────────────────────────────────────

/// JSON shape of a `new` run.
#[derive(Debug, Serialize)]
struct NewReport<'a> {
    project: &'a str,
    database: DatabaseEngine,
    dry_run: bool,
    total_bytes: usize,
    #[serde(flatten)]
    manifest: &'a RenderManifest,
}

impl<'a> NewReport<'a> {
    fn new(project: &'a ProjectConfig, manifest: &'a RenderManifest, dry_run: bool) -> Self {
        Self {
            project: project.project_name(),
            database: project.database_engine(),
            dry_run,
            total_bytes: manifest.total_bytes(),
            manifest,
        }
    }
}

fn print_summary(
    project: &ProjectConfig,
    manifest: &RenderManifest,
    dry_run: bool,
    out: &OutputManager,
) -> CliResult<()> {
    let name = project.project_name();
    let root = manifest.root();

    if dry_run {
        out.info(&format!(
            "Dry run: would create '{name}' at {} ({})",
            root.display(),
            project.database_engine()
        ))?;
    } else {
        out.header(&format!("Created '{name}' at {}", root.display()))?;
    }

    let width = manifest
        .entries()
        .iter()
        .map(|e| e.path.len())
        .max()
        .unwrap_or(0);
    for entry in manifest.entries() {
        let mut line = format!("  {:<width$}  {:>6} B", entry.path, entry.bytes);
        if entry.executable {
            line.push_str(&format!("  {}", out.dim("(executable)")));
        }
        out.print(&line)?;
    }
    out.print(&out.dim(&format!(
        "  {} files, {} bytes",
        manifest.len(),
        manifest.total_bytes()
    )))?;

    if dry_run {
        out.print("")?;
        out.info("No files were written.")?;
        return Ok(());
    }

    out.print("")?;
    out.success(&format!("Project '{name}' created!"))?;
    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  1. cd {}", cd_target(root)))?;
    out.print(&format!("  2. {START_COMMAND}"))?;
    Ok(())
}

fn cd_target(root: &Path) -> String {
    let display = root.display().to_string();
    if display.contains(char::is_whitespace) {
        format!("\"{display}\"")
    } else {
        display
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
