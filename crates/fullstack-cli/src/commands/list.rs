//! Implementation of the `fullstack list` command.

use fullstack_adapters::load_catalog;
use fullstack_core::{
    application::{CatalogService, EntryInfo},
    domain::{DatabaseEngine, ProjectConfig},
    error::FullstackError,
};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Name used for the throwaway configuration that drives `--database`.
const PREVIEW_PROJECT: &str = "preview";

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let templates = args
        .templates
        .as_deref()
        .or(config.templates.local_path.as_deref());
    let catalog = load_catalog(templates)?;
    let service = CatalogService::new(&catalog);

    let entries = match args.database {
        Some(db) => service.resolved(&preview_config(db.into())?)?,
        None => service.list(),
    };

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            let title = match args.database {
                Some(db) => format!("Templates for {db} ({}):", entries.len()),
                None => format!("Available Templates ({}):", entries.len()),
            };
            output.header(&title)?;
            for line in table_rows(&entries) {
                output.print(&line)?;
            }

            if args.database.is_none() {
                output.print("")?;
                output.header("Variant groups:")?;
                for (group, values) in service.groups() {
                    output.print(&format!("  {group}: {}", values.join(", ")))?;
                }
            }
        }

        ListFormat::List => {
            for entry in &entries {
                output.print(&entry.key)?;
            }
        }

        ListFormat::Json => output.json(&entries)?,
    }

    Ok(())
}

fn preview_config(engine: DatabaseEngine) -> CliResult<ProjectConfig> {
    let config = ProjectConfig::builder(PREVIEW_PROJECT)
        .database(engine)
        .build()
        .map_err(FullstackError::from)?;
    Ok(config)
}

/// Aligned `key  path  variant` rows.
fn table_rows(entries: &[EntryInfo]) -> Vec<String> {
    let key_width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    let path_width = entries.iter().map(|e| e.path.len()).max().unwrap_or(0);

    entries
        .iter()
        .map(|e| {
            let mut row = format!("  {:<key_width$}  {:<path_width$}", e.key, e.path);
            if let Some(variant) = &e.variant {
                row.push_str(&format!("  [{variant}]"));
            }
            if e.executable {
                row.push_str("  (executable)");
            }
            row.trim_end().to_string()
        })
        .collect()
}
