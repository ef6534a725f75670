//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use fullstack_core::domain::DatabaseEngine;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fullstack",
    bin_name = "fullstack",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Bootstrap a FastAPI + Next.js project in one command",
    long_about = "fullstack generates a ready-to-run project: a FastAPI backend, \
                  a Next.js frontend, database configuration for PostgreSQL or \
                  SQLite, environment files and a start script.",
    after_help = "EXAMPLES:\n\
        \x20 fullstack new shop\n\
        \x20 fullstack new demo --database sqlite --db-name demo_db\n\
        \x20 fullstack list --database sqlite\n\
        \x20 fullstack completions bash > /usr/share/bash-completion/completions/fullstack",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 fullstack new shop\n\
            \x20 fullstack new shop --api-port 9000 --frontend-port 4000\n\
            \x20 fullstack new demo --database sqlite --db-name demo_db\n\
            \x20 fullstack new demo --dry-run --output-format json"
    )]
    New(NewArgs),

    /// List catalog templates.
    #[command(
        visible_alias = "ls",
        about = "List catalog templates",
        after_help = "EXAMPLES:\n\
            \x20 fullstack list\n\
            \x20 fullstack list --database sqlite\n\
            \x20 fullstack list --format json"
    )]
    List(ListArgs),

    /// Initialise a fullstack configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 fullstack init           # global config\n\
            \x20 fullstack init --local   # .fullstack.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fullstack completions bash > ~/.local/share/bash-completion/completions/fullstack\n\
            \x20 fullstack completions zsh  > ~/.zfunc/_fullstack\n\
            \x20 fullstack completions fish > ~/.config/fish/completions/fullstack.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the fullstack configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fullstack config get defaults.api_port\n\
            \x20 fullstack config list\n\
            \x20 fullstack config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `fullstack new`.
///
/// Every option left unset falls back to the configuration file, then to the
/// built-in default.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; also the name of the generated directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    #[arg(long = "api-port", value_name = "PORT", help = "Backend port [default: 8000]")]
    pub api_port: Option<u16>,

    #[arg(
        long = "frontend-port",
        value_name = "PORT",
        help = "Frontend port [default: 3000]"
    )]
    pub frontend_port: Option<u16>,

    #[arg(
        short = 'd',
        long = "database",
        value_name = "ENGINE",
        value_enum,
        help = "Database engine [default: postgres]"
    )]
    pub database: Option<Database>,

    #[arg(
        long = "db-name",
        value_name = "NAME",
        help = "Database name [default: <name>_db]"
    )]
    pub db_name: Option<String>,

    /// Ignored for SQLite.
    #[arg(
        long = "db-port",
        value_name = "PORT",
        help = "Database port, PostgreSQL only [default: 5432]"
    )]
    pub db_port: Option<u16>,

    #[arg(
        long = "db-user",
        value_name = "USER",
        help = "Database user [default: <name>_user]"
    )]
    pub db_user: Option<String>,

    #[arg(long = "db-password", value_name = "PASSWORD", help = "Database password")]
    pub db_password: Option<String>,

    #[arg(
        long = "db-host",
        value_name = "HOST",
        help = "Database host [default: localhost]"
    )]
    pub db_host: Option<String>,

    /// Directory the project directory is created in.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output_dir: Option<PathBuf>,

    /// Render from a template directory holding `catalog.toml`.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Use a custom template catalog"
    )]
    pub templates: Option<PathBuf>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `fullstack list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show the entries selected for this engine.
    #[arg(
        short = 'd',
        long = "database",
        value_enum,
        help = "Show entries selected for an engine"
    )]
    pub database: Option<Database>,

    /// List a custom template catalog instead of the built-in one.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Use a custom template catalog"
    )]
    pub templates: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One key per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `fullstack init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.fullstack.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fullstack completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `fullstack config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.api_port`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the global configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Database {
    /// Also accepted as `postgresql` and `pg`.
    #[value(aliases = ["postgresql", "pg"])]
    Postgres,
    /// Also accepted as `sqlite3`.
    #[value(alias = "sqlite3")]
    Sqlite,
}

impl From<Database> for DatabaseEngine {
    fn from(db: Database) -> Self {
        match db {
            Database::Postgres => DatabaseEngine::Postgres,
            Database::Sqlite => DatabaseEngine::Sqlite,
        }
    }
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(DatabaseEngine::from(*self).as_str())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn database_display() {
        assert_eq!(Database::Postgres.to_string(), "postgres");
        assert_eq!(Database::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn parse_new_command_with_every_flag() {
        let cli = Cli::parse_from([
            "fullstack",
            "new",
            "demo",
            "--api-port",
            "9000",
            "--frontend-port",
            "4000",
            "--database",
            "sqlite",
            "--db-name",
            "demo_db",
            "--output-dir",
            "out",
            "--dry-run",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "demo");
        assert_eq!(args.api_port, Some(9000));
        assert_eq!(args.frontend_port, Some(4000));
        assert_eq!(args.database, Some(Database::Sqlite));
        assert_eq!(args.db_name.as_deref(), Some("demo_db"));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert!(args.dry_run);
    }

    #[test]
    fn new_leaves_unset_options_empty() {
        let cli = Cli::parse_from(["fullstack", "new", "shop"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.api_port, None);
        assert_eq!(args.database, None);
        assert_eq!(args.db_port, None);
    }

    #[test]
    fn database_aliases() {
        let cli = Cli::parse_from(["fullstack", "new", "x", "-d", "pg"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.database, Some(Database::Postgres));
    }

    #[test]
    fn unknown_database_is_rejected() {
        assert!(Cli::try_parse_from(["fullstack", "new", "x", "--database", "mysql"]).is_err());
    }

    #[test]
    fn out_of_range_port_is_rejected() {
        assert!(Cli::try_parse_from(["fullstack", "new", "x", "--api-port", "70000"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["fullstack", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_color_flag_without_value() {
        let cli = Cli::try_parse_from(["fullstack", "--no-color", "list"]).unwrap();
        assert!(cli.global.no_color);
    }
}
