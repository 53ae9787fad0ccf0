//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use lawbook_domain::Collection;
use std::path::PathBuf;

/// Lawbook - Build and maintain a structured store of statutes and cases.
#[derive(Debug, Parser)]
#[command(name = "lawbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LAWBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file path (overrides the config file)
    #[arg(short, long, global = true, env = "LAWBOOK_DATABASE")]
    pub database: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a statute repository (one directory per category)
    ImportLaws(ImportArgs),

    /// Import a case directory (one directory per subcategory)
    ImportCases(ImportArgs),

    /// Ingest a single markdown file
    Ingest(IngestArgs),

    /// Re-run routing and extraction over stored records
    Reconcile(ReconcileArgs),

    /// Show record counts and case field coverage
    Status,

    /// Print the effective configuration as TOML
    ShowConfig,
}

/// Arguments for the import commands.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Root directory
    pub dir: PathBuf,
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Markdown file
    pub file: PathBuf,

    /// Category directory name or domain label (e.g. 民法商法, 劳动法)
    #[arg(short = 'g', long)]
    pub category: Option<String>,

    /// Force the target collection instead of routing
    #[arg(long, value_enum)]
    pub collection: Option<CollectionArg>,
}

/// Arguments for the reconcile command.
#[derive(Debug, Parser)]
pub struct ReconcileArgs {
    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Keep running on the configured interval until Ctrl+C
    #[arg(short, long, conflicts_with = "cycles")]
    pub watch: bool,

    /// Run this many passes on the configured interval
    #[arg(long)]
    pub cycles: Option<usize>,
}

/// Collection argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CollectionArg {
    /// Statute articles
    Statute,
    /// Case records
    Case,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<CollectionArg> for Collection {
    fn from(collection: CollectionArg) -> Self {
        match collection {
            CollectionArg::Statute => Collection::Statute,
            CollectionArg::Case => Collection::Case,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_laws_command() {
        let cli = Cli::parse_from(["lawbook", "import-laws", "/data/laws"]);
        match cli.command {
            Command::ImportLaws(args) => assert_eq!(args.dir, PathBuf::from("/data/laws")),
            _ => panic!("Expected ImportLaws command"),
        }
    }

    #[test]
    fn test_ingest_command() {
        let cli = Cli::parse_from([
            "lawbook",
            "ingest",
            "case.md",
            "--category",
            "劳动法",
            "--collection",
            "case",
        ]);
        match cli.command {
            Command::Ingest(args) => {
                assert_eq!(args.category.as_deref(), Some("劳动法"));
                assert!(matches!(args.collection, Some(CollectionArg::Case)));
            }
            _ => panic!("Expected Ingest command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["lawbook", "status", "--format", "json", "-d", "x.db", "-v"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.database, Some(PathBuf::from("x.db")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn test_watch_conflicts_with_cycles() {
        let result = Cli::try_parse_from(["lawbook", "reconcile", "--watch", "--cycles", "3"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["lawbook", "reconcile", "--dry-run", "--cycles", "3"]);
        match cli.command {
            Command::Reconcile(args) => {
                assert!(args.dry_run);
                assert_eq!(args.cycles, Some(3));
            }
            _ => panic!("Expected Reconcile command"),
        }
    }

    #[test]
    fn test_collection_conversion() {
        let collection: Collection = CollectionArg::Case.into();
        assert_eq!(collection, Collection::Case);
    }
}
