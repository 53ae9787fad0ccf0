//! Lawbook CLI - Command-line interface for the lawbook store.

use clap::Parser;
use lawbook_cli::commands;
use lawbook_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Log to stderr so table and JSON output stay clean on stdout
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> lawbook_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    // Override database if specified
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::ShowConfig => {
            commands::execute_show_config(&config, &formatter)?;
        }
        cmd => {
            // Commands that need the database
            let mut store = commands::open_store(&config)?;

            match cmd {
                Command::ImportLaws(args) => {
                    commands::execute_import_laws(args, &config, &mut store, &formatter)?;
                }
                Command::ImportCases(args) => {
                    commands::execute_import_cases(args, &config, &mut store, &formatter)?;
                }
                Command::Ingest(args) => {
                    commands::execute_ingest(args, &config, &mut store, &formatter)?;
                }
                Command::Reconcile(args) => {
                    commands::execute_reconcile(args, &config, &mut store, &formatter).await?;
                }
                Command::Status => {
                    commands::execute_status(&config, &store, &formatter)?;
                }
                Command::ShowConfig => unreachable!(),
            }
        }
    }

    Ok(())
}
