//! Command implementations.

pub mod import;
pub mod ingest;
pub mod reconcile;
pub mod show_config;
pub mod status;

pub use self::import::{execute_import_cases, execute_import_laws};
pub use self::ingest::execute_ingest;
pub use self::reconcile::execute_reconcile;
pub use self::show_config::execute_show_config;
pub use self::status::execute_status;

use crate::config::Config;
use crate::error::Result;
use lawbook_extractor::Ingestor;
use lawbook_store::SqliteStore;
use std::fs;

/// Open the configured database, creating its directory if needed.
pub fn open_store(config: &Config) -> Result<SqliteStore> {
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    tracing::debug!("Opening database {}", config.database_path.display());
    Ok(SqliteStore::new(&config.database_path)?)
}

/// Build an ingestor from the configured sections.
pub fn ingestor(config: &Config) -> Result<Ingestor> {
    Ok(Ingestor::new(config.extractor.clone(), &config.gatekeeper)?)
}
