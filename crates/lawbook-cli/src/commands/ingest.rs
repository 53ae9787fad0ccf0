//! Single-file ingest command.

use super::ingestor;
use crate::cli::IngestArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lawbook_domain::LawDomain;
use lawbook_extractor::IngestHint;
use lawbook_store::SqliteStore;

/// Execute the ingest command.
pub fn execute_ingest(
    args: IngestArgs,
    config: &Config,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    if !args.file.is_file() {
        return Err(CliError::InvalidInput(format!("{} is not a file", args.file.display())));
    }

    let mut hint = match &args.category {
        Some(category) => IngestHint::with_domain(resolve_category(config, category)?),
        None => IngestHint::default(),
    };
    if let Some(collection) = args.collection {
        hint = hint.forced(collection.into());
    }

    let ingestor = ingestor(config)?;
    let report = ingestor.ingest_file(store, &args.file, &hint);
    tracing::info!("{}", report.summary());

    println!("{}", formatter.format_ingest(&report)?);
    Ok(())
}

/// Map a category directory name or a domain label to a stored label
fn resolve_category(config: &Config, category: &str) -> Result<String> {
    config
        .extractor
        .statute_domain(category)
        .or_else(|| config.extractor.case_domain(category))
        .map(str::to_string)
        .or_else(|| LawDomain::parse(category).map(|d| d.as_str().to_string()))
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown category '{}'", category)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CollectionArg;
    use crate::config::OutputFormat;
    use lawbook_domain::traits::{LegalStore, RecordFilter};
    use lawbook_domain::Collection;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_category() {
        let config = Config::default();
        assert_eq!(resolve_category(&config, "民法商法").unwrap(), "民法");
        assert_eq!(resolve_category(&config, "劳动法").unwrap(), "劳动法");
        assert!(resolve_category(&config, "天文").is_err());
    }

    #[test]
    fn test_ingest_forced_case() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dispute.md");
        fs::write(
            &path,
            "# 某物业公司物业服务合同纠纷\n\n法院认为，物业公司已经提供了服务，业主应当支付物业费。",
        )
        .unwrap();

        let config = Config::default();
        let mut store = SqliteStore::in_memory().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = IngestArgs {
            file: path,
            category: Some("民法".to_string()),
            collection: Some(CollectionArg::Case),
        };

        execute_ingest(args, &config, &mut store, &formatter).unwrap();
        assert_eq!(store.count(Collection::Case).unwrap(), 1);

        let cases = store.scan_cases(&RecordFilter::default()).unwrap();
        assert_eq!(cases[0].law_domain, "民法");
    }

    #[test]
    fn test_ingest_missing_file() {
        let dir = tempdir().unwrap();
        let config = Config::default();
        let mut store = SqliteStore::in_memory().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = IngestArgs {
            file: dir.path().join("absent.md"),
            category: None,
            collection: None,
        };

        assert!(matches!(
            execute_ingest(args, &config, &mut store, &formatter),
            Err(CliError::InvalidInput(_))
        ));
    }
}
