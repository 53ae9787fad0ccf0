//! Directory import commands.

use super::ingestor;
use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lawbook_store::SqliteStore;

/// Execute the import-laws command.
pub fn execute_import_laws(
    args: ImportArgs,
    config: &Config,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let ingestor = ingestor(config)?;
    tracing::info!("Importing statutes from {}", args.dir.display());

    let report = ingestor.import_statute_tree(store, &args.dir)?;
    tracing::info!("{}", report.summary());

    println!("{}", formatter.format_ingest(&report)?);
    Ok(())
}

/// Execute the import-cases command.
pub fn execute_import_cases(
    args: ImportArgs,
    config: &Config,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let ingestor = ingestor(config)?;
    tracing::info!("Importing cases from {}", args.dir.display());

    let report = ingestor.import_case_tree(store, &args.dir)?;
    tracing::info!("{}", report.summary());

    println!("{}", formatter.format_ingest(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use lawbook_domain::Collection;
    use std::fs;
    use tempfile::tempdir;

    const STATUTE: &str = "# 中华人民共和国劳动合同法\n\n\
第一条 为了完善劳动合同制度，明确劳动合同双方当事人的权利和义务，制定本法。\n\
第二条 中华人民共和国境内的企业与劳动者建立劳动关系，适用本法。\n";

    #[test]
    fn test_import_laws_twice_skips_everything() {
        let dir = tempdir().unwrap();
        let category = dir.path().join("社会法");
        fs::create_dir_all(&category).unwrap();
        fs::write(category.join("labor-contract.md"), STATUTE).unwrap();

        let config = Config::default();
        let mut store = SqliteStore::in_memory().unwrap();
        let formatter = Formatter::new(OutputFormat::Json, false);
        let args = || ImportArgs {
            dir: dir.path().to_path_buf(),
        };

        execute_import_laws(args(), &config, &mut store, &formatter).unwrap();
        assert_eq!(store.count(Collection::Statute).unwrap(), 2);

        execute_import_laws(args(), &config, &mut store, &formatter).unwrap();
        assert_eq!(store.count(Collection::Statute).unwrap(), 2);
    }

    #[test]
    fn test_import_missing_dir_is_error() {
        let dir = tempdir().unwrap();
        let config = Config::default();
        let mut store = SqliteStore::in_memory().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let args = ImportArgs {
            dir: dir.path().join("absent"),
        };
        assert!(execute_import_cases(args, &config, &mut store, &formatter).is_err());
    }
}
