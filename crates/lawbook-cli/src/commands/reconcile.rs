//! Reconcile command implementation.

use crate::cli::ReconcileArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lawbook_janitor::{ReconcileWorker, Reconciler};
use lawbook_store::SqliteStore;

/// Execute the reconcile command.
///
/// Runs a single pass by default. `--cycles N` runs N passes on the
/// configured interval; `--watch` keeps going until Ctrl+C.
pub async fn execute_reconcile(
    args: ReconcileArgs,
    config: &Config,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let mut janitor = config.janitor.clone();
    if args.dry_run {
        janitor.dry_run = true;
    }
    if args.cycles == Some(0) {
        return Err(CliError::InvalidInput("--cycles must be at least 1".to_string()));
    }

    let reconciler = Reconciler::new(janitor, config.extractor.clone(), &config.gatekeeper)?;

    if !args.watch && args.cycles.is_none() {
        let summary = reconciler.run(store)?;
        println!("{}", formatter.format_reconcile(&summary)?);
        return Ok(());
    }

    let mut worker = ReconcileWorker::new(reconciler);
    match args.cycles {
        Some(cycles) => worker.run_cycles(store, cycles).await?,
        None => worker.run(store).await?,
    }

    match worker.last_summary() {
        Some(summary) => println!("{}", formatter.format_reconcile(summary)?),
        None => println!("{}", formatter.info("No reconciliation pass completed")),
    }
    if worker.passes() > 1 {
        println!(
            "{}",
            formatter.info(&format!(
                "{} passes, {} mutation(s) in total",
                worker.passes(),
                worker.total_mutations()
            ))
        );
    }
    Ok(())
}
