//! Background worker for repeated reconciliation

use crate::{JanitorError, ReconcileSummary, Reconciler};
use lawbook_domain::traits::LegalStore;
use tokio::time::{interval, Duration};

/// Runs reconciliation passes on a schedule
///
/// The first pass starts immediately, then one every configured interval.
/// Passes run one after another on a single task, so they never overlap.
///
/// # Examples
///
/// ```no_run
/// use lawbook_janitor::{ReconcileWorker, Reconciler};
/// use lawbook_store::SqliteStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut store = SqliteStore::new("lawbook.db")?;
///     let mut worker = ReconcileWorker::new(Reconciler::default_config()?);
///
///     // Run until Ctrl+C
///     worker.run(&mut store).await?;
///     Ok(())
/// }
/// ```
pub struct ReconcileWorker {
    reconciler: Reconciler,
    interval: Duration,
    passes: usize,
    total_mutations: usize,
    last: Option<ReconcileSummary>,
}

impl ReconcileWorker {
    /// Create a worker around a Reconciler
    pub fn new(reconciler: Reconciler) -> Self {
        let interval = reconciler.config().worker_interval();
        Self {
            reconciler,
            interval,
            passes: 0,
            total_mutations: 0,
            last: None,
        }
    }

    /// Run passes until a shutdown signal (Ctrl+C) is received
    ///
    /// A failed pass is logged and the worker waits for the next tick.
    pub async fn run<S>(&mut self, store: &mut S) -> Result<(), JanitorError>
    where
        S: LegalStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);

        tracing::info!("Reconcile worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.pass(store) {
                        tracing::error!("Reconciliation pass failed: {}", e);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping reconcile worker");
                    break;
                }
            }
        }

        tracing::info!(
            "Reconcile worker stopped after {} passes ({} mutations)",
            self.passes,
            self.total_mutations
        );
        Ok(())
    }

    /// Run a fixed number of passes
    ///
    /// Stops at the first failed pass.
    pub async fn run_cycles<S>(&mut self, store: &mut S, cycles: usize) -> Result<(), JanitorError>
    where
        S: LegalStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);

        tracing::info!(
            "Reconcile worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("Starting reconciliation cycle {}/{}", cycle + 1, cycles);

            if let Err(e) = self.pass(store) {
                tracing::error!("Reconciliation {}/{} failed: {}", cycle + 1, cycles, e);
                return Err(e);
            }
        }

        tracing::info!(
            "Reconcile worker finished {} cycles ({} mutations)",
            cycles,
            self.total_mutations
        );
        Ok(())
    }

    fn pass<S>(&mut self, store: &mut S) -> Result<(), JanitorError>
    where
        S: LegalStore,
        S::Error: std::fmt::Display,
    {
        let summary = self.reconciler.run(store)?;
        tracing::info!("{}", summary.summary());
        self.passes += 1;
        self.total_mutations += summary.total_mutations();
        self.last = Some(summary);
        Ok(())
    }

    /// Passes completed so far
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Mutations made across all passes
    pub fn total_mutations(&self) -> usize {
        self.total_mutations
    }

    /// Summary of the most recent pass
    pub fn last_summary(&self) -> Option<&ReconcileSummary> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JanitorConfig;
    use lawbook_domain::ArticleRecord;
    use lawbook_extractor::ExtractorConfig;
    use lawbook_gatekeeper::GatekeeperConfig;
    use lawbook_store::SqliteStore;

    fn worker(config: JanitorConfig) -> ReconcileWorker {
        let reconciler =
            Reconciler::new(config, ExtractorConfig::default(), &GatekeeperConfig::default())
                .unwrap();
        ReconcileWorker::new(reconciler)
    }

    #[test]
    fn test_worker_creation() {
        let worker = worker(JanitorConfig::default());
        assert_eq!(worker.passes(), 0);
        assert!(worker.last_summary().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycles_converges() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .insert_article(&ArticleRecord::new(
                "某市物业管理条例",
                Some("第三条".to_string()),
                "第三条 业主大会应当代表和维护全体业主的合法权益。",
                "民法",
            ))
            .unwrap();

        let mut worker = worker(JanitorConfig {
            worker_interval_minutes: 1,
            ..Default::default()
        });
        worker.run_cycles(&mut store, 2).await.unwrap();

        assert_eq!(worker.passes(), 2);
        assert!(worker.total_mutations() > 0);
        // The second pass found nothing left to do
        assert_eq!(worker.last_summary().unwrap().total_mutations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_store() {
        let mut store = SqliteStore::in_memory().unwrap();
        let mut worker = worker(JanitorConfig::default());

        worker.run_cycles(&mut store, 1).await.unwrap();
        assert_eq!(worker.passes(), 1);
        assert_eq!(worker.total_mutations(), 0);
    }
}
