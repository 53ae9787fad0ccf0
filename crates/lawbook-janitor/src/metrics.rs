//! Counters collected during a reconciliation pass

use lawbook_domain::{RecordFailure, RunId};
use lawbook_extractor::tables::TABLE_VERSION;
use lawbook_gatekeeper::keywords::KEYWORD_TABLE_VERSION;
use serde::Serialize;

/// What one reconciliation pass did (or would do, in a dry run)
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileSummary {
    /// Pass identifier
    pub run_id: RunId,

    /// Whether the pass wrote nothing
    pub dry_run: bool,

    /// Extraction table version the pass ran with
    pub extraction_tables: u32,

    /// Classifier and router table version the pass ran with
    pub keyword_tables: u32,

    /// Statute records scanned
    pub articles_scanned: usize,

    /// Case records scanned
    pub cases_scanned: usize,

    /// Statute titles moved into the case collection
    pub migrated_to_case: usize,

    /// Case records moved into the statute collection
    pub migrated_to_statute: usize,

    /// Individual fields filled or lengthened
    pub fields_backfilled: usize,

    /// Unclassified domain labels replaced
    pub domains_reclassified: usize,

    /// Merged statute records split apart
    pub merged_split: usize,

    /// Article units inserted by migration or splitting
    pub units_inserted: usize,

    /// Inserts skipped because the key already existed
    pub skipped: usize,

    /// Own-marker prefixes removed from content
    pub remnants_stripped: usize,

    /// Per-record failures
    pub failures: Vec<RecordFailure>,
}

impl ReconcileSummary {
    /// Empty summary for a pass
    pub fn new(run_id: RunId, dry_run: bool) -> Self {
        Self {
            run_id,
            dry_run,
            extraction_tables: TABLE_VERSION,
            keyword_tables: KEYWORD_TABLE_VERSION,
            articles_scanned: 0,
            cases_scanned: 0,
            migrated_to_case: 0,
            migrated_to_statute: 0,
            fields_backfilled: 0,
            domains_reclassified: 0,
            merged_split: 0,
            units_inserted: 0,
            skipped: 0,
            remnants_stripped: 0,
            failures: Vec::new(),
        }
    }

    /// Records moved between collections
    pub fn total_migrated(&self) -> usize {
        self.migrated_to_case + self.migrated_to_statute
    }

    /// Every change the pass made; zero means the store is at a fixed point
    pub fn total_mutations(&self) -> usize {
        self.total_migrated()
            + self.fields_backfilled
            + self.domains_reclassified
            + self.merged_split
            + self.units_inserted
            + self.remnants_stripped
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!(
                "Reconciliation {}{}",
                self.run_id.short(),
                if self.dry_run { " (dry run)" } else { "" }
            ),
            "======================".to_string(),
            format!(
                "Tables: extraction v{}, keywords v{}",
                self.extraction_tables, self.keyword_tables
            ),
            format!(
                "Scanned: {} articles, {} cases",
                self.articles_scanned, self.cases_scanned
            ),
            format!(
                "Migrated: {} to case, {} to statute",
                self.migrated_to_case, self.migrated_to_statute
            ),
            format!("Fields backfilled: {}", self.fields_backfilled),
            format!("Domains reclassified: {}", self.domains_reclassified),
            format!(
                "Merged records split: {} ({} units inserted)",
                self.merged_split, self.units_inserted
            ),
            format!("Marker remnants stripped: {}", self.remnants_stripped),
            format!("Skipped (already present): {}", self.skipped),
            format!("Errors: {}", self.failures.len()),
            format!("Total mutations: {}", self.total_mutations()),
        ];

        for failure in &self.failures {
            lines.push(format!("  {}", failure));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawbook_domain::FailureStage;

    #[test]
    fn test_empty_summary() {
        let summary = ReconcileSummary::new(RunId::new(), false);
        assert_eq!(summary.total_mutations(), 0);
        assert!(summary.summary().contains("Total mutations: 0"));
    }

    #[test]
    fn test_summary_records_table_versions() {
        let summary = ReconcileSummary::new(RunId::new(), true);
        assert_eq!(summary.extraction_tables, TABLE_VERSION);
        assert_eq!(summary.keyword_tables, KEYWORD_TABLE_VERSION);
        assert!(summary.summary().contains(&format!(
            "Tables: extraction v{}, keywords v{}",
            TABLE_VERSION, KEYWORD_TABLE_VERSION
        )));
    }

    #[test]
    fn test_skips_and_failures_are_not_mutations() {
        let mut summary = ReconcileSummary::new(RunId::new(), false);
        summary.skipped = 4;
        summary.failures.push(RecordFailure::new("某法 第一条", FailureStage::Update, "locked"));
        assert_eq!(summary.total_mutations(), 0);
    }

    #[test]
    fn test_total_mutations() {
        let mut summary = ReconcileSummary::new(RunId::new(), true);
        summary.migrated_to_case = 1;
        summary.migrated_to_statute = 2;
        summary.fields_backfilled = 3;
        summary.merged_split = 1;
        summary.units_inserted = 2;
        assert_eq!(summary.total_migrated(), 3);
        assert_eq!(summary.total_mutations(), 9);

        let text = summary.summary();
        assert!(text.contains("(dry run)"));
        assert!(text.contains("Migrated: 1 to case, 2 to statute"));
    }

    #[test]
    fn test_failures_listed() {
        let mut summary = ReconcileSummary::new(RunId::new(), false);
        summary.failures.push(RecordFailure::new("某案", FailureStage::Migrate, "disk full"));
        assert!(summary.summary().contains("[migrate] 某案: disk full"));
    }
}
