//! Output formatting for the CLI.

use crate::commands::status::StatusReport;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lawbook_domain::RecordFailure;
use lawbook_extractor::IngestReport;
use lawbook_janitor::ReconcileSummary;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an ingest or import report.
    pub fn format_ingest(&self, report: &IngestReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(report)?);
        }

        let rows = [
            ("Run", report.run_id.short()),
            ("Documents", report.documents.to_string()),
            ("Articles imported", report.articles_imported.to_string()),
            ("Cases imported", report.cases_imported.to_string()),
            ("Skipped", report.skipped.to_string()),
            ("Empty documents", report.empty_documents.to_string()),
            ("Errors", report.failures.len().to_string()),
        ];

        let mut out = self.key_value_table(&rows);
        out.push('\n');
        out.push_str(&self.failures_and_verdict(
            &report.failures,
            &format!("Imported {} record(s)", report.imported()),
        ));
        Ok(out)
    }

    /// Format a reconciliation summary.
    pub fn format_reconcile(&self, summary: &ReconcileSummary) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(summary)?);
        }

        let rows = [
            ("Run", summary.run_id.short()),
            ("Dry run", summary.dry_run.to_string()),
            ("Articles scanned", summary.articles_scanned.to_string()),
            ("Cases scanned", summary.cases_scanned.to_string()),
            ("Migrated to case", summary.migrated_to_case.to_string()),
            ("Migrated to statute", summary.migrated_to_statute.to_string()),
            ("Fields backfilled", summary.fields_backfilled.to_string()),
            ("Domains reclassified", summary.domains_reclassified.to_string()),
            ("Merged records split", summary.merged_split.to_string()),
            ("Units inserted", summary.units_inserted.to_string()),
            ("Remnants stripped", summary.remnants_stripped.to_string()),
            ("Skipped", summary.skipped.to_string()),
            ("Errors", summary.failures.len().to_string()),
        ];

        let verdict = match (summary.total_mutations(), summary.dry_run) {
            (0, _) => "Store is consistent, nothing to change".to_string(),
            (n, true) => format!("{} mutation(s) would be made", n),
            (n, false) => format!("{} mutation(s) made", n),
        };

        let mut out = self.key_value_table(&rows);
        out.push('\n');
        out.push_str(&self.failures_and_verdict(&summary.failures, &verdict));
        Ok(out)
    }

    /// Format store statistics.
    pub fn format_status(&self, status: &StatusReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(status)?);
        }

        let mut sections = vec![self.colorize(&format!("Database: {}", status.database), "cyan")];

        let mut builder = Builder::default();
        builder.push_record(["Collection", "Records"]);
        builder.push_record(["statute", &status.statute_records.to_string()]);
        builder.push_record(["case", &status.case_records.to_string()]);
        sections.push(render(builder));

        let mut builder = Builder::default();
        builder.push_record(["Domain", "Statute", "Case"]);
        for row in status.domain_rows() {
            builder.push_record([row.0, row.1.to_string(), row.2.to_string()]);
        }
        sections.push(render(builder));

        if status.coverage.is_empty() {
            sections.push(self.colorize("No case records.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Case field", "Filled", "Coverage"]);
            for field in &status.coverage {
                builder.push_record([
                    field.field.to_string(),
                    field.filled.to_string(),
                    format!("{:.1}%", field.percent),
                ]);
            }
            sections.push(render(builder));
        }

        Ok(sections.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn key_value_table(&self, rows: &[(&str, String)]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        for (name, value) in rows {
            builder.push_record([name.to_string(), value.clone()]);
        }
        render(builder)
    }

    fn failures_and_verdict(&self, failures: &[RecordFailure], verdict: &str) -> String {
        if failures.is_empty() {
            return self.success(verdict);
        }

        let mut builder = Builder::default();
        builder.push_record(["Stage", "Record", "Reason"]);
        for failure in failures {
            builder.push_record([failure.stage.to_string(), failure.key.clone(), failure.reason.clone()]);
        }

        format!(
            "{}\n{}",
            render(builder),
            self.warning(&format!("{} ({} failure(s))", verdict, failures.len()))
        )
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
