//! Store statistics command.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lawbook_domain::Collection;
use lawbook_store::SqliteStore;
use serde::Serialize;
use std::collections::BTreeMap;

/// Record counts and case field coverage
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Database file
    pub database: String,
    /// Rows in the statute collection
    pub statute_records: usize,
    /// Rows in the case collection
    pub case_records: usize,
    /// Statute rows per domain label
    pub statute_domains: Vec<(String, usize)>,
    /// Case rows per domain label
    pub case_domains: Vec<(String, usize)>,
    /// Fill rate of each extracted case field; empty when there are no cases
    pub coverage: Vec<FieldCoverage>,
}

/// Fill rate of one case field
#[derive(Debug, Clone, Serialize)]
pub struct FieldCoverage {
    /// Column name
    pub field: &'static str,
    /// Rows with the field set
    pub filled: usize,
    /// `filled` as a percentage of all case rows
    pub percent: f64,
}

impl StatusReport {
    /// Collect statistics from a store.
    pub fn collect(database: impl Into<String>, store: &SqliteStore) -> Result<Self> {
        let coverage = store.case_coverage()?;
        let fields = if coverage.total == 0 {
            Vec::new()
        } else {
            [
                ("cause_of_action", coverage.cause_of_action),
                ("court_name", coverage.court_name),
                ("judgment_date", coverage.judgment_date),
                ("dispute_point", coverage.dispute_point),
                ("judgment_result", coverage.judgment_result),
            ]
            .into_iter()
            .map(|(field, filled)| FieldCoverage {
                field,
                filled,
                percent: filled as f64 * 100.0 / coverage.total as f64,
            })
            .collect()
        };

        Ok(Self {
            database: database.into(),
            statute_records: store.count(Collection::Statute)?,
            case_records: store.count(Collection::Case)?,
            statute_domains: store.domain_counts(Collection::Statute)?,
            case_domains: store.domain_counts(Collection::Case)?,
            coverage: fields,
        })
    }

    /// One row per domain label: `(label, statute rows, case rows)`
    pub fn domain_rows(&self) -> Vec<(String, usize, usize)> {
        let mut rows: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for (label, count) in &self.statute_domains {
            rows.entry(label.as_str()).or_default().0 += count;
        }
        for (label, count) in &self.case_domains {
            rows.entry(label.as_str()).or_default().1 += count;
        }
        rows.into_iter()
            .map(|(label, (statutes, cases))| (label.to_string(), statutes, cases))
            .collect()
    }
}

/// Execute the status command.
pub fn execute_status(config: &Config, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let status = StatusReport::collect(config.database_path.display().to_string(), store)?;
    println!("{}", formatter.format_status(&status)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawbook_domain::traits::LegalStore;
    use lawbook_domain::{ArticleRecord, CaseRecord};

    #[test]
    fn test_empty_store() {
        let store = SqliteStore::in_memory().unwrap();
        let status = StatusReport::collect(":memory:", &store).unwrap();
        assert_eq!(status.statute_records, 0);
        assert_eq!(status.case_records, 0);
        assert!(status.coverage.is_empty());
        assert!(status.domain_rows().is_empty());
    }

    #[test]
    fn test_counts_and_coverage() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .insert_article(&ArticleRecord::new("某法", Some("第一条".to_string()), "内容一", "民法"))
            .unwrap();
        store
            .insert_article(&ArticleRecord::new("某法", Some("第二条".to_string()), "内容二", "民法"))
            .unwrap();

        let mut with_court = CaseRecord::new("甲诉乙案", "案情", "民法");
        with_court.court_name = Some("北京市海淀区人民法院".to_string());
        store.insert_case(&with_court).unwrap();
        store.insert_case(&CaseRecord::new("丙诉丁案", "案情", "劳动法")).unwrap();

        let status = StatusReport::collect(":memory:", &store).unwrap();
        assert_eq!(status.statute_records, 2);
        assert_eq!(status.case_records, 2);

        let court = status.coverage.iter().find(|c| c.field == "court_name").unwrap();
        assert_eq!(court.filled, 1);
        assert!((court.percent - 50.0).abs() < f64::EPSILON);

        let rows = status.domain_rows();
        assert!(rows.contains(&("民法".to_string(), 2, 1)));
        assert!(rows.contains(&("劳动法".to_string(), 0, 1)));
    }
}
