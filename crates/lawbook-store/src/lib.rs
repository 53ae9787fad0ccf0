//! Lawbook Storage Layer
//!
//! Implements the `LegalStore` trait on SQLite.
//!
//! # Architecture
//!
//! - `statute_articles` holds one row per article, unique on
//!   `(title, article_number)` with NULL numbers treated as a value
//! - `legal_cases` holds one row per case, unique on `title`
//! - Every write runs in SQLite's implicit per-statement transaction, so a
//!   failed write never leaves a half-updated row behind
//!
//! # Examples
//!
//! ```no_run
//! use lawbook_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

use chrono::NaiveDate;
use lawbook_domain::traits::{LegalStore, RecordFilter};
use lawbook_domain::{ArticleKey, ArticlePatch, ArticleRecord, CasePatch, CaseRecord, Collection};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record with the same identity key already exists
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Field coverage of the case collection, for status reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseCoverage {
    /// Total case rows
    pub total: usize,
    /// Rows with a cause of action
    pub cause_of_action: usize,
    /// Rows with a court name
    pub court_name: usize,
    /// Rows with a judgment date
    pub judgment_date: usize,
    /// Rows with a dispute point
    pub dispute_point: usize,
    /// Rows with a judgment result
    pub judgment_result: usize,
}

const ARTICLE_COLUMNS: &str =
    "title, article_number, content, law_domain, publish_org, publish_date, valid";

const CASE_COLUMNS: &str = "title, cause_of_action, content, court_name, judgment_date, \
     dispute_point, judgment_result, law_domain";

/// SQLite-based implementation of LegalStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance. Two reconciliation passes must never run against
/// the same database at once: migrations are not atomic across collections.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a fresh in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Number of rows in a collection (soft-deleted articles included)
    pub fn count(&self, collection: Collection) -> Result<usize, StoreError> {
        let sql = match collection {
            Collection::Statute => "SELECT COUNT(*) FROM statute_articles",
            Collection::Case => "SELECT COUNT(*) FROM legal_cases",
        };
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Row count per domain label, largest first
    pub fn domain_counts(&self, collection: Collection) -> Result<Vec<(String, usize)>, StoreError> {
        let sql = match collection {
            Collection::Statute => {
                "SELECT law_domain, COUNT(*) FROM statute_articles
                 GROUP BY law_domain ORDER BY COUNT(*) DESC, law_domain"
            }
            Collection::Case => {
                "SELECT law_domain, COUNT(*) FROM legal_cases
                 GROUP BY law_domain ORDER BY COUNT(*) DESC, law_domain"
            }
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// How many case rows have each extracted field set
    pub fn case_coverage(&self) -> Result<CaseCoverage, StoreError> {
        let coverage = self.conn.query_row(
            "SELECT COUNT(*),
                    COUNT(cause_of_action),
                    COUNT(court_name),
                    COUNT(judgment_date),
                    COUNT(dispute_point),
                    COUNT(judgment_result)
             FROM legal_cases",
            [],
            |row| {
                Ok(CaseCoverage {
                    total: row.get::<_, i64>(0)? as usize,
                    cause_of_action: row.get::<_, i64>(1)? as usize,
                    court_name: row.get::<_, i64>(2)? as usize,
                    judgment_date: row.get::<_, i64>(3)? as usize,
                    dispute_point: row.get::<_, i64>(4)? as usize,
                    judgment_result: row.get::<_, i64>(5)? as usize,
                })
            },
        )?;
        Ok(coverage)
    }

    fn row_to_article(row: &Row<'_>) -> rusqlite::Result<ArticleRecord> {
        Ok(ArticleRecord {
            title: row.get(0)?,
            article_number: row.get(1)?,
            content: row.get(2)?,
            law_domain: row.get(3)?,
            publish_org: row.get(4)?,
            publish_date: row.get::<_, Option<NaiveDate>>(5)?,
            valid: row.get(6)?,
        })
    }

    fn row_to_case(row: &Row<'_>) -> rusqlite::Result<CaseRecord> {
        Ok(CaseRecord {
            title: row.get(0)?,
            cause_of_action: row.get(1)?,
            content: row.get(2)?,
            court_name: row.get(3)?,
            judgment_date: row.get::<_, Option<NaiveDate>>(4)?,
            dispute_point: row.get(5)?,
            judgment_result: row.get(6)?,
            law_domain: row.get(7)?,
        })
    }

    /// Append the shared filter clauses to `sql`
    fn push_filter(
        sql: &mut String,
        params: &mut Vec<Box<dyn ToSql>>,
        filter: &RecordFilter,
        collection: Collection,
    ) {
        if let Some(title) = &filter.title {
            sql.push_str(" AND title = ?");
            params.push(Box::new(title.clone()));
        }

        if let Some(domain) = &filter.law_domain {
            sql.push_str(" AND law_domain = ?");
            params.push(Box::new(domain.clone()));
        }

        if let Some(min_chars) = filter.min_content_chars {
            // length() counts characters for TEXT values
            sql.push_str(" AND length(content) > ?");
            params.push(Box::new(min_chars as i64));
        }

        if filter.valid_only && collection == Collection::Statute {
            sql.push_str(" AND valid = 1");
        }

        sql.push_str(" ORDER BY id");

        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }
    }

    /// Run an UPDATE built from `(column, value)` pairs
    fn apply_update(
        &mut self,
        table: &str,
        assignments: Vec<(&'static str, Box<dyn ToSql>)>,
        where_clause: &str,
        mut where_params: Vec<Box<dyn ToSql>>,
    ) -> Result<bool, StoreError> {
        if assignments.is_empty() {
            return Ok(false);
        }

        let set_clause = assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE {}", table, set_clause, where_clause);

        let mut params: Vec<Box<dyn ToSql>> = assignments.into_iter().map(|(_, v)| v).collect();
        params.append(&mut where_params);
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let changed = self.conn.execute(&sql, &param_refs[..])?;
        Ok(changed > 0)
    }

    /// Map a UNIQUE constraint violation to `StoreError::Duplicate`
    fn map_insert_error(err: rusqlite::Error, key: String) -> StoreError {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Duplicate(key)
            }
            _ => StoreError::Database(err),
        }
    }
}

impl LegalStore for SqliteStore {
    type Error = StoreError;

    fn article_exists(&self, key: &ArticleKey) -> Result<bool, Self::Error> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM statute_articles WHERE title = ?1 AND article_number IS ?2",
                params![&key.title, &key.article_number],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn insert_article(&mut self, record: &ArticleRecord) -> Result<(), Self::Error> {
        if record.content.trim().is_empty() {
            return Err(StoreError::InvalidData(format!(
                "Empty content for article {}",
                record.key()
            )));
        }

        self.conn
            .execute(
                &format!(
                    "INSERT INTO statute_articles ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    ARTICLE_COLUMNS
                ),
                params![
                    &record.title,
                    &record.article_number,
                    &record.content,
                    &record.law_domain,
                    &record.publish_org,
                    &record.publish_date,
                    record.valid,
                ],
            )
            .map_err(|e| Self::map_insert_error(e, record.key().to_string()))?;

        tracing::trace!("Inserted article {}", record.key());
        Ok(())
    }

    fn update_article(&mut self, key: &ArticleKey, patch: &ArticlePatch) -> Result<bool, Self::Error> {
        let mut assignments: Vec<(&'static str, Box<dyn ToSql>)> = Vec::new();
        if let Some(content) = &patch.content {
            assignments.push(("content", Box::new(content.clone())));
        }
        if let Some(domain) = &patch.law_domain {
            assignments.push(("law_domain", Box::new(domain.clone())));
        }
        if let Some(org) = &patch.publish_org {
            assignments.push(("publish_org", Box::new(org.clone())));
        }
        if let Some(date) = patch.publish_date {
            assignments.push(("publish_date", Box::new(date)));
        }
        if let Some(valid) = patch.valid {
            assignments.push(("valid", Box::new(valid)));
        }

        self.apply_update(
            "statute_articles",
            assignments,
            "title = ? AND article_number IS ?",
            vec![Box::new(key.title.clone()), Box::new(key.article_number.clone())],
        )
    }

    fn delete_article(&mut self, key: &ArticleKey) -> Result<bool, Self::Error> {
        let removed = self.conn.execute(
            "DELETE FROM statute_articles WHERE title = ?1 AND article_number IS ?2",
            params![&key.title, &key.article_number],
        )?;
        Ok(removed > 0)
    }

    fn scan_articles(&self, filter: &RecordFilter) -> Result<Vec<ArticleRecord>, Self::Error> {
        let mut sql = format!("SELECT {} FROM statute_articles WHERE 1=1", ARTICLE_COLUMNS);
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        Self::push_filter(&mut sql, &mut params, filter, Collection::Statute);

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let records = stmt
            .query_map(&param_refs[..], Self::row_to_article)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn case_exists(&self, title: &str) -> Result<bool, Self::Error> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM legal_cases WHERE title = ?1",
                params![title],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn insert_case(&mut self, record: &CaseRecord) -> Result<(), Self::Error> {
        if record.content.trim().is_empty() {
            return Err(StoreError::InvalidData(format!(
                "Empty content for case {}",
                record.title
            )));
        }

        self.conn
            .execute(
                &format!(
                    "INSERT INTO legal_cases ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    CASE_COLUMNS
                ),
                params![
                    &record.title,
                    &record.cause_of_action,
                    &record.content,
                    &record.court_name,
                    &record.judgment_date,
                    &record.dispute_point,
                    &record.judgment_result,
                    &record.law_domain,
                ],
            )
            .map_err(|e| Self::map_insert_error(e, record.title.clone()))?;

        tracing::trace!("Inserted case {}", record.title);
        Ok(())
    }

    fn update_case(&mut self, title: &str, patch: &CasePatch) -> Result<bool, Self::Error> {
        let mut assignments: Vec<(&'static str, Box<dyn ToSql>)> = Vec::new();
        if let Some(cause) = &patch.cause_of_action {
            assignments.push(("cause_of_action", Box::new(cause.clone())));
        }
        if let Some(court) = &patch.court_name {
            assignments.push(("court_name", Box::new(court.clone())));
        }
        if let Some(date) = patch.judgment_date {
            assignments.push(("judgment_date", Box::new(date)));
        }
        if let Some(dispute) = &patch.dispute_point {
            assignments.push(("dispute_point", Box::new(dispute.clone())));
        }
        if let Some(result) = &patch.judgment_result {
            assignments.push(("judgment_result", Box::new(result.clone())));
        }
        if let Some(domain) = &patch.law_domain {
            assignments.push(("law_domain", Box::new(domain.clone())));
        }

        self.apply_update(
            "legal_cases",
            assignments,
            "title = ?",
            vec![Box::new(title.to_string())],
        )
    }

    fn delete_case(&mut self, title: &str) -> Result<bool, Self::Error> {
        let removed = self
            .conn
            .execute("DELETE FROM legal_cases WHERE title = ?1", params![title])?;
        Ok(removed > 0)
    }

    fn scan_cases(&self, filter: &RecordFilter) -> Result<Vec<CaseRecord>, Self::Error> {
        let mut sql = format!("SELECT {} FROM legal_cases WHERE 1=1", CASE_COLUMNS);
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        Self::push_filter(&mut sql, &mut params, filter, Collection::Case);

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let records = stmt
            .query_map(&param_refs[..], Self::row_to_case)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
