//! Trait definitions for external interactions
//!
//! These traits define the boundary between the structuring engine and
//! persistence. Infrastructure implementations live in other crates.

use crate::{ArticleKey, ArticlePatch, ArticleRecord, CasePatch, CaseRecord};

/// Persistence for the statute and case collections
///
/// Implemented by the infrastructure layer (lawbook-store). Every write is
/// committed on its own; callers check existence before inserting so that
/// re-running an interrupted batch converges instead of duplicating.
pub trait LegalStore {
    /// Error type for store operations
    type Error;

    /// Whether an article with this key exists
    fn article_exists(&self, key: &ArticleKey) -> Result<bool, Self::Error>;

    /// Insert a new article
    fn insert_article(&mut self, record: &ArticleRecord) -> Result<(), Self::Error>;

    /// Apply a partial update to an article, returning whether a row changed
    fn update_article(&mut self, key: &ArticleKey, patch: &ArticlePatch) -> Result<bool, Self::Error>;

    /// Delete an article, returning whether a row was removed
    fn delete_article(&mut self, key: &ArticleKey) -> Result<bool, Self::Error>;

    /// Scan articles matching a filter, ordered by insertion
    fn scan_articles(&self, filter: &RecordFilter) -> Result<Vec<ArticleRecord>, Self::Error>;

    /// Whether a case with this title exists
    fn case_exists(&self, title: &str) -> Result<bool, Self::Error>;

    /// Insert a new case
    fn insert_case(&mut self, record: &CaseRecord) -> Result<(), Self::Error>;

    /// Apply a partial update to a case, returning whether a row changed
    fn update_case(&mut self, title: &str, patch: &CasePatch) -> Result<bool, Self::Error>;

    /// Delete a case, returning whether a row was removed
    fn delete_case(&mut self, title: &str) -> Result<bool, Self::Error>;

    /// Scan cases matching a filter, ordered by insertion
    fn scan_cases(&self, filter: &RecordFilter) -> Result<Vec<CaseRecord>, Self::Error>;
}

/// Scan criteria shared by both collections
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Exact title match
    pub title: Option<String>,

    /// Exact domain label match
    pub law_domain: Option<String>,

    /// Only records whose content is longer than this many characters
    pub min_content_chars: Option<usize>,

    /// Skip soft-deleted articles (ignored for cases)
    pub valid_only: bool,

    /// Maximum results to return
    pub limit: Option<usize>,
}

impl RecordFilter {
    /// Every record, soft-deleted articles excluded
    pub fn valid() -> Self {
        Self {
            valid_only: true,
            ..Default::default()
        }
    }

    /// Records with the given title
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}
