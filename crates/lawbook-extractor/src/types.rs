//! Segmentation units and ingestion request / report types

use lawbook_domain::{Collection, RecordFailure, RunId};
use serde::Serialize;

/// Unit of a marker (`第X条` has unit 条)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerUnit {
    /// 条
    Article,
    /// 章
    Chapter,
    /// 节
    Section,
    /// 款
    Clause,
    /// 项
    Item,
}

impl MarkerUnit {
    /// Parse a unit character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '条' => Some(MarkerUnit::Article),
            '章' => Some(MarkerUnit::Chapter),
            '节' => Some(MarkerUnit::Section),
            '款' => Some(MarkerUnit::Clause),
            '项' => Some(MarkerUnit::Item),
            _ => None,
        }
    }

    /// The unit character
    pub fn as_char(&self) -> char {
        match self {
            MarkerUnit::Article => '条',
            MarkerUnit::Chapter => '章',
            MarkerUnit::Section => '节',
            MarkerUnit::Clause => '款',
            MarkerUnit::Item => '项',
        }
    }
}

/// A line-initial `第<numeral><unit>` marker found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleMarker {
    /// Byte offset of the marker's first character
    pub position: usize,

    /// Numeral between 第 and the unit
    pub numeral: String,

    /// Marker unit
    pub unit: MarkerUnit,

    /// Full matched text, e.g. `第十二条`
    pub raw_text: String,
}

impl ArticleMarker {
    /// Byte offset just past the marker text
    pub fn end(&self) -> usize {
        self.position + self.raw_text.len()
    }
}

/// One article-sized piece of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleUnit {
    /// Marker text, unset when the whole document is one unit
    pub article_number: Option<String>,

    /// Unit body without its marker
    pub content: String,
}

/// Outcome of repairing a merged article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSplit {
    /// Content the existing record keeps
    pub corrected_content: String,

    /// Units to insert as new records under the same title
    pub extra_units: Vec<ArticleUnit>,
}

/// Caller-supplied overrides for one document
#[derive(Debug, Clone, Default)]
pub struct IngestHint {
    /// Domain label from the category mapping; wins over the classifier
    pub domain_label: Option<String>,

    /// Target collection; wins over the router
    pub collection: Option<Collection>,
}

impl IngestHint {
    /// Hint carrying only a domain label
    pub fn with_domain(label: impl Into<String>) -> Self {
        Self {
            domain_label: Some(label.into()),
            collection: None,
        }
    }

    /// Force the target collection
    pub fn forced(mut self, collection: Collection) -> Self {
        self.collection = Some(collection);
        self
    }
}

/// Counts and failures from ingesting one or more documents
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Run the report belongs to
    pub run_id: RunId,

    /// Documents processed
    pub documents: usize,

    /// Article records inserted
    pub articles_imported: usize,

    /// Case records inserted
    pub cases_imported: usize,

    /// Records skipped because their key already existed
    pub skipped: usize,

    /// Documents that produced no unit at all
    pub empty_documents: usize,

    /// Per-record failures
    pub failures: Vec<RecordFailure>,
}

impl IngestReport {
    /// Empty report for a run
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            documents: 0,
            articles_imported: 0,
            cases_imported: 0,
            skipped: 0,
            empty_documents: 0,
            failures: Vec::new(),
        }
    }

    /// Total records inserted
    pub fn imported(&self) -> usize {
        self.articles_imported + self.cases_imported
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: IngestReport) {
        self.documents += other.documents;
        self.articles_imported += other.articles_imported;
        self.cases_imported += other.cases_imported;
        self.skipped += other.skipped;
        self.empty_documents += other.empty_documents;
        self.failures.extend(other.failures);
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        format!(
            "Run {}: {} documents, imported {} ({} articles, {} cases), skipped {}, empty {}, errors {}",
            self.run_id.short(),
            self.documents,
            self.imported(),
            self.articles_imported,
            self.cases_imported,
            self.skipped,
            self.empty_documents,
            self.failures.len()
        )
    }
}
