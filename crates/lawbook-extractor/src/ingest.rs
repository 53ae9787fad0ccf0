//! Document ingestion: route, segment, extract, classify, insert

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::fields::FieldExtractor;
use crate::segmenter::{truncate_chars, DocumentSegmenter};
use crate::types::{IngestHint, IngestReport};
use lawbook_domain::traits::LegalStore;
use lawbook_domain::{
    ArticleRecord, CaseRecord, Collection, FailureStage, RawDocument, RecordFailure, RunId,
};
use lawbook_gatekeeper::{DomainClassifier, GatekeeperConfig, RecordRouter};
use regex::Regex;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Directories never descended into during a tree import
pub const SKIP_DIRS: &[&str] = &[".git", "scripts", ".github", "DLC"];

/// Files never imported
pub const SKIP_FILES: &[&str] = &["_index.md"];

/// Runs the full ingestion flow for raw documents
///
/// One `Ingestor` is one run: every report it produces carries the same
/// [`RunId`]. Records whose key already exists are skipped, so importing
/// the same documents twice inserts nothing the second time.
pub struct Ingestor {
    config: ExtractorConfig,
    segmenter: DocumentSegmenter,
    fields: FieldExtractor,
    classifier: DomainClassifier,
    router: RecordRouter,
    html_comment: Regex,
    run_id: RunId,
}

impl Ingestor {
    /// Create an Ingestor
    pub fn new(config: ExtractorConfig, gatekeeper: &GatekeeperConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            segmenter: DocumentSegmenter::new(&config)?,
            fields: FieldExtractor::new()?,
            classifier: DomainClassifier::new(gatekeeper),
            router: RecordRouter::new(gatekeeper)?,
            html_comment: Regex::new(r"(?s)<!--.*?-->")?,
            run_id: RunId::new(),
            config,
        })
    }

    /// Identifier of this run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Ingest one document
    pub fn ingest_document<S>(
        &self,
        store: &mut S,
        document: &RawDocument,
        hint: &IngestHint,
    ) -> IngestReport
    where
        S: LegalStore,
        S::Error: std::fmt::Display,
    {
        let mut report = IngestReport::new(self.run_id);
        report.documents = 1;

        let collection = hint
            .collection
            .unwrap_or_else(|| self.router.route(&document.title, &document.body_text));
        debug!("Routing '{}' to {}", document.title, collection);

        match collection {
            Collection::Statute => self.ingest_statute(store, document, hint, &mut report),
            Collection::Case => self.ingest_case(store, document, hint, &mut report),
        }
        report
    }

    fn ingest_statute<S>(
        &self,
        store: &mut S,
        document: &RawDocument,
        hint: &IngestHint,
        report: &mut IngestReport,
    ) where
        S: LegalStore,
        S::Error: std::fmt::Display,
    {
        let units = self.segmenter.segment(&document.title, &document.body_text);
        if units.is_empty() {
            report.empty_documents += 1;
            return;
        }

        let publish = self.fields.publish_info(&document.body_text);

        for unit in units {
            let law_domain = match &hint.domain_label {
                Some(label) => label.clone(),
                None => self
                    .classifier
                    .classify(&document.title, &unit.content)
                    .to_string(),
            };
            let mut record =
                ArticleRecord::new(&document.title, unit.article_number, unit.content, law_domain);
            record.publish_org = publish.publish_org.clone();
            record.publish_date = publish.publish_date;

            let key = record.key();
            match store.article_exists(&key) {
                Ok(true) => {
                    report.skipped += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Existence check failed for {}: {}", key, e);
                    report
                        .failures
                        .push(RecordFailure::new(key.to_string(), FailureStage::Insert, e));
                    continue;
                }
            }

            match store.insert_article(&record) {
                Ok(()) => report.articles_imported += 1,
                Err(e) => {
                    warn!("Failed to insert {}: {}", key, e);
                    report
                        .failures
                        .push(RecordFailure::new(key.to_string(), FailureStage::Insert, e));
                }
            }
        }
    }

    fn ingest_case<S>(
        &self,
        store: &mut S,
        document: &RawDocument,
        hint: &IngestHint,
        report: &mut IngestReport,
    ) where
        S: LegalStore,
        S::Error: std::fmt::Display,
    {
        let content = self.case_content(&document.body_text);
        if content.is_empty() {
            report.empty_documents += 1;
            return;
        }

        match store.case_exists(&document.title) {
            Ok(true) => {
                report.skipped += 1;
                return;
            }
            Ok(false) => {}
            Err(e) => {
                warn!("Existence check failed for case '{}': {}", document.title, e);
                report.failures.push(RecordFailure::new(
                    document.title.clone(),
                    FailureStage::Insert,
                    e,
                ));
                return;
            }
        }

        let fields = self.fields.case_fields(&document.title, &content);
        let law_domain = match &hint.domain_label {
            Some(label) => label.clone(),
            None => self.classifier.classify(&document.title, &content).to_string(),
        };

        let mut record = CaseRecord::new(&document.title, content, law_domain);
        record.cause_of_action = fields.cause_of_action;
        record.court_name = fields.court_name;
        record.judgment_date = fields.judgment_date;
        record.dispute_point = fields.dispute_point;
        record.judgment_result = fields.judgment_result;

        match store.insert_case(&record) {
            Ok(()) => report.cases_imported += 1,
            Err(e) => {
                warn!("Failed to insert case '{}': {}", record.title, e);
                report
                    .failures
                    .push(RecordFailure::new(record.title, FailureStage::Insert, e));
            }
        }
    }

    /// Case body with HTML comments removed, trimmed and truncated
    pub fn case_content(&self, body_text: &str) -> String {
        let cleaned = self.html_comment.replace_all(body_text, "");
        truncate_chars(cleaned.trim(), self.config.max_case_chars)
    }

    /// Read and ingest one markdown file
    pub fn ingest_file<S>(&self, store: &mut S, path: &Path, hint: &IngestHint) -> IngestReport
    where
        S: LegalStore,
        S::Error: std::fmt::Display,
    {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let document = RawDocument::from_markdown(&stem, &text);
                self.ingest_document(store, &document, hint)
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                let mut report = IngestReport::new(self.run_id);
                report.documents = 1;
                report.failures.push(RecordFailure::new(
                    path.display().to_string(),
                    FailureStage::Read,
                    e,
                ));
                report
            }
        }
    }

    /// Import a statute repository laid out as `<category>/**/*.md`
    ///
    /// Category directories with a mapping supply the stored domain label;
    /// the router still decides the collection of every file.
    pub fn import_statute_tree<S>(&self, store: &mut S, root: &Path) -> Result<IngestReport, ExtractorError>
    where
        S: LegalStore,
        S::Error: std::fmt::Display,
    {
        self.import_tree(store, root, |category| IngestHint {
            domain_label: category
                .and_then(|c| self.config.statute_domain(c))
                .map(str::to_string),
            collection: None,
        })
    }

    /// Import a case directory laid out as `<subcategory>/**/*.md`
    ///
    /// Every file goes straight into the case collection.
    pub fn import_case_tree<S>(&self, store: &mut S, root: &Path) -> Result<IngestReport, ExtractorError>
    where
        S: LegalStore,
        S::Error: std::fmt::Display,
    {
        self.import_tree(store, root, |category| IngestHint {
            domain_label: category
                .and_then(|c| self.config.case_domain(c))
                .map(str::to_string),
            collection: Some(Collection::Case),
        })
    }

    fn import_tree<S, F>(&self, store: &mut S, root: &Path, hint_for: F) -> Result<IngestReport, ExtractorError>
    where
        S: LegalStore,
        S::Error: std::fmt::Display,
        F: Fn(Option<&str>) -> IngestHint,
    {
        if !root.is_dir() {
            return Err(ExtractorError::Config(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        info!("Run {}: importing {}", self.run_id.short(), root.display());
        let mut report = IngestReport::new(self.run_id);

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(e.file_type().is_dir()
                    && e.depth() > 0
                    && e.file_name().to_str().is_some_and(|n| SKIP_DIRS.contains(&n)))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    let key = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string());
                    report.failures.push(RecordFailure::new(key, FailureStage::Read, e));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let file_name = entry.file_name().to_str().unwrap_or("");
            if SKIP_FILES.contains(&file_name)
                || path.extension().and_then(|e| e.to_str()) != Some("md")
            {
                continue;
            }

            let category = category_of(root, path);
            let hint = hint_for(category.as_deref());
            report.merge(self.ingest_file(store, path, &hint));
        }

        info!("{}", report.summary());
        Ok(report)
    }
}

/// Top-level directory of `path` under `root`, if the file is nested
fn category_of(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();
    let first = components.next()?;
    // A file directly under the root has no category
    components.next()?;
    Some(first.as_os_str().to_string_lossy().into_owned())
}
