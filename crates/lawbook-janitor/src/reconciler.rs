//! Reconciliation passes over stored records

use crate::{JanitorConfig, JanitorError, ReconcileSummary};
use lawbook_domain::traits::{LegalStore, RecordFilter};
use lawbook_domain::{
    ArticleKey, ArticlePatch, ArticleRecord, CasePatch, CaseRecord, Collection, FailureStage,
    LawDomain, RecordFailure, RunId,
};
use lawbook_extractor::segmenter::truncate_chars;
use lawbook_extractor::{
    is_valid_court_name, ArticleUnit, DocumentSegmenter, ExtractorConfig, FieldExtractor,
};
use lawbook_gatekeeper::{DomainClassifier, GatekeeperConfig, RecordRouter};
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Re-applies routing, extraction, classification, and segmentation to
/// records that are already stored
///
/// A pass only ever tightens data: it fills unset fields, moves misrouted
/// records, splits merged articles, and strips marker remnants. Running it
/// again over an unchanged store performs no mutation.
///
/// Migration between collections is insert-then-delete without a shared
/// transaction. Every insert is guarded by an existence check, so a pass
/// interrupted between the two steps converges on the next run. Two passes
/// must not run against the same store at once.
///
/// # Examples
///
/// ```no_run
/// use lawbook_janitor::{JanitorConfig, Reconciler};
/// use lawbook_extractor::ExtractorConfig;
/// use lawbook_gatekeeper::GatekeeperConfig;
/// use lawbook_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteStore::new("lawbook.db")?;
/// let reconciler = Reconciler::new(
///     JanitorConfig::default(),
///     ExtractorConfig::default(),
///     &GatekeeperConfig::default(),
/// )?;
///
/// let summary = reconciler.run(&mut store)?;
/// println!("{}", summary.summary());
/// # Ok(())
/// # }
/// ```
pub struct Reconciler {
    config: JanitorConfig,
    extractor: ExtractorConfig,
    segmenter: DocumentSegmenter,
    fields: FieldExtractor,
    classifier: DomainClassifier,
    router: RecordRouter,
}

impl Reconciler {
    /// Create a Reconciler
    pub fn new(
        config: JanitorConfig,
        extractor: ExtractorConfig,
        gatekeeper: &GatekeeperConfig,
    ) -> Result<Self, JanitorError> {
        config.validate().map_err(JanitorError::Config)?;
        extractor.validate().map_err(JanitorError::Config)?;
        Ok(Self {
            segmenter: DocumentSegmenter::new(&extractor)?,
            fields: FieldExtractor::new()?,
            classifier: DomainClassifier::new(gatekeeper),
            router: RecordRouter::new(gatekeeper)?,
            config,
            extractor,
        })
    }

    /// Create a Reconciler with default configuration everywhere
    pub fn default_config() -> Result<Self, JanitorError> {
        Self::new(
            JanitorConfig::default(),
            ExtractorConfig::default(),
            &GatekeeperConfig::default(),
        )
    }

    /// Active configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Run one pass over both collections
    ///
    /// Only a failure to scan the store is returned as an error. Failures on
    /// individual records are collected in the summary and the pass goes on.
    pub fn run<S>(&self, store: &mut S) -> Result<ReconcileSummary, JanitorError>
    where
        S: LegalStore,
        S::Error: Display,
    {
        let run_id = RunId::new();
        info!(
            "Reconciliation {} started{}",
            run_id.short(),
            if self.config.dry_run { " (dry run)" } else { "" }
        );

        let articles = store
            .scan_articles(&RecordFilter::valid())
            .map_err(|e| JanitorError::Store(e.to_string()))?;
        let cases = store
            .scan_cases(&RecordFilter::default())
            .map_err(|e| JanitorError::Store(e.to_string()))?;

        let mut pass = Pass {
            reconciler: self,
            store,
            summary: ReconcileSummary::new(run_id, self.config.dry_run),
            inserted_articles: HashSet::new(),
            inserted_cases: HashSet::new(),
        };
        pass.summary.articles_scanned = articles.len();
        pass.summary.cases_scanned = cases.len();

        let (articles, cases) = if self.config.migrate {
            let articles = pass.migrate_articles(articles);
            let cases = pass.migrate_cases(cases);
            (articles, cases)
        } else {
            (articles, cases)
        };

        for article in articles {
            pass.repair_article(article);
        }
        for case in cases {
            pass.repair_case(case);
        }

        let summary = pass.summary;
        info!(
            "Reconciliation {} finished: {} mutations, {} errors",
            run_id.short(),
            summary.total_mutations(),
            summary.failures.len()
        );
        Ok(summary)
    }

    /// Whether a stored article belongs in the case collection
    fn article_routes_to_case(&self, article: &ArticleRecord) -> bool {
        self.router.route(&article.title, &routing_text(article)) == Collection::Case
    }

    /// Missing publish metadata and a recomputed domain for an article
    fn article_backfill(&self, article: &ArticleRecord) -> ArticlePatch {
        let mut patch = ArticlePatch::default();

        if article.publish_org.is_none() || article.publish_date.is_none() {
            let info = self.fields.publish_info(&article.content);
            if article.publish_org.is_none() {
                patch.publish_org = info.publish_org;
            }
            if article.publish_date.is_none() {
                patch.publish_date = info.publish_date;
            }
        }

        if LawDomain::is_unclassified(&article.law_domain) {
            let domain = self.classifier.classify(&article.title, &article.content);
            patch.law_domain = Some(domain.to_string());
        }

        patch
    }

    /// Fields a case is missing, or holds in a shorter or invalid form
    fn case_backfill(&self, case: &CaseRecord) -> CasePatch {
        let found = self.fields.case_fields(&case.title, &case.content);
        let mut patch = CasePatch::default();

        if case.cause_of_action.is_none() {
            patch.cause_of_action = found.cause_of_action;
        }

        patch.court_name = match &case.court_name {
            None => found.court_name,
            Some(current) if !is_valid_court_name(current) => {
                found.court_name.filter(|name| name != current)
            }
            Some(_) => None,
        };

        if case.judgment_date.is_none() {
            patch.judgment_date = found.judgment_date;
        }

        patch.dispute_point = longer(case.dispute_point.as_deref(), found.dispute_point);
        patch.judgment_result = longer(case.judgment_result.as_deref(), found.judgment_result);

        if LawDomain::is_unclassified(&case.law_domain) {
            let domain = self.classifier.classify(&case.title, &case.content);
            patch.law_domain = Some(domain.to_string());
        }

        patch
    }

    /// Bring a record about to be inserted to the state a backfill would
    fn complete_article(&self, record: &mut ArticleRecord) {
        self.article_backfill(record).apply_to(record);
    }

    fn complete_case(&self, record: &mut CaseRecord) {
        self.case_backfill(record).apply_to(record);
    }
}

/// Article text as the router sees it: marker line first
fn routing_text(article: &ArticleRecord) -> String {
    match &article.article_number {
        Some(number) => format!("{} {}", number, article.content),
        None => article.content.clone(),
    }
}

/// `found` when it fills an unset field or strictly lengthens the current one
fn longer(current: Option<&str>, found: Option<String>) -> Option<String> {
    match current {
        None => found,
        Some(current) => {
            found.filter(|candidate| candidate.chars().count() > current.chars().count())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insert {
    Done,
    Present,
    Failed,
}

/// State of one pass: the store, counters, and keys inserted so far
struct Pass<'a, S> {
    reconciler: &'a Reconciler,
    store: &'a mut S,
    summary: ReconcileSummary,
    inserted_articles: HashSet<ArticleKey>,
    inserted_cases: HashSet<String>,
}

impl<S> Pass<'_, S>
where
    S: LegalStore,
    S::Error: Display,
{
    fn dry_run(&self) -> bool {
        self.reconciler.config.dry_run
    }

    fn fail(&mut self, key: impl Into<String>, stage: FailureStage, reason: impl Display) {
        let failure = RecordFailure::new(key, stage, reason);
        warn!("Reconciliation failure {}", failure);
        self.summary.failures.push(failure);
    }

    /// Move statute articles that route to the case collection
    ///
    /// Articles sharing a title become one case. Returns the articles that
    /// stay put.
    fn migrate_articles(&mut self, articles: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        let (to_case, remaining): (Vec<_>, Vec<_>) = articles
            .into_iter()
            .partition(|article| self.reconciler.article_routes_to_case(article));

        let mut groups: Vec<(String, Vec<ArticleRecord>)> = Vec::new();
        for article in to_case {
            match groups.iter_mut().find(|(title, _)| *title == article.title) {
                Some((_, group)) => group.push(article),
                None => groups.push((article.title.clone(), vec![article])),
            }
        }

        for (title, group) in groups {
            self.articles_to_case(&title, group);
        }
        remaining
    }

    fn articles_to_case(&mut self, title: &str, group: Vec<ArticleRecord>) {
        let reconciler = self.reconciler;
        let joined = group.iter().map(routing_text).collect::<Vec<_>>().join("\n");
        let content = truncate_chars(&joined, reconciler.extractor.max_case_chars);

        let mut case = CaseRecord::new(title, content, group[0].law_domain.clone());
        let found = reconciler.fields.case_fields(title, &case.content);
        case.cause_of_action = found.cause_of_action;
        case.court_name = found.court_name.or_else(|| {
            group
                .iter()
                .filter_map(|a| a.publish_org.clone())
                .find(|org| is_valid_court_name(org))
        });
        case.judgment_date = found
            .judgment_date
            .or_else(|| group.iter().find_map(|a| a.publish_date));
        case.dispute_point = found.dispute_point;
        case.judgment_result = found.judgment_result;
        reconciler.complete_case(&mut case);

        if self.insert_case(&case, FailureStage::Migrate) == Insert::Failed {
            return;
        }

        for article in &group {
            self.delete_article(&article.key());
        }
        self.summary.migrated_to_case += 1;
        debug!("Migrated '{}' ({} articles) to case collection", title, group.len());
    }

    /// Move cases that route to the statute collection
    ///
    /// Returns the cases that stay put.
    fn migrate_cases(&mut self, cases: Vec<CaseRecord>) -> Vec<CaseRecord> {
        let mut remaining = Vec::with_capacity(cases.len());
        for case in cases {
            let route = self.reconciler.router.route(&case.title, &case.content);
            if route == Collection::Statute {
                self.case_to_statute(case);
            } else {
                remaining.push(case);
            }
        }
        remaining
    }

    fn case_to_statute(&mut self, case: CaseRecord) {
        let reconciler = self.reconciler;
        let mut units = reconciler.segmenter.segment(&case.title, &case.content);
        if units.is_empty() {
            units.push(ArticleUnit {
                article_number: None,
                content: truncate_chars(case.content.trim(), reconciler.extractor.max_unit_chars),
            });
        }

        let mut failed = false;
        for unit in units {
            let mut record = ArticleRecord::new(
                &case.title,
                unit.article_number,
                unit.content,
                case.law_domain.clone(),
            );
            record.publish_org = case.court_name.clone();
            record.publish_date = case.judgment_date;
            reconciler.complete_article(&mut record);

            match self.insert_article(&record, FailureStage::Migrate) {
                Insert::Done => self.summary.units_inserted += 1,
                Insert::Present => {}
                Insert::Failed => failed = true,
            }
        }

        // Keep the source while any unit is missing from the target
        if failed {
            return;
        }

        self.delete_case(&case.title);
        self.summary.migrated_to_statute += 1;
        debug!("Migrated '{}' to statute collection", case.title);
    }

    fn repair_article(&mut self, mut article: ArticleRecord) {
        let reconciler = self.reconciler;
        let config = &reconciler.config;
        if config.split_merged {
            self.split_merged(&mut article);
        }
        if config.strip_marker_remnants {
            self.strip_remnant(&mut article);
        }
        if config.backfill {
            self.backfill_article(&mut article);
        }
    }

    /// Split an article whose content swallowed neighbouring articles
    ///
    /// Extra units are inserted before the record itself is shortened, so an
    /// interrupted split loses no text.
    fn split_merged(&mut self, article: &mut ArticleRecord) {
        let reconciler = self.reconciler;
        let Some(number) = article.article_number.clone() else {
            return;
        };
        if article.content.chars().count() <= reconciler.config.merge_scan_min_chars {
            return;
        }
        let Some(split) = reconciler.segmenter.split_merged(&number, &article.content) else {
            return;
        };

        let mut failed = false;
        for unit in split.extra_units {
            let mut record = ArticleRecord::new(
                &article.title,
                unit.article_number,
                unit.content,
                article.law_domain.clone(),
            );
            record.publish_org = article.publish_org.clone();
            record.publish_date = article.publish_date;
            reconciler.complete_article(&mut record);

            match self.insert_article(&record, FailureStage::Split) {
                Insert::Done => self.summary.units_inserted += 1,
                Insert::Present => {}
                Insert::Failed => failed = true,
            }
        }
        if failed {
            return;
        }

        let patch = ArticlePatch {
            content: Some(split.corrected_content),
            ..Default::default()
        };
        if self.update_article(&article.key(), &patch, FailureStage::Split) {
            patch.apply_to(article);
            self.summary.merged_split += 1;
        }
    }

    fn strip_remnant(&mut self, article: &mut ArticleRecord) {
        let Some(number) = article.article_number.clone() else {
            return;
        };

        let mut stripped = None;
        while let Some(rest) = self
            .reconciler
            .segmenter
            .strip_own_marker(&number, stripped.as_deref().unwrap_or(&article.content))
        {
            stripped = Some(rest);
        }
        let Some(content) = stripped else {
            return;
        };

        let patch = ArticlePatch {
            content: Some(content),
            ..Default::default()
        };
        if self.update_article(&article.key(), &patch, FailureStage::Update) {
            patch.apply_to(article);
            self.summary.remnants_stripped += 1;
        }
    }

    fn backfill_article(&mut self, article: &mut ArticleRecord) {
        let patch = self.reconciler.article_backfill(article);
        if patch.is_empty() {
            return;
        }

        if self.update_article(&article.key(), &patch, FailureStage::Update) {
            let fields = patch.publish_org.is_some() as usize + patch.publish_date.is_some() as usize;
            self.summary.fields_backfilled += fields;
            if patch.law_domain.is_some() {
                self.summary.domains_reclassified += 1;
            }
            patch.apply_to(article);
        }
    }

    fn repair_case(&mut self, case: CaseRecord) {
        if !self.reconciler.config.backfill {
            return;
        }
        let patch = self.reconciler.case_backfill(&case);
        if patch.is_empty() {
            return;
        }

        if self.update_case(&case.title, &patch) {
            let reclassified = patch.law_domain.is_some();
            self.summary.fields_backfilled += patch.fields().len() - reclassified as usize;
            if reclassified {
                self.summary.domains_reclassified += 1;
            }
        }
    }

    fn insert_article(&mut self, record: &ArticleRecord, stage: FailureStage) -> Insert {
        let key = record.key();
        let present = if self.inserted_articles.contains(&key) {
            Ok(true)
        } else {
            self.store.article_exists(&key).map_err(|e| e.to_string())
        };

        match present {
            Ok(true) => {
                self.summary.skipped += 1;
                Insert::Present
            }
            Ok(false) => {
                if !self.dry_run() {
                    if let Err(e) = self.store.insert_article(record) {
                        self.fail(key.to_string(), stage, e);
                        return Insert::Failed;
                    }
                }
                debug!("Inserted {}", key);
                self.inserted_articles.insert(key);
                Insert::Done
            }
            Err(e) => {
                self.fail(key.to_string(), stage, e);
                Insert::Failed
            }
        }
    }

    fn insert_case(&mut self, record: &CaseRecord, stage: FailureStage) -> Insert {
        let present = if self.inserted_cases.contains(&record.title) {
            Ok(true)
        } else {
            self.store.case_exists(&record.title).map_err(|e| e.to_string())
        };

        match present {
            Ok(true) => {
                self.summary.skipped += 1;
                Insert::Present
            }
            Ok(false) => {
                if !self.dry_run() {
                    if let Err(e) = self.store.insert_case(record) {
                        self.fail(record.title.clone(), stage, e);
                        return Insert::Failed;
                    }
                }
                debug!("Inserted case '{}'", record.title);
                self.inserted_cases.insert(record.title.clone());
                Insert::Done
            }
            Err(e) => {
                self.fail(record.title.clone(), stage, e);
                Insert::Failed
            }
        }
    }

    fn update_article(&mut self, key: &ArticleKey, patch: &ArticlePatch, stage: FailureStage) -> bool {
        if self.dry_run() {
            debug!("DRY RUN: would update {} ({})", key, patch.fields().join(", "));
            return true;
        }
        match self.store.update_article(key, patch) {
            Ok(true) => {
                debug!("Updated {} ({})", key, patch.fields().join(", "));
                true
            }
            Ok(false) => {
                self.fail(key.to_string(), stage, "record no longer exists");
                false
            }
            Err(e) => {
                self.fail(key.to_string(), stage, e);
                false
            }
        }
    }

    fn update_case(&mut self, title: &str, patch: &CasePatch) -> bool {
        if self.dry_run() {
            debug!("DRY RUN: would update case '{}' ({})", title, patch.fields().join(", "));
            return true;
        }
        match self.store.update_case(title, patch) {
            Ok(true) => {
                debug!("Updated case '{}' ({})", title, patch.fields().join(", "));
                true
            }
            Ok(false) => {
                self.fail(title, FailureStage::Update, "record no longer exists");
                false
            }
            Err(e) => {
                self.fail(title, FailureStage::Update, e);
                false
            }
        }
    }

    fn delete_article(&mut self, key: &ArticleKey) {
        if self.dry_run() {
            debug!("DRY RUN: would delete {}", key);
            return;
        }
        match self.store.delete_article(key) {
            Ok(_) => debug!("Deleted {}", key),
            Err(e) => self.fail(key.to_string(), FailureStage::Migrate, e),
        }
    }

    fn delete_case(&mut self, title: &str) {
        if self.dry_run() {
            debug!("DRY RUN: would delete case '{}'", title);
            return;
        }
        match self.store.delete_case(title) {
            Ok(_) => debug!("Deleted case '{}'", title),
            Err(e) => self.fail(title, FailureStage::Migrate, e),
        }
    }
}
