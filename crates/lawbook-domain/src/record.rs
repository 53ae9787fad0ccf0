//! Persisted records for the statute and case collections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two logical record sets a document can be routed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Statute articles (法条)
    Statute,

    /// Court cases (案例)
    Case,
}

impl Collection {
    /// Collection name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Statute => "statute",
            Collection::Case => "case",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity key of a statute article
///
/// `article_number` is `None` only when a whole document was stored as a
/// single unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArticleKey {
    /// Law title
    pub title: String,

    /// Article marker such as `第一条`
    pub article_number: Option<String>,
}

impl ArticleKey {
    /// Create a key
    pub fn new(title: impl Into<String>, article_number: Option<String>) -> Self {
        Self {
            title: title.into(),
            article_number,
        }
    }
}

impl fmt::Display for ArticleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.article_number {
            Some(number) => write!(f, "{} {}", self.title, number),
            None => write!(f, "{}", self.title),
        }
    }
}

/// One statute article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Law title
    pub title: String,

    /// Article marker (`第一条`), unset for whole-document units
    pub article_number: Option<String>,

    /// Article body without its own marker
    pub content: String,

    /// Stored legal-domain label
    pub law_domain: String,

    /// Publishing organisation
    pub publish_org: Option<String>,

    /// Publish / effective date
    pub publish_date: Option<NaiveDate>,

    /// Soft-delete flag
    pub valid: bool,
}

impl ArticleRecord {
    /// Create a valid record with no publishing metadata
    pub fn new(
        title: impl Into<String>,
        article_number: Option<String>,
        content: impl Into<String>,
        law_domain: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            article_number,
            content: content.into(),
            law_domain: law_domain.into(),
            publish_org: None,
            publish_date: None,
            valid: true,
        }
    }

    /// Identity key
    pub fn key(&self) -> ArticleKey {
        ArticleKey::new(self.title.clone(), self.article_number.clone())
    }
}

/// One court case narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Case title, globally unique
    pub title: String,

    /// Cause of action (案由)
    pub cause_of_action: Option<String>,

    /// Full narrative
    pub content: String,

    /// Trial court or arbitration commission
    pub court_name: Option<String>,

    /// Judgment date
    pub judgment_date: Option<NaiveDate>,

    /// Core dispute (争议焦点), 20-500 chars
    pub dispute_point: Option<String>,

    /// Outcome (裁判结果), 20-500 chars
    pub judgment_result: Option<String>,

    /// Stored legal-domain label
    pub law_domain: String,
}

impl CaseRecord {
    /// Create a record with every extracted field unset
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        law_domain: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            cause_of_action: None,
            content: content.into(),
            court_name: None,
            judgment_date: None,
            dispute_point: None,
            judgment_result: None,
            law_domain: law_domain.into(),
        }
    }
}

/// Partial update for an article record
///
/// `None` leaves the stored column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    /// Replacement content
    pub content: Option<String>,

    /// Replacement domain label
    pub law_domain: Option<String>,

    /// Publishing organisation to set
    pub publish_org: Option<String>,

    /// Publish date to set
    pub publish_date: Option<NaiveDate>,

    /// Validity flag to set
    pub valid: Option<bool>,
}

impl ArticlePatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.law_domain.is_none()
            && self.publish_org.is_none()
            && self.publish_date.is_none()
            && self.valid.is_none()
    }

    /// Names of the columns this patch touches
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.content.is_some() {
            fields.push("content");
        }
        if self.law_domain.is_some() {
            fields.push("law_domain");
        }
        if self.publish_org.is_some() {
            fields.push("publish_org");
        }
        if self.publish_date.is_some() {
            fields.push("publish_date");
        }
        if self.valid.is_some() {
            fields.push("valid");
        }
        fields
    }

    /// Apply the patch to an in-memory record
    pub fn apply_to(&self, record: &mut ArticleRecord) {
        if let Some(content) = &self.content {
            record.content = content.clone();
        }
        if let Some(domain) = &self.law_domain {
            record.law_domain = domain.clone();
        }
        if let Some(org) = &self.publish_org {
            record.publish_org = Some(org.clone());
        }
        if let Some(date) = self.publish_date {
            record.publish_date = Some(date);
        }
        if let Some(valid) = self.valid {
            record.valid = valid;
        }
    }
}

/// Partial update for a case record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CasePatch {
    /// Cause of action to set
    pub cause_of_action: Option<String>,

    /// Court name to set
    pub court_name: Option<String>,

    /// Judgment date to set
    pub judgment_date: Option<NaiveDate>,

    /// Dispute point to set
    pub dispute_point: Option<String>,

    /// Judgment result to set
    pub judgment_result: Option<String>,

    /// Replacement domain label
    pub law_domain: Option<String>,
}

impl CasePatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Names of the columns this patch touches
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.cause_of_action.is_some() {
            fields.push("cause_of_action");
        }
        if self.court_name.is_some() {
            fields.push("court_name");
        }
        if self.judgment_date.is_some() {
            fields.push("judgment_date");
        }
        if self.dispute_point.is_some() {
            fields.push("dispute_point");
        }
        if self.judgment_result.is_some() {
            fields.push("judgment_result");
        }
        if self.law_domain.is_some() {
            fields.push("law_domain");
        }
        fields
    }

    /// Apply the patch to an in-memory record
    pub fn apply_to(&self, record: &mut CaseRecord) {
        if let Some(cause) = &self.cause_of_action {
            record.cause_of_action = Some(cause.clone());
        }
        if let Some(court) = &self.court_name {
            record.court_name = Some(court.clone());
        }
        if let Some(date) = self.judgment_date {
            record.judgment_date = Some(date);
        }
        if let Some(dispute) = &self.dispute_point {
            record.dispute_point = Some(dispute.clone());
        }
        if let Some(result) = &self.judgment_result {
            record.judgment_result = Some(result.clone());
        }
        if let Some(domain) = &self.law_domain {
            record.law_domain = domain.clone();
        }
    }
}
