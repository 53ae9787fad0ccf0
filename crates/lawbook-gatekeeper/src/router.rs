//! Statute / case routing

use crate::config::GatekeeperConfig;
use crate::error::GatekeeperError;
use crate::keywords::*;
use lawbook_domain::Collection;
use regex::Regex;

/// Which routing rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRule {
    /// Title has the shape of a regulation name
    RegulationTitle,
    /// Title names two litigants (`X诉Y…案`)
    LitigantTitle,
    /// Title contains an explicit case-type keyword
    CaseTypeTitle,
    /// Content reads like a case narrative
    ContentVote,
    /// Nothing matched
    Default,
}

/// A routing decision and the rule behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDecision {
    /// Target collection
    pub collection: Collection,
    /// Rule that decided
    pub rule: RouteRule,
}

/// Decides whether a document belongs with statutes or cases
///
/// Rules are tried in order and the first match wins. Titles are trusted
/// over content: a regulation-shaped title routes to statutes whatever its
/// body says.
#[derive(Debug, Clone)]
pub struct RecordRouter {
    line_marker: Regex,
    feature_window_chars: usize,
    marker_window_chars: usize,
    min_case_features: usize,
}

impl RecordRouter {
    /// Create a router using the thresholds from `config`
    pub fn new(config: &GatekeeperConfig) -> Result<Self, GatekeeperError> {
        config.validate().map_err(GatekeeperError::Config)?;
        Ok(Self {
            line_marker: Regex::new(r"(?m)^第[一二三四五六七八九十百千万0-9]+[条章节款项]")?,
            feature_window_chars: config.feature_window_chars,
            marker_window_chars: config.marker_window_chars,
            min_case_features: config.min_case_features,
        })
    }

    /// Target collection for a document
    pub fn route(&self, title: &str, content: &str) -> Collection {
        self.decide(title, content).collection
    }

    /// Target collection plus the rule that chose it
    pub fn decide(&self, title: &str, content: &str) -> RouteDecision {
        let title = title.trim();
        let decision = |collection, rule| RouteDecision { collection, rule };

        if is_regulation_title(title) {
            return decision(Collection::Statute, RouteRule::RegulationTitle);
        }

        if title.contains(LITIGANT_CONNECTOR)
            && title.contains(CASE_SUFFIX)
            && !PROCEDURAL_INSTRUMENTS.iter().any(|p| title.contains(p))
        {
            return decision(Collection::Case, RouteRule::LitigantTitle);
        }

        if CASE_TYPE_KEYWORDS.iter().any(|kw| title.contains(kw)) {
            return decision(Collection::Case, RouteRule::CaseTypeTitle);
        }

        if self.case_feature_count(content) >= self.min_case_features
            && !self.has_leading_marker(content)
            && !has_statute_suffix(title)
        {
            return decision(Collection::Case, RouteRule::ContentVote);
        }

        decision(Collection::Statute, RouteRule::Default)
    }

    /// Distinct case-narrative tokens in the leading window of `content`
    pub fn case_feature_count(&self, content: &str) -> usize {
        let window = leading_chars(content, self.feature_window_chars);
        CASE_FEATURE_TOKENS
            .iter()
            .filter(|token| window.contains(*token))
            .count()
    }

    fn has_leading_marker(&self, content: &str) -> bool {
        self.line_marker
            .is_match(leading_chars(content, self.marker_window_chars))
    }
}

/// Whether a title has the shape of a regulation name
pub fn is_regulation_title(title: &str) -> bool {
    let shaped = title.starts_with(JURISDICTION_PREAMBLE)
        || has_statute_suffix(title)
        || AUTHORING_PHRASES.iter().any(|p| title.contains(p));
    shaped && !title.ends_with(CASE_SUFFIX)
}

fn has_statute_suffix(title: &str) -> bool {
    STATUTE_SUFFIXES.iter().any(|s| title.ends_with(s))
}

/// Leading `max` characters as a borrowed slice
fn leading_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}
