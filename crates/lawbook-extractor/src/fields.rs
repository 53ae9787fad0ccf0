//! Field extractors for statute metadata and case narratives
//!
//! Every extractor is an ordered list of patterns plus a validation
//! predicate. The first candidate that matches and validates wins; when none
//! does, the field stays unset. Extractors never fabricate a value.

use crate::error::ExtractorError;
use crate::segmenter::truncate_chars;
use crate::tables::*;
use chrono::NaiveDate;
use regex::{Captures, Regex};

/// Characters that can never be part of a court-name candidate
const COURT_BREAK_CHARS: &str = r"，。,；;：:\s、（）()《》“”‘’'\x22【】\[\]";

/// Fields extracted from a case narrative
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFields {
    /// Cause of action (案由)
    pub cause_of_action: Option<String>,
    /// Trial court or arbitration commission
    pub court_name: Option<String>,
    /// Latest valid date in the narrative
    pub judgment_date: Option<NaiveDate>,
    /// Dispute point (争议焦点)
    pub dispute_point: Option<String>,
    /// Judgment result (裁判结果)
    pub judgment_result: Option<String>,
}

/// Publishing metadata extracted from a statute document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishInfo {
    /// Publishing organisation
    pub publish_org: Option<String>,
    /// Publish / effective date
    pub publish_date: Option<NaiveDate>,
}

/// Compiled field extractors
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    publish_org: Regex,
    publish_date_labeled: Regex,
    judgment_date_labeled: Regex,
    bare_dates: Vec<Regex>,
    courts: Vec<Regex>,
    dispute_headers: Vec<Regex>,
    result_headers: Vec<Regex>,
    section_end: Regex,
    cause_label: Regex,
}

fn alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

fn labeled_date(labels: &[&str]) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?:{})\s*[:：]\s*([0-9]{{4}})\s*[-年/.]\s*([0-9]{{1,2}})(?:\s*[-月/.]\s*([0-9]{{1,2}}))?",
        alternation(labels)
    ))
}

fn section_headers(headers: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    headers
        .iter()
        .map(|h| Regex::new(&format!(r"{}\**[ \t]*(?:[为是]?[ \t]*[:：]|\n)", regex::escape(h))))
        .collect()
}

impl FieldExtractor {
    /// Compile all extractor patterns
    pub fn new() -> Result<Self, ExtractorError> {
        let x = format!("[^{}]", COURT_BREAK_CHARS);
        Ok(Self {
            publish_org: Regex::new(&format!(
                r"(?:{})\s*[:：][ \t]*([^\n]+)",
                alternation(PUBLISH_ORG_LABELS)
            ))?,
            publish_date_labeled: labeled_date(PUBLISH_DATE_LABELS)?,
            judgment_date_labeled: labeled_date(JUDGMENT_DATE_LABELS)?,
            bare_dates: vec![
                Regex::new(r"([0-9]{4})年([0-9]{1,2})月(?:([0-9]{1,2})日)?")?,
                Regex::new(r"([0-9]{4})-([0-9]{1,2})(?:-([0-9]{1,2}))?")?,
                Regex::new(r"([0-9]{4})/([0-9]{1,2})(?:/([0-9]{1,2}))?")?,
            ],
            courts: vec![
                Regex::new(&format!(
                    r"{x}{{0,30}}?(?:省|市|县|区|自治区|特别行政区){x}{{0,20}}?人民法院"
                ))?,
                Regex::new(&format!(r"{x}{{2,20}}?(?:市|县|区)人民法院"))?,
                Regex::new(&format!(r"{x}{{2,30}}?(?:劳动人事争议|劳动争议)?仲裁委员会"))?,
            ],
            dispute_headers: section_headers(DISPUTE_HEADERS)?,
            result_headers: section_headers(RESULT_HEADERS)?,
            section_end: Regex::new(r"\n[ \t]*\n|\n#")?,
            cause_label: Regex::new(&format!(
                r"(?:{})[ \t]*[:：][ \t]*([^\n]+)",
                alternation(CAUSE_LABELS)
            ))?,
        })
    }

    /// Publishing organisation from a labelled line
    pub fn publish_org(&self, text: &str) -> Option<String> {
        self.publish_org.captures_iter(text).find_map(|caps| {
            let org = caps
                .get(1)?
                .as_str()
                .trim()
                .trim_end_matches(['。', '；', ';', '，', ',']);
            let chars = org.chars().count();
            (2..=MAX_ORG_CHARS).contains(&chars).then(|| org.to_string())
        })
    }

    /// Publish date: labelled dates first, then bare dates
    ///
    /// Each pattern offers its first match only; an out-of-range date moves
    /// on to the next pattern.
    pub fn publish_date(&self, text: &str) -> Option<NaiveDate> {
        std::iter::once(&self.publish_date_labeled)
            .chain(self.bare_dates.iter())
            .find_map(|pattern| pattern.captures(text).and_then(|caps| date_from_captures(&caps)))
    }

    /// Judgment date: the latest valid date anywhere in the narrative
    pub fn judgment_date(&self, text: &str) -> Option<NaiveDate> {
        std::iter::once(&self.judgment_date_labeled)
            .chain(self.bare_dates.iter())
            .flat_map(|pattern| pattern.captures_iter(text))
            .filter_map(|caps| date_from_captures(&caps))
            .max()
    }

    /// Publishing organisation and date of a statute document
    pub fn publish_info(&self, text: &str) -> PublishInfo {
        PublishInfo {
            publish_org: self.publish_org(text),
            publish_date: self.publish_date(text),
        }
    }

    /// Court or arbitration commission named in a narrative
    ///
    /// Each candidate starts at its place-name chain when it has one, so
    /// narrative ahead of the court is dropped. Candidates naming a
    /// province, city, district, or county win over those that don't; ties
    /// go to the earliest in the text.
    pub fn court_name(&self, text: &str) -> Option<String> {
        let mut best: Option<(bool, usize, String)> = None;

        for pattern in &self.courts {
            for m in pattern.find_iter(text) {
                let (cut, candidate) = cut_after_connector(m.as_str());
                let anchor = place_anchor(candidate).unwrap_or(0);
                let candidate = &candidate[anchor..];
                if !is_valid_court_name(candidate) {
                    continue;
                }
                let regional = has_region_token(candidate);
                let position = m.start() + cut + anchor;
                let better = match &best {
                    None => true,
                    Some((best_regional, best_position, _)) => {
                        (regional && !best_regional)
                            || (regional == *best_regional && position < *best_position)
                    }
                };
                if better {
                    best = Some((regional, position, candidate.to_string()));
                }
            }
        }

        best.map(|(_, _, name)| name)
    }

    /// Dispute point following a 争议焦点-style header
    pub fn dispute_point(&self, text: &str) -> Option<String> {
        self.section(&self.dispute_headers, text)
    }

    /// Judgment result following a 裁判结果-style header
    pub fn judgment_result(&self, text: &str) -> Option<String> {
        self.section(&self.result_headers, text)
    }

    fn section(&self, headers: &[Regex], text: &str) -> Option<String> {
        headers
            .iter()
            .flat_map(|header| header.find_iter(text))
            .find_map(|m| {
                let rest = text[m.end()..].trim_start_matches(|c: char| c.is_whitespace() || c == '*');
                let end = self.section_end.find(rest).map_or(rest.len(), |e| e.start());
                validate_summary(&rest[..end])
            })
    }

    /// Cause of action from a 案由 label, else from the title
    pub fn cause_of_action(&self, title: &str, text: &str) -> Option<String> {
        let labeled = self.cause_label.captures_iter(text).find_map(|caps| {
            let cause = caps.get(1)?.as_str().trim();
            let chars = cause.chars().count();
            (1..=MAX_CAUSE_CHARS).contains(&chars).then(|| cause.to_string())
        });
        labeled.or_else(|| cause_from_title(title))
    }

    /// Run every case extractor
    pub fn case_fields(&self, title: &str, content: &str) -> CaseFields {
        CaseFields {
            cause_of_action: self.cause_of_action(title, content),
            court_name: self.court_name(content),
            judgment_date: self.judgment_date(content),
            dispute_point: self.dispute_point(content),
            judgment_result: self.judgment_result(content),
        }
    }
}

/// Build a date from `(year, month, day?)` captures
fn date_from_captures(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = match caps.get(3) {
        Some(d) => d.as_str().parse().ok()?,
        None => 1,
    };
    valid_date(year, month, day)
}

/// Calendar date inside the accepted year window
pub fn valid_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !YEAR_RANGE.contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Candidate with everything up to its last connector token removed
fn cut_after_connector(candidate: &str) -> (usize, &str) {
    let cut = COURT_CONNECTORS
        .iter()
        .filter_map(|token| candidate.rfind(token).map(|i| i + token.len()))
        .max()
        .unwrap_or(0);
    (cut, &candidate[cut..])
}

/// Byte offset where the place-name chain of a candidate begins
///
/// The chain ends at the last place name in the candidate and extends left
/// over `<place><level>` prefixes such as 江苏省.
fn place_anchor(candidate: &str) -> Option<usize> {
    let mut last = None;
    let mut i = 0;
    while let Some(c) = candidate[i..].chars().next() {
        match longest_place(&candidate[i..]) {
            Some(len) => {
                last = Some(i);
                i += len;
            }
            None => i += c.len_utf8(),
        }
    }

    let mut start = last?;
    while let Some(len) = place_level_suffix(&candidate[..start]) {
        start -= len;
    }
    Some(start)
}

fn longest_place(text: &str) -> Option<usize> {
    PLACE_NAMES
        .iter()
        .filter(|place| text.starts_with(**place))
        .map(|place| place.len())
        .max()
}

/// Byte length of a trailing `<place><level>` in `text`
fn place_level_suffix(text: &str) -> Option<usize> {
    PLACE_LEVELS.iter().find_map(|level| {
        let rest = text.strip_suffix(level)?;
        PLACE_NAMES
            .iter()
            .find(|place| rest.ends_with(**place))
            .map(|place| place.len() + level.len())
    })
}

fn has_region_token(name: &str) -> bool {
    REGION_TOKENS.iter().any(|token| name.contains(token))
}

/// Whether `name` looks like a real court or tribunal name
pub fn is_valid_court_name(name: &str) -> bool {
    let chars = name.chars().count();
    if !COURT_NAME_CHARS.contains(&chars) {
        return false;
    }
    if !COURT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return false;
    }
    if name.chars().any(|c| c.is_ascii_digit() || BRACKETS.contains(&c)) {
        return false;
    }
    if COURT_STOP_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
        return false;
    }
    if starts_with_surname(name) {
        return false;
    }
    !COURT_DENYLIST.iter().any(|word| name.contains(word))
}

fn starts_with_surname(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    COMMON_SURNAMES.contains(first) && longest_place(name).is_none()
}

/// Accept a captured dispute / result section
fn validate_summary(raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.chars().count() < *SUMMARY_CHARS.start() {
        return None;
    }
    if CITATION_PREFIXES.iter().any(|prefix| text.starts_with(prefix)) {
        return None;
    }
    Some(truncate_chars(text, *SUMMARY_CHARS.end()))
}

/// Title prefix through the first 纠纷 / 争议
fn cause_from_title(title: &str) -> Option<String> {
    CAUSE_TITLE_KEYWORDS
        .iter()
        .filter_map(|keyword| title.find(keyword).map(|i| i + keyword.len()))
        .min()
        .map(|end| title[..end].trim().to_string())
        .filter(|cause| !cause.is_empty())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: accepted court names never carry digits, brackets or denied words
        #[test]
        fn test_court_name_never_dirty(
            prefix in "[\u{4e00}-\u{4e2f}0-9（）()《》，]{0,30}",
            middle in "[省市区县\u{4e00}-\u{4e2f}0-9（）]{0,10}",
            suffix in "(人民法院|仲裁委员会|法院)",
        ) {
            let e = FieldExtractor::new().unwrap();
            let text = format!("{}{}{}", prefix, middle, suffix);
            if let Some(name) = e.court_name(&text) {
                prop_assert!(!name.chars().any(|c| c.is_ascii_digit() || BRACKETS.contains(&c)));
                for word in COURT_DENYLIST {
                    prop_assert!(!name.contains(word));
                }
                prop_assert!(is_valid_court_name(&name));
            }
        }

        /// Property: extracted dates always fall inside the accepted window
        #[test]
        fn test_dates_within_window(year in 1900i32..2100, month in 0u32..15, day in 0u32..35) {
            let e = FieldExtractor::new().unwrap();
            let text = format!("{}年{}月{}日", year, month, day);
            if let Some(date) = e.judgment_date(&text) {
                prop_assert!(YEAR_RANGE.contains(&chrono::Datelike::year(&date)));
            }
        }
    }
}
