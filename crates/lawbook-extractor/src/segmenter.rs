//! Positional segmentation of statute text into article units

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::tables::{CHINESE_NUMERALS, MARKER_UNITS};
use crate::types::{ArticleMarker, ArticleUnit, MarkerUnit, MergeSplit};
use regex::Regex;
use tracing::debug;

/// Splits documents into article units at line-initial `第<numeral><unit>` markers
///
/// Chinese-numeral markers are preferred. Arabic-numeral markers are only
/// used when a text contains no Chinese-numeral marker at all, so the two
/// styles are never mixed within one document.
#[derive(Debug, Clone)]
pub struct DocumentSegmenter {
    chinese_marker: Regex,
    arabic_marker: Regex,
    max_unit_chars: usize,
    min_unit_chars: usize,
    min_document_chars: usize,
}

impl DocumentSegmenter {
    /// Create a segmenter using the limits from `config`
    pub fn new(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        Ok(Self {
            chinese_marker: Regex::new(&format!(
                r"(?m)^第([{}]+)([{}])",
                CHINESE_NUMERALS, MARKER_UNITS
            ))?,
            arabic_marker: Regex::new(&format!(r"(?m)^第([0-9]+)([{}])", MARKER_UNITS))?,
            max_unit_chars: config.max_unit_chars,
            min_unit_chars: config.min_unit_chars,
            min_document_chars: config.min_document_chars,
        })
    }

    /// Line-initial markers in `text`, by position
    pub fn find_markers(&self, text: &str) -> Vec<ArticleMarker> {
        let chinese = Self::collect_markers(&self.chinese_marker, text);
        if !chinese.is_empty() {
            return chinese;
        }
        Self::collect_markers(&self.arabic_marker, text)
    }

    fn collect_markers(pattern: &Regex, text: &str) -> Vec<ArticleMarker> {
        let mut markers: Vec<ArticleMarker> = pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let numeral = caps.get(1)?.as_str().to_string();
                let unit = MarkerUnit::from_char(caps.get(2)?.as_str().chars().next()?)?;
                Some(ArticleMarker {
                    position: whole.start(),
                    numeral,
                    unit,
                    raw_text: whole.as_str().to_string(),
                })
            })
            .collect();
        markers.sort_by_key(|m| m.position);
        markers
    }

    /// Split a document into article units
    ///
    /// With no markers the whole body (leading headings stripped) becomes a
    /// single unit with no article number, provided it is long enough.
    pub fn segment(&self, title: &str, body_text: &str) -> Vec<ArticleUnit> {
        let markers = self.find_markers(body_text);

        if markers.is_empty() {
            let body = strip_leading_headings(body_text).trim();
            if body.chars().count() <= self.min_document_chars {
                debug!("'{}' has no markers and too little text to store", title);
                return Vec::new();
            }
            debug!("'{}' has no markers, storing as one unit", title);
            return vec![ArticleUnit {
                article_number: None,
                content: truncate_chars(body, self.max_unit_chars),
            }];
        }

        let units = self.units_from_markers(body_text, &markers);
        debug!(
            "Segmented '{}' into {} units ({} markers)",
            title,
            units.len(),
            markers.len()
        );
        units
    }

    fn units_from_markers(&self, text: &str, markers: &[ArticleMarker]) -> Vec<ArticleUnit> {
        markers
            .iter()
            .enumerate()
            .filter_map(|(i, marker)| {
                let end = markers.get(i + 1).map_or(text.len(), |next| next.position);
                let content = text[marker.end()..end].trim();
                if content.chars().count() <= self.min_unit_chars {
                    return None;
                }
                Some(ArticleUnit {
                    article_number: Some(marker.raw_text.clone()),
                    content: truncate_chars(content, self.max_unit_chars),
                })
            })
            .collect()
    }

    /// Whether stored content carries a line-initial marker other than its own
    pub fn is_merged(&self, article_number: Option<&str>, content: &str) -> bool {
        let Some(own) = article_number else {
            return false;
        };
        self.find_markers(content)
            .iter()
            .any(|marker| marker.raw_text != own)
    }

    /// Repair content that swallowed following articles
    ///
    /// Text ahead of the first marker belongs to the record itself, and so
    /// does any unit carrying the record's own number. When there is no
    /// leading text, the first marker must be the record's own, otherwise
    /// the split is ambiguous and `None` is returned.
    pub fn split_merged(&self, article_number: &str, content: &str) -> Option<MergeSplit> {
        if !self.is_merged(Some(article_number), content) {
            return None;
        }

        let markers = self.find_markers(content);
        let first = markers.first()?;
        let leading = content[..first.position].trim();
        let mut units = self.units_from_markers(content, &markers);

        let corrected_content = if leading.chars().count() > self.min_unit_chars {
            let (own, others): (Vec<_>, Vec<_>) = units
                .into_iter()
                .partition(|unit| unit.article_number.as_deref() == Some(article_number));
            units = others;
            let mut corrected = leading.to_string();
            for unit in own {
                corrected.push('\n');
                corrected.push_str(&unit.content);
            }
            truncate_chars(&corrected, self.max_unit_chars)
        } else {
            if units.first()?.article_number.as_deref() != Some(article_number) {
                debug!(
                    "Merged content of {} starts with a different marker, skipping",
                    article_number
                );
                return None;
            }
            units.remove(0).content
        };

        Some(MergeSplit {
            corrected_content,
            extra_units: units,
        })
    }

    /// Content with the record's own marker removed from its start
    ///
    /// Returns `None` when the content does not start with the marker, or
    /// when nothing would remain.
    pub fn strip_own_marker(&self, article_number: &str, content: &str) -> Option<String> {
        let trimmed = content.trim_start();
        let rest = trimmed.strip_prefix(article_number)?;
        // 第十条 must not strip the front of 第十条之一
        if rest.starts_with('之') {
            return None;
        }
        let rest = rest.trim();
        (!rest.is_empty()).then(|| rest.to_string())
    }
}

/// Drop leading blank and `#` heading lines
fn strip_leading_headings(text: &str) -> &str {
    let mut rest = text;
    loop {
        let line_end = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let line = rest[..line_end].trim();
        if line_end == 0 || !(line.is_empty() || line.starts_with('#')) {
            return rest;
        }
        rest = &rest[line_end..];
    }
}

/// First `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte, _)) => text[..byte].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> DocumentSegmenter {
        DocumentSegmenter::new(&ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_two_articles() {
        let body = "# 中华人民共和国合同法\n\n第一条 为了保护合同当事人的合法权益，维护社会经济秩序。\n第二条 本法所称合同是平等主体之间设立民事关系的协议。";
        let units = segmenter().segment("中华人民共和国合同法", body);

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].article_number.as_deref(), Some("第一条"));
        assert_eq!(units[0].content, "为了保护合同当事人的合法权益，维护社会经济秩序。");
        assert_eq!(units[1].article_number.as_deref(), Some("第二条"));
        assert!(!units[0].content.contains("第二条"));
        assert!(!units[1].content.contains("第一条"));
    }

    #[test]
    fn test_markers_must_start_a_line() {
        let body = "第一条 依照本法第二条的规定，当事人应当遵循诚实信用原则。";
        let units = segmenter().segment("某法", body);
        assert_eq!(units.len(), 1);
        assert!(units[0].content.contains("第二条"));
    }

    #[test]
    fn test_short_units_discarded() {
        let body = "第一章 总则\n第一条 为了规范行政处罚的设定和实施，制定本法。";
        let units = segmenter().segment("行政处罚法", body);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].article_number.as_deref(), Some("第一条"));
    }

    #[test]
    fn test_arabic_only_without_chinese_markers() {
        let body = "第1条 本办法适用于全市范围内的物业管理活动。\n第2条 物业服务企业应当依法经营。";
        let units = segmenter().segment("某市物业管理办法", body);
        assert_eq!(units.len(), 2);
        assert_eq!(units[1].article_number.as_deref(), Some("第2条"));
    }

    #[test]
    fn test_styles_never_mix() {
        let body = "第一条 为了规范本市的物业管理活动而制定。\n第2条 物业服务企业应当依法经营并接受监督。";
        let units = segmenter().segment("某办法", body);
        assert_eq!(units.len(), 1);
        assert!(units[0].content.contains("第2条"));
    }

    #[test]
    fn test_whole_document_fallback() {
        let body = format!("# 某通知\n\n{}", "各有关单位应当认真贯彻落实本通知的要求。".repeat(4));
        let units = segmenter().segment("某通知", &body);
        assert_eq!(units.len(), 1);
        assert!(units[0].article_number.is_none());
        assert!(!units[0].content.starts_with('#'));
    }

    #[test]
    fn test_short_document_yields_nothing() {
        let units = segmenter().segment("某通知", "# 某通知\n\n太短了。");
        assert!(units.is_empty());
    }

    #[test]
    fn test_content_truncated_by_chars() {
        let body = format!("第一条 {}", "字".repeat(6000));
        let units = segmenter().segment("某法", &body);
        assert_eq!(units[0].content.chars().count(), 5000);
    }

    #[test]
    fn test_is_merged() {
        let s = segmenter();
        assert!(s.is_merged(Some("第一条"), "为了保护劳动者。\n第二条 本法适用于企业。"));
        assert!(!s.is_merged(Some("第一条"), "第一条 为了保护劳动者。"));
        assert!(!s.is_merged(Some("第一条"), "依照第二条规定处理。"));
        assert!(!s.is_merged(None, "内容\n第二条 内容"));
    }

    #[test]
    fn test_split_keeps_leading_text() {
        let content = "为了保护劳动者的合法权益，制定本法。\n第二条 在中华人民共和国境内的企业适用本法。\n第三条 劳动者享有平等就业和选择职业的权利。";
        let split = segmenter().split_merged("第一条", content).unwrap();

        assert_eq!(split.corrected_content, "为了保护劳动者的合法权益，制定本法。");
        assert_eq!(split.extra_units.len(), 2);
        assert_eq!(split.extra_units[0].article_number.as_deref(), Some("第二条"));
        assert_eq!(split.extra_units[1].article_number.as_deref(), Some("第三条"));
    }

    #[test]
    fn test_split_keeps_own_unit_after_leading_text() {
        let s = segmenter();
        let content = "本章规定劳动合同的订立和履行的一般规则。\n第一条 为了保护劳动者的合法权益而制定本法的具体内容。\n第二条 在中华人民共和国境内的企业适用本法。";
        let split = s.split_merged("第一条", content).unwrap();

        assert_eq!(
            split.corrected_content,
            "本章规定劳动合同的订立和履行的一般规则。\n为了保护劳动者的合法权益而制定本法的具体内容。"
        );
        assert_eq!(split.extra_units.len(), 1);
        assert_eq!(split.extra_units[0].article_number.as_deref(), Some("第二条"));
        assert!(!s.is_merged(Some("第一条"), &split.corrected_content));
    }

    #[test]
    fn test_split_with_own_marker_first() {
        let content = "第一条 为了保护劳动者的合法权益，制定本法。\n第二条 在中华人民共和国境内的企业适用本法。";
        let split = segmenter().split_merged("第一条", content).unwrap();
        assert_eq!(split.corrected_content, "为了保护劳动者的合法权益，制定本法。");
        assert_eq!(split.extra_units.len(), 1);
    }

    #[test]
    fn test_split_skips_mismatched_marker() {
        let content = "第三条 劳动者享有平等就业的权利和义务。\n第四条 用人单位应当依法建立规章制度。";
        assert!(segmenter().split_merged("第一条", content).is_none());
    }

    #[test]
    fn test_split_result_is_not_merged_again() {
        let s = segmenter();
        let content = "为了保护劳动者的合法权益，制定本法。\n第二条 在中华人民共和国境内的企业适用本法。";
        let split = s.split_merged("第一条", content).unwrap();
        assert!(!s.is_merged(Some("第一条"), &split.corrected_content));
        for unit in &split.extra_units {
            assert!(!s.is_merged(unit.article_number.as_deref(), &unit.content));
        }
    }

    #[test]
    fn test_strip_own_marker() {
        let s = segmenter();
        assert_eq!(
            s.strip_own_marker("第五条", "第五条 国家采取各种措施。").as_deref(),
            Some("国家采取各种措施。")
        );
        assert!(s.strip_own_marker("第五条", "国家采取各种措施。").is_none());
        assert!(s.strip_own_marker("第十条", "第十条之一 内容").is_none());
        assert!(s.strip_own_marker("第五条", "第五条").is_none());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("中华人民", 2), "中华");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn article() -> impl Strategy<Value = (String, String)> {
        (
            "[一二三四五六七八九十]{1,3}",
            "[a-z\u{4e0a}-\u{4e5c}，。]{11,80}",
        )
    }

    proptest! {
        /// Property: marker text plus unit content rebuilds the document
        #[test]
        fn test_segments_reconstruct_document(
            articles in prop::collection::vec(article(), 1..12),
            preamble in "[a-z]{0,20}",
        ) {
            let mut body = format!("# 某法\n{}\n", preamble);
            for (numeral, content) in &articles {
                body.push_str(&format!("第{}条 {}\n\n", numeral, content));
            }

            let units = segmenter_for_test().segment("某法", &body);
            prop_assert_eq!(units.len(), articles.len());

            let first = body.find("\n第").map(|i| i + 1).unwrap_or(0);
            let mut rebuilt = String::new();
            for unit in &units {
                rebuilt.push_str(unit.article_number.as_deref().unwrap_or(""));
                rebuilt.push(' ');
                rebuilt.push_str(&unit.content);
                rebuilt.push_str("\n\n");
            }
            prop_assert_eq!(rebuilt, &body[first..]);
        }

        /// Property: no unit content carries a line-initial marker
        #[test]
        fn test_units_are_never_merged(
            articles in prop::collection::vec(article(), 1..8),
        ) {
            let s = segmenter_for_test();
            let body: String = articles
                .iter()
                .map(|(n, c)| format!("第{}条 {}\n", n, c))
                .collect();
            for unit in s.segment("某法", &body) {
                prop_assert!(s.find_markers(&unit.content).is_empty());
            }
        }
    }

    fn segmenter_for_test() -> DocumentSegmenter {
        DocumentSegmenter::new(&ExtractorConfig::default()).unwrap()
    }
}
