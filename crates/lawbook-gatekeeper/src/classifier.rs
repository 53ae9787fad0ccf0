//! Weighted keyword classification into legal domains

use crate::config::GatekeeperConfig;
use crate::keywords::{DomainKeywords, DOMAIN_KEYWORDS, GENERIC_WEIGHT, HIGH_PRECISION_WEIGHT};
use lawbook_domain::LawDomain;

/// Assigns a legal domain from keyword hits
///
/// Each keyword counts once, however often it occurs. The highest score
/// wins; ties resolve by [`LawDomain::PRIORITY`] and a zero score yields
/// [`LawDomain::DEFAULT`].
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    window_chars: usize,
    tables: &'static [DomainKeywords],
}

impl DomainClassifier {
    /// Create a classifier using the window from `config`
    pub fn new(config: &GatekeeperConfig) -> Self {
        Self {
            window_chars: config.classify_window_chars,
            tables: &DOMAIN_KEYWORDS,
        }
    }

    /// Scored text: the leading window of `title + " " + content`
    fn window(&self, title: &str, content: &str) -> String {
        title
            .chars()
            .chain(std::iter::once(' '))
            .chain(content.chars())
            .take(self.window_chars)
            .collect()
    }

    /// Score of every domain, in priority order
    pub fn scores(&self, title: &str, content: &str) -> Vec<(LawDomain, u32)> {
        let text = self.window(title, content);
        self.tables
            .iter()
            .map(|table| {
                let high = table.high_precision.iter().filter(|kw| text.contains(*kw)).count() as u32;
                let generic = table.generic.iter().filter(|kw| text.contains(*kw)).count() as u32;
                (table.domain, high * HIGH_PRECISION_WEIGHT + generic * GENERIC_WEIGHT)
            })
            .collect()
    }

    /// Domain of a document
    pub fn classify(&self, title: &str, content: &str) -> LawDomain {
        let mut best: Option<(LawDomain, u32)> = None;
        for (domain, score) in self.scores(title, content) {
            // Tables are in priority order, so only a strictly higher score replaces
            if score > 0 && best.is_none_or(|(_, top)| score > top) {
                best = Some((domain, score));
            }
        }
        best.map_or(LawDomain::DEFAULT, |(domain, _)| domain)
    }
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new(&GatekeeperConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labor_case() {
        let classifier = DomainClassifier::default();
        let domain = classifier.classify(
            "张三诉某公司劳动争议案",
            "争议焦点：是否存在劳动关系。上海市浦东新区人民法院判决用人单位支付工资。",
        );
        assert_eq!(domain, LawDomain::Labor);
    }

    #[test]
    fn test_zero_score_defaults_to_civil() {
        let classifier = DomainClassifier::default();
        assert_eq!(classifier.classify("无标题", "没有任何关键词的文字"), LawDomain::Civil);
    }

    #[test]
    fn test_tie_breaks_by_priority() {
        let classifier = DomainClassifier::default();
        // 专利 (3) ties with 经营者 (3); intellectual property comes first
        assert_eq!(classifier.classify("", "专利 经营者"), LawDomain::IntellectualProperty);
        // 劳动 (1) ties with 合同 (1); labor comes first
        assert_eq!(classifier.classify("", "劳动 合同"), LawDomain::Labor);
    }

    #[test]
    fn test_criminal() {
        let classifier = DomainClassifier::default();
        let domain = classifier.classify("中华人民共和国刑法", "第一条 为了惩罚犯罪，保护人民，制定本法。");
        assert_eq!(domain, LawDomain::Criminal);
    }

    #[test]
    fn test_window_limits_scored_text() {
        let config = GatekeeperConfig {
            classify_window_chars: 10,
            ..Default::default()
        };
        let classifier = DomainClassifier::new(&config);
        let content = format!("{}著作权", "无".repeat(20));
        assert_eq!(classifier.classify("标题", &content), LawDomain::DEFAULT);
    }

    #[test]
    fn test_scores_in_priority_order() {
        let scores = DomainClassifier::default().scores("", "");
        let domains: Vec<_> = scores.iter().map(|(d, _)| *d).collect();
        assert_eq!(domains, LawDomain::PRIORITY.to_vec());
        assert!(scores.iter().all(|(_, s)| *s == 0));
    }
}
