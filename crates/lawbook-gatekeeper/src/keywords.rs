//! Versioned keyword tables for classification and routing

use lawbook_domain::LawDomain;

/// Version of the classifier and router tables, reported by each reconciliation pass
pub const KEYWORD_TABLE_VERSION: u32 = 2;

/// Weight of a high-precision keyword hit
pub const HIGH_PRECISION_WEIGHT: u32 = 3;

/// Weight of a generic keyword hit
pub const GENERIC_WEIGHT: u32 = 1;

/// Keyword tiers owned by one domain
#[derive(Debug, Clone, Copy)]
pub struct DomainKeywords {
    /// Domain scored by this table
    pub domain: LawDomain,
    /// Terms that almost only occur in this domain
    pub high_precision: &'static [&'static str],
    /// Terms that lean towards this domain
    pub generic: &'static [&'static str],
}

/// Keyword tables in tie-break priority order
pub const DOMAIN_KEYWORDS: [DomainKeywords; 7] = [
    DomainKeywords {
        domain: LawDomain::Labor,
        high_precision: &["劳动争议", "劳动合同", "用人单位", "劳动者", "加班费", "劳动仲裁", "劳动关系"],
        generic: &["劳动", "加班", "工资", "工伤", "解除合同", "社会保险"],
    },
    DomainKeywords {
        domain: LawDomain::Civil,
        high_precision: &["合同纠纷", "离婚", "继承", "侵权", "物权", "人格权"],
        generic: &["合同", "买卖", "租赁", "赔偿", "财产", "房屋", "债务", "婚姻", "家庭"],
    },
    DomainKeywords {
        domain: LawDomain::Criminal,
        high_precision: &["故意伤害", "诈骗罪", "盗窃罪", "犯罪", "刑事"],
        generic: &["故意", "伤害", "诈骗", "盗窃", "刑罚", "罪"],
    },
    DomainKeywords {
        domain: LawDomain::Administrative,
        high_precision: &["行政协议", "行政决定", "行政处罚", "行政许可", "行政机关"],
        generic: &["行政", "政府", "处罚", "许可", "复议"],
    },
    DomainKeywords {
        domain: LawDomain::IntellectualProperty,
        high_precision: &["专利", "商标", "著作权", "知识产权"],
        generic: &["版权", "发明", "商业秘密"],
    },
    DomainKeywords {
        domain: LawDomain::ConsumerProtection,
        high_precision: &["消费者权益", "食品安全", "经营者", "消费者"],
        generic: &["消费", "购物", "商品", "食品"],
    },
    DomainKeywords {
        domain: LawDomain::Procedural,
        high_precision: &["民事诉讼", "刑事诉讼", "行政诉讼", "诉讼程序", "管辖权"],
        generic: &["诉讼", "审判", "执行", "证据", "上诉", "再审"],
    },
];

/// Canonical jurisdiction preamble opening national statute titles
pub const JURISDICTION_PREAMBLE: &str = "中华人民共和国";

/// Title endings of regulation names
pub const STATUTE_SUFFIXES: &[&str] = &[
    "法", "条例", "规定", "办法", "解释", "规则", "细则", "决定", "通知", "批复", "决议",
];

/// Authoring-body phrases found in regulation titles
pub const AUTHORING_PHRASES: &[&str] = &["关于"];

/// Case-suffix token
pub const CASE_SUFFIX: &str = "案";

/// Litigant-connector token
pub const LITIGANT_CONNECTOR: &str = "诉";

/// Procedural statutes whose names contain 诉
pub const PROCEDURAL_INSTRUMENTS: &[&str] = &["诉讼法", "仲裁法", "调解法", "组织法"];

/// Explicit case-type keywords in titles
pub const CASE_TYPE_KEYWORDS: &[&str] = &["案例", "判例", "判决书", "裁判书"];

/// Tokens typical of case narratives
pub const CASE_FEATURE_TOKENS: &[&str] = &[
    "审理法院", "判决日期", "案由", "争议点", "判决结果", "原告", "被告", "上诉人", "被上诉人",
    "一审", "二审", "再审",
];
