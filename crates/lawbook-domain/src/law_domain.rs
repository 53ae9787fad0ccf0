//! Legal subject-matter categories

/// Stored label meaning "no domain has been assigned yet"
pub const UNCLASSIFIED_LABEL: &str = "其他";

/// Labels that reconciliation treats as unclassified and recomputes
pub const UNCLASSIFIED_LABELS: &[&str] = &["", UNCLASSIFIED_LABEL, "案例"];

/// Legal domain of a record
///
/// Records persist the Chinese label returned by [`LawDomain::as_str`].
/// Declaration order is the tie-break priority used by the classifier:
/// earlier variants win ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LawDomain {
    /// 劳动法
    Labor,

    /// 民法
    Civil,

    /// 刑法
    Criminal,

    /// 行政法
    Administrative,

    /// 知识产权法
    IntellectualProperty,

    /// 消费者权益保护法
    ConsumerProtection,

    /// 程序法
    Procedural,
}

impl LawDomain {
    /// All domains in tie-break priority order
    pub const PRIORITY: [LawDomain; 7] = [
        LawDomain::Labor,
        LawDomain::Civil,
        LawDomain::Criminal,
        LawDomain::Administrative,
        LawDomain::IntellectualProperty,
        LawDomain::ConsumerProtection,
        LawDomain::Procedural,
    ];

    /// Domain assigned when no keyword scores at all
    pub const DEFAULT: LawDomain = LawDomain::Civil;

    /// Persisted label
    pub fn as_str(&self) -> &'static str {
        match self {
            LawDomain::Labor => "劳动法",
            LawDomain::Civil => "民法",
            LawDomain::Criminal => "刑法",
            LawDomain::Administrative => "行政法",
            LawDomain::IntellectualProperty => "知识产权法",
            LawDomain::ConsumerProtection => "消费者权益保护法",
            LawDomain::Procedural => "程序法",
        }
    }

    /// Parse a persisted label
    pub fn parse(s: &str) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|d| d.as_str() == s.trim())
    }

    /// Whether a stored label should be recomputed by reconciliation
    ///
    /// # Examples
    ///
    /// ```
    /// use lawbook_domain::LawDomain;
    ///
    /// assert!(LawDomain::is_unclassified("其他"));
    /// assert!(LawDomain::is_unclassified(""));
    /// assert!(!LawDomain::is_unclassified("劳动法"));
    /// assert!(!LawDomain::is_unclassified("司法解释"));
    /// ```
    pub fn is_unclassified(label: &str) -> bool {
        UNCLASSIFIED_LABELS.contains(&label.trim())
    }
}

impl std::fmt::Display for LawDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LawDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown legal domain: {}", s))
    }
}
