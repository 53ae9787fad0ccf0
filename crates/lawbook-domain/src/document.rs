//! Raw input documents

/// An unparsed legal document as read from disk
///
/// Ephemeral: consumed by the segmenter and field extractors, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Document title (heading line or caller-supplied identifier)
    pub title: String,

    /// Full document text, heading included
    pub body_text: String,
}

impl RawDocument {
    /// Create a document with an explicit title
    pub fn new(title: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body_text: body_text.into(),
        }
    }

    /// Build a document from markdown text
    ///
    /// The title is taken from the first `# <title>` line. When the text has
    /// no such heading, `fallback_id` (usually the file stem) is used.
    ///
    /// # Examples
    ///
    /// ```
    /// use lawbook_domain::RawDocument;
    ///
    /// let doc = RawDocument::from_markdown("file-stem", "# 中华人民共和国劳动法\n\n第一条 为了保护劳动者的合法权益");
    /// assert_eq!(doc.title, "中华人民共和国劳动法");
    ///
    /// let doc = RawDocument::from_markdown("file-stem", "no heading here");
    /// assert_eq!(doc.title, "file-stem");
    /// ```
    pub fn from_markdown(fallback_id: &str, text: &str) -> Self {
        let title = heading_title(text).unwrap_or_else(|| fallback_id.trim().to_string());
        Self {
            title,
            body_text: text.to_string(),
        }
    }
}

/// First level-one heading in `text`, if any
fn heading_title(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let rest = line.strip_prefix('#')?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let title = rest.trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_skips_deeper_levels() {
        let doc = RawDocument::from_markdown("stem", "## 第一章 总则\n# 真正的标题\n正文");
        assert_eq!(doc.title, "真正的标题");
    }

    #[test]
    fn test_empty_heading_falls_back() {
        let doc = RawDocument::from_markdown("stem", "#   \n正文");
        assert_eq!(doc.title, "stem");
    }

    #[test]
    fn test_hash_without_space_is_not_heading() {
        let doc = RawDocument::from_markdown("stem", "#标签\n正文");
        assert_eq!(doc.title, "stem");
    }
}
