//! Run identifiers for import and reconciliation passes

use std::fmt;

/// Identifier of one import or reconciliation run, based on UUIDv7
///
/// UUIDv7 sorts chronologically, so log lines from consecutive runs order
/// naturally by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u128);

impl RunId {
    /// Generate a new UUIDv7-based RunId
    ///
    /// # Examples
    ///
    /// ```
    /// use lawbook_domain::RunId;
    ///
    /// let id = RunId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RunId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RunId from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid run id: {}", e))
    }

    /// Raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since Unix epoch encoded in the id
    pub fn timestamp(&self) -> u64 {
        (self.0 >> 80) as u64
    }

    /// First eight hex digits, for compact log lines
    pub fn short(&self) -> String {
        self.to_string()[..8].to_string()
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl serde::Serialize for RunId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_chronological() {
        let id1 = RunId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RunId::new();

        assert!(id1 < id2);
        assert!(id1.timestamp() <= id2.timestamp());
    }

    #[test]
    fn test_short_form() {
        let id = RunId::new();
        assert_eq!(id.short().len(), 8);
        assert!(id.to_string().starts_with(&id.short()));
    }

    #[test]
    fn test_invalid_string() {
        assert!(RunId::from_string("not-a-run").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Round-trip through string representation preserves the id
        #[test]
        fn test_run_id_string_roundtrip(value: u128) {
            let id = RunId::from_value(value);
            match RunId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
