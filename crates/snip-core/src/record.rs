use crate::shortcode::ShortCode;
use serde::{Deserialize, Serialize};

/// A stored URL record.
///
/// Records are created once, at the first submission of a URL, and are never
/// mutated or deleted afterwards. The serialized field names are the on-disk
/// format of the durable log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Monotonic id assigned at insertion.
    #[serde(rename = "uuid")]
    pub id: u64,
    /// The short code, unique across the index.
    #[serde(rename = "short_url")]
    pub code: ShortCode,
    /// The original URL that was shortened.
    pub original_url: String,
}

/// Whether a record made it into the durable log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Durability {
    /// The record was appended to the log and survives a restart.
    Persisted,
    /// The log append failed; the record lives only until the process exits.
    Volatile,
}

impl Durability {
    pub fn is_persisted(self) -> bool {
        matches!(self, Durability::Persisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_log_field_names() {
        let record = UrlRecord {
            id: 1,
            code: ShortCode::new_unchecked("lhLnJ1"),
            original_url: "http://ya.ru".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"uuid":1,"short_url":"lhLnJ1","original_url":"http://ya.ru"}"#
        );

        let parsed: UrlRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
