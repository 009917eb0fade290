//! Descriptive hexagram content from an external collaborator.
//!
//! Content is optional. A missing record is a normal outcome and readings
//! fall back to the catalog's built-in name and glyph.

use std::collections::BTreeMap;

use bagua_core::HexagramNumber;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OracleResult;

/// Free-text description of one hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexagramRecord {
    /// Hexagram number.
    pub number: HexagramNumber,
    /// Display name.
    pub name: String,
    /// The central perspective.
    #[serde(default)]
    pub core_viewpoint: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Related thinking tools.
    #[serde(default)]
    pub mental_models: Option<String>,
    /// Search keywords. A single string is accepted as a one-item list.
    #[serde(default, deserialize_with = "keyword_list")]
    pub keywords: Vec<String>,
}

impl HexagramRecord {
    /// Whether any text field contains `needle` (case-insensitive).
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        let hit = |text: &str| text.to_lowercase().contains(&needle);
        hit(&self.name)
            || self.core_viewpoint.as_deref().is_some_and(hit)
            || self.summary.as_deref().is_some_and(hit)
            || self.mental_models.as_deref().is_some_and(hit)
            || self.keywords.iter().any(|k| hit(k))
    }
}

fn keyword_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Keywords {
        List(Vec<String>),
        One(String),
    }

    Ok(match Keywords::deserialize(deserializer)? {
        Keywords::List(list) => list,
        Keywords::One(one) => vec![one],
    })
}

/// Looks up content by hexagram number.
pub trait ContentSource {
    /// The record for a hexagram, if the source has one.
    fn record(&self, number: HexagramNumber) -> Option<HexagramRecord>;
}

impl<T: ContentSource + ?Sized> ContentSource for &T {
    fn record(&self, number: HexagramNumber) -> Option<HexagramRecord> {
        (**self).record(number)
    }
}

/// A source with no content at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ContentSource for NoContent {
    fn record(&self, _number: HexagramNumber) -> Option<HexagramRecord> {
        None
    }
}

/// In-memory content keyed by hexagram number.
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    records: BTreeMap<HexagramNumber, HexagramRecord>,
}

impl ContentLibrary {
    /// Build a library; a later record for the same number replaces an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = HexagramRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.number, r)).collect(),
        }
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> OracleResult<Self> {
        let records: Vec<HexagramRecord> = serde_json::from_str(json)?;
        tracing::debug!(records = records.len(), "loaded content library");
        Ok(Self::from_records(records))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records mentioning a keyword in any text field, in numeric order.
    pub fn search(&self, keyword: &str) -> Vec<&HexagramRecord> {
        self.records.values().filter(|r| r.mentions(keyword)).collect()
    }
}

impl ContentSource for ContentLibrary {
    fn record(&self, number: HexagramNumber) -> Option<HexagramRecord> {
        self.records.get(&number).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OracleError;

    const SAMPLE: &str = r#"[
        {
            "number": 1,
            "name": "Qian",
            "coreViewpoint": "Initiative",
            "summary": "Creative force in motion.",
            "mentalModels": "First principles",
            "keywords": ["strength", "leadership"]
        },
        { "number": 2, "name": "Kun", "keywords": "receptivity" }
    ]"#;

    fn n(value: u8) -> HexagramNumber {
        HexagramNumber::new(value).unwrap()
    }

    #[test]
    fn loads_camel_case_records() {
        let library = ContentLibrary::from_json(SAMPLE).unwrap();
        assert_eq!(library.len(), 2);

        let qian = library.record(n(1)).unwrap();
        assert_eq!(qian.core_viewpoint.as_deref(), Some("Initiative"));
        assert_eq!(qian.keywords, vec!["strength", "leadership"]);

        let kun = library.record(n(2)).unwrap();
        assert_eq!(kun.summary, None);
        assert_eq!(kun.keywords, vec!["receptivity"]);
    }

    #[test]
    fn missing_record_is_none() {
        let library = ContentLibrary::from_json(SAMPLE).unwrap();
        assert_eq!(library.record(n(3)), None);
        assert_eq!(NoContent.record(n(1)), None);
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            ContentLibrary::from_json("{"),
            Err(OracleError::Content(_))
        ));
        assert!(ContentLibrary::from_json(r#"[{"number": 65, "name": "x"}]"#).is_err());
    }

    #[test]
    fn search_matches_any_field() {
        let library = ContentLibrary::from_json(SAMPLE).unwrap();
        let numbers = |kw: &str| -> Vec<u8> {
            library.search(kw).iter().map(|r| r.number.get()).collect()
        };
        assert_eq!(numbers("LEADER"), vec![1]);
        assert_eq!(numbers("principles"), vec![1]);
        assert_eq!(numbers("recept"), vec![2]);
        assert!(numbers("").is_empty());
        assert!(numbers("water").is_empty());
    }
}
