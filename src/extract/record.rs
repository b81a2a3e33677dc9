//! Finalized records: position, heading weight and a stable identifier

use super::content_hash;
use super::hierarchy::HeadingHierarchy;
use super::walker::RawRecord;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Key of the caller-facing identifier, never part of its own hash
pub const OBJECT_ID_KEY: &str = "objectID";

/// Ranking signals left to the search index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomRanking {
    /// Zero-based rank among emitted records
    pub position: usize,
    /// Weight from the innermost heading in scope (100 when none)
    pub heading: u32,
}

/// An indexable record extracted from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Content-derived identifier
    #[serde(rename = "objectID")]
    pub object_id: String,
    /// Trimmed outer markup of the node
    pub html: String,
    /// Text content of the node
    pub content: String,
    /// Lowercased tag name
    pub tag_name: String,
    /// Heading texts in scope, outermost first
    pub headings: Vec<String>,
    /// Heading texts by level
    pub hierarchy: HeadingHierarchy,
    /// Deep-link target in scope
    pub anchor: Option<String>,
    pub custom_ranking: CustomRanking,
}

impl Record {
    /// Finalize a raw record at its position in the output
    pub fn from_raw(position: usize, raw: RawRecord<'_>) -> Self {
        let custom_ranking = CustomRanking {
            position,
            heading: raw.hierarchy.weight(),
        };

        let identity = json!({
            "content": raw.content,
            "html": raw.html,
            "tag_name": raw.tag_name,
            "hierarchy": raw.hierarchy,
            "anchor": raw.anchor,
            "position": position,
        });

        Self {
            object_id: stable_id(&identity),
            headings: raw.hierarchy.headings(),
            html: raw.html,
            content: raw.content,
            tag_name: raw.tag_name,
            hierarchy: raw.hierarchy,
            anchor: raw.anchor,
            custom_ranking,
        }
    }

    pub fn position(&self) -> usize {
        self.custom_ranking.position
    }

    pub fn weight(&self) -> u32 {
        self.custom_ranking.heading
    }
}

/// Attach position, weight and identifier to every raw record, keeping order
pub fn finalize(raw: Vec<RawRecord<'_>>) -> Vec<Record> {
    raw.into_iter()
        .enumerate()
        .map(|(position, raw)| Record::from_raw(position, raw))
        .collect()
}

/// Hash of the canonical JSON form of a value, ignoring a top-level `objectID`
///
/// Object keys serialize sorted, so equal values always hash equally.
pub fn stable_id(value: &Value) -> String {
    match value {
        Value::Object(map) if map.contains_key(OBJECT_ID_KEY) => {
            let mut map = map.clone();
            map.remove(OBJECT_ID_KEY);
            content_hash(&Value::Object(map).to_string())
        }
        other => content_hash(&other.to_string()),
    }
}
