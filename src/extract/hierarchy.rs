//! Heading hierarchy tracked while walking a document
//!
//! The hierarchy holds one optional heading text per level (h1..h6). Setting a
//! level always clears every deeper level, so a snapshot only ever reflects
//! headings that still enclose the current position.

use serde::{Deserialize, Serialize};

/// Number of heading levels (h1..h6)
pub const LEVELS: usize = 6;

/// Heading level of an HTML heading element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
    H4 = 4,
    H5 = 5,
    H6 = 6,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; LEVELS] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    /// Parse a tag name such as `h3` or `H3`
    pub fn from_tag_name(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 || !bytes[0].eq_ignore_ascii_case(&b'h') {
            return None;
        }
        match bytes[1] {
            b'1'..=b'6' => Some(Self::ALL[(bytes[1] - b'1') as usize]),
            _ => None,
        }
    }

    /// Zero-based level index: h1 is 0, h6 is 5
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Ranking weight of a record whose innermost heading is at this level
    pub fn weight(self) -> u32 {
        90 - 10 * self.index() as u32
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "h{}", *self as u8)
    }
}

/// Weight of a record with no heading in scope
pub const NO_HEADING_WEIGHT: u32 = 100;

/// Live heading state, one optional text per level
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LevelMap", into = "LevelMap")]
pub struct HeadingHierarchy {
    levels: [Option<String>; LEVELS],
}

impl HeadingHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a level and clear every deeper one
    pub fn set(&mut self, level: HeadingLevel, text: impl Into<String>) {
        let index = level.index();
        self.levels[index] = Some(text.into());
        for deeper in &mut self.levels[index + 1..] {
            *deeper = None;
        }
    }

    pub fn get(&self, level: HeadingLevel) -> Option<&str> {
        self.levels[level.index()].as_deref()
    }

    /// Innermost level currently set
    pub fn deepest_level(&self) -> Option<HeadingLevel> {
        HeadingLevel::ALL
            .into_iter()
            .rev()
            .find(|level| self.levels[level.index()].is_some())
    }

    /// Ranking weight derived from the innermost heading in scope
    pub fn weight(&self) -> u32 {
        self.deepest_level()
            .map_or(NO_HEADING_WEIGHT, HeadingLevel::weight)
    }

    /// Heading texts that are set, outermost first, without gaps
    pub fn headings(&self) -> Vec<String> {
        self.levels.iter().flatten().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(Option::is_none)
    }
}

/// Map form of the hierarchy, `lvl0` being h1
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LevelMap {
    #[serde(default)]
    lvl0: Option<String>,
    #[serde(default)]
    lvl1: Option<String>,
    #[serde(default)]
    lvl2: Option<String>,
    #[serde(default)]
    lvl3: Option<String>,
    #[serde(default)]
    lvl4: Option<String>,
    #[serde(default)]
    lvl5: Option<String>,
}

impl From<LevelMap> for HeadingHierarchy {
    fn from(map: LevelMap) -> Self {
        // Gaps are kept as-is.
        Self {
            levels: [map.lvl0, map.lvl1, map.lvl2, map.lvl3, map.lvl4, map.lvl5],
        }
    }
}

impl From<HeadingHierarchy> for LevelMap {
    fn from(hierarchy: HeadingHierarchy) -> Self {
        let [lvl0, lvl1, lvl2, lvl3, lvl4, lvl5] = hierarchy.levels;
        Self {
            lvl0,
            lvl1,
            lvl2,
            lvl3,
            lvl4,
            lvl5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_tag_name() {
        assert_eq!(HeadingLevel::from_tag_name("h1"), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_tag_name("H6"), Some(HeadingLevel::H6));
        assert_eq!(HeadingLevel::from_tag_name("h7"), None);
        assert_eq!(HeadingLevel::from_tag_name("h10"), None);
        assert_eq!(HeadingLevel::from_tag_name("hr"), None);
        assert_eq!(HeadingLevel::from_tag_name("p"), None);
    }

    #[test]
    fn test_weight_scale() {
        let weights: Vec<u32> = HeadingLevel::ALL.iter().map(|l| l.weight()).collect();
        assert_eq!(weights, vec![90, 80, 70, 60, 50, 40]);
        assert_eq!(HeadingHierarchy::new().weight(), 100);
    }

    #[test]
    fn test_set_clears_deeper_levels() {
        let mut hierarchy = HeadingHierarchy::new();
        hierarchy.set(HeadingLevel::H1, "Foo");
        hierarchy.set(HeadingLevel::H2, "Bar");
        hierarchy.set(HeadingLevel::H3, "Baz");
        hierarchy.set(HeadingLevel::H2, "Qux");

        assert_eq!(hierarchy.get(HeadingLevel::H1), Some("Foo"));
        assert_eq!(hierarchy.get(HeadingLevel::H2), Some("Qux"));
        assert_eq!(hierarchy.get(HeadingLevel::H3), None);
        assert_eq!(hierarchy.deepest_level(), Some(HeadingLevel::H2));
    }

    #[test]
    fn test_deepest_level_with_gap() {
        let mut hierarchy = HeadingHierarchy::new();
        hierarchy.set(HeadingLevel::H1, "Top");
        hierarchy.set(HeadingLevel::H4, "Deep");

        assert_eq!(hierarchy.deepest_level(), Some(HeadingLevel::H4));
        assert_eq!(hierarchy.weight(), 60);
        assert_eq!(hierarchy.headings(), vec!["Top", "Deep"]);
    }

    #[test]
    fn test_serializes_as_level_map() {
        let mut hierarchy = HeadingHierarchy::new();
        hierarchy.set(HeadingLevel::H1, "Foo");
        hierarchy.set(HeadingLevel::H3, "Baz");

        let json = serde_json::to_value(&hierarchy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "lvl0": "Foo",
                "lvl1": null,
                "lvl2": "Baz",
                "lvl3": null,
                "lvl4": null,
                "lvl5": null
            })
        );

        let back: HeadingHierarchy = serde_json::from_value(json).unwrap();
        assert_eq!(back, hierarchy);
    }
}
