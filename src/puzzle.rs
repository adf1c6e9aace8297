//! Puzzle records and the date-indexed mapping they are stored in
//!
//! The page persists the whole library as one JSON object keyed by ISO date
//! (`YYYY-MM-DD`). Field names follow the page's camelCase convention.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format of every mapping key
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A primary clue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub id: String,
    pub text: String,
    pub solution: String,
    #[serde(default)]
    pub solved: bool,
}

/// A secondary clue placed on the phase 2 grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase2Clue {
    pub id: String,
    /// Grid position, stored by the page as either an index or `{row, col}`
    #[serde(default)]
    pub grid_pos: serde_json::Value,
    pub text: String,
    pub solution: String,
    #[serde(default)]
    pub solved: bool,
}

/// Everything needed to render one day's puzzle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleRecord {
    /// Theme identifier; `None` means the default theme
    #[serde(default)]
    pub theme: Option<String>,
    /// The connecting answer shared by the clues
    #[serde(default)]
    pub missing_link: Option<String>,
    /// Emoji describing where the clues come from (film, book, ...)
    #[serde(default)]
    pub source_type_emoji: Option<String>,
    #[serde(default)]
    pub phase3_solution: Option<String>,
    #[serde(default)]
    pub phase3_clue: Option<String>,
    #[serde(default)]
    pub clues: Vec<Clue>,
    #[serde(default)]
    pub phase2_clues: Vec<Phase2Clue>,
}

/// Date string -> puzzle record.
///
/// Keys are kept sorted; since they are fixed-width ISO dates, key order is
/// chronological order.
pub type PuzzleMapping = BTreeMap<String, PuzzleRecord>;

/// Check that `s` is a real calendar date in `YYYY-MM-DD` form.
///
/// The shape is checked byte by byte before chrono sees it: chrono accepts
/// padding, signs and unpadded fields (`2024-1-5`), any of which would break
/// lexicographic ordering.
pub fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
        && NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_iso_date() {
        assert!(is_iso_date("2024-01-01"));
        assert!(is_iso_date("2024-02-29"));
        assert!(!is_iso_date("2023-02-29"));
        assert!(!is_iso_date("2024-1-5"));
        assert!(!is_iso_date("2024-13-01"));
        assert!(!is_iso_date("tomorrow"));
        assert!(!is_iso_date(""));
        assert!(!is_iso_date(" 2024-1-01"));
        assert!(!is_iso_date("+999-01-01"));
        assert!(!is_iso_date("-999-01-01"));
        assert!(!is_iso_date("2024/01/01"));
    }

    #[test]
    fn test_record_from_page_json() {
        let json = r#"{
            "theme": "mondrian",
            "missingLink": "BRIDGE",
            "sourceTypeEmoji": "🎬",
            "phase3Solution": "LONDON",
            "phase3Clue": "Falling down",
            "clues": [
                {"id": "c1", "text": "Golden Gate", "solution": "BRIDGE", "solved": true}
            ],
            "phase2Clues": [
                {"id": "p1", "gridPos": {"row": 0, "col": 1}, "text": "Tower", "solution": "LONDON"}
            ]
        }"#;
        let record: PuzzleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.theme.as_deref(), Some("mondrian"));
        assert_eq!(record.missing_link.as_deref(), Some("BRIDGE"));
        assert_eq!(record.phase3_clue.as_deref(), Some("Falling down"));
        assert_eq!(record.clues.len(), 1);
        assert!(record.clues[0].solved);
        assert!(!record.phase2_clues[0].solved);
        assert_eq!(record.phase2_clues[0].grid_pos["col"], 1);
    }

    #[test]
    fn test_sparse_record_uses_defaults() {
        let record: PuzzleRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, PuzzleRecord::default());
        assert!(record.theme.is_none());
        assert!(record.clues.is_empty());
    }
}
