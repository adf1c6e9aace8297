//! Puzzle library access
//!
//! The library lives under a single LocalStorage key as a JSON object.
//! Loading never fails: missing storage, a missing key or a value that is not
//! a JSON object all give an empty mapping. Bad entries are skipped singly.

use std::collections::{BTreeMap, HashMap};

use crate::error::StoreError;
use crate::puzzle::{PuzzleMapping, PuzzleRecord, is_iso_date};
use crate::theme::ThemeRegistry;

/// Minimal read access to a string key-value store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value under `key`
    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }
}

/// Parse a stored library.
///
/// Only the outer object must be well-formed. Entries whose key is not an
/// ISO date, or whose record does not fit [`PuzzleRecord`], are dropped one
/// at a time so a bad entry never hides the others.
pub fn parse_mapping(json: &str) -> Result<PuzzleMapping, StoreError> {
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
    let mut mapping = PuzzleMapping::new();
    for (date, value) in raw {
        if !is_iso_date(&date) {
            log::warn!("Ignoring puzzle with invalid date key {:?}", date);
            continue;
        }
        match serde_json::from_value::<PuzzleRecord>(value) {
            Ok(record) => {
                mapping.insert(date, record);
            }
            Err(e) => log::warn!("Ignoring malformed puzzle for {}: {}", date, e),
        }
    }
    Ok(mapping)
}

/// Load the puzzle library stored under `key`, or an empty one.
pub fn load_mapping(store: &impl KeyValueStore, key: &str) -> PuzzleMapping {
    let json = match store.get_item(key) {
        Ok(Some(json)) => json,
        Ok(None) => {
            log::info!("No puzzles stored under {:?}", key);
            return PuzzleMapping::new();
        }
        Err(e) => {
            log::warn!("Could not read puzzles: {}", e);
            return PuzzleMapping::new();
        }
    };

    match parse_mapping(&json) {
        Ok(mapping) => {
            log::info!("Loaded {} puzzles", mapping.len());
            mapping
        }
        Err(e) => {
            log::warn!("Could not parse puzzles: {}", e);
            PuzzleMapping::new()
        }
    }
}

/// Built-in themes plus any the page stored under `key`.
///
/// Stored themes replace built-ins of the same name. Missing or unreadable
/// data leaves just the built-ins.
pub fn load_themes(store: &impl KeyValueStore, key: &str) -> ThemeRegistry {
    let mut registry = ThemeRegistry::builtin();
    match store.get_item(key) {
        Ok(Some(json)) => match ThemeRegistry::from_json(&json) {
            Ok(stored) => {
                log::info!("Loaded {} stored themes", stored.len());
                registry.extend(stored);
            }
            Err(e) => log::warn!("Could not parse stored themes: {}", e),
        },
        Ok(None) => {}
        Err(e) => log::warn!("Could not read stored themes: {}", e),
    }
    registry
}

/// Store that always fails, for exercising the soft-fail path
#[cfg(test)]
pub(crate) struct BrokenStore;

#[cfg(test)]
impl KeyValueStore for BrokenStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("no localStorage".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "puzzles";

    fn store_with(json: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set_item(KEY, json);
        store
    }

    #[test]
    fn test_load_valid_mapping() {
        let store = store_with(
            r#"{"2024-01-03": {"theme": "film-noir"}, "2024-01-01": {}}"#,
        );
        let mapping = load_mapping(&store, KEY);
        let dates: Vec<&str> = mapping.keys().map(String::as_str).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-03"]);
        assert_eq!(mapping["2024-01-03"].theme.as_deref(), Some("film-noir"));
    }

    #[test]
    fn test_missing_key_is_empty() {
        let mapping = load_mapping(&MemoryStore::new(), KEY);
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_unparseable_is_empty() {
        assert!(load_mapping(&store_with("not json"), KEY).is_empty());
        assert!(load_mapping(&store_with("[1, 2, 3]"), KEY).is_empty());
    }

    #[test]
    fn test_unavailable_storage_is_empty() {
        assert!(load_mapping(&BrokenStore, KEY).is_empty());
    }

    #[test]
    fn test_parse_reports_bad_json() {
        assert!(matches!(
            parse_mapping("{"),
            Err(StoreError::Unparseable(_))
        ));
    }

    #[test]
    fn test_malformed_record_dropped_alone() {
        let store = store_with(
            r#"{
                "2024-01-01": {"missingLink": "ONE"},
                "2099-01-01": {"clues": [{"id": 1, "text": "t", "solution": "s"}]},
                "2024-01-02": "not a record"
            }"#,
        );
        let mapping = load_mapping(&store, KEY);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["2024-01-01"].missing_link.as_deref(), Some("ONE"));

        let s = crate::select::select_puzzle(&mapping, "2024-01-02").unwrap();
        assert_eq!(s.date, "2024-01-01");
    }

    #[test]
    fn test_stored_themes_extend_builtin() {
        let mut store = MemoryStore::new();
        store.set_item(
            "themes",
            r##"{"ocean": {"--clr-bg": "#003366"}, "mondrian": {"--clr-bg": "#EEEEEE"}}"##,
        );
        let registry = load_themes(&store, "themes");
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("ocean").unwrap().properties["--clr-bg"], "#003366");
        assert_eq!(registry.get("mondrian").unwrap().properties.len(), 1);
        assert!(registry.get("film-noir").is_some());
    }

    #[test]
    fn test_bad_stored_themes_keep_builtin() {
        let mut store = MemoryStore::new();
        store.set_item("themes", "{oops");
        assert_eq!(load_themes(&store, "themes").len(), 3);
        assert_eq!(load_themes(&MemoryStore::new(), "themes").len(), 3);
        assert_eq!(load_themes(&BrokenStore, "themes").len(), 3);
    }

    #[test]
    fn test_invalid_date_keys_dropped() {
        let mapping = parse_mapping(
            r#"{"2024-01-01": {}, "2024-1-2": {}, "someday": {}, "2024-02-30": {}, " 2024-1-01": {}}"#,
        )
        .unwrap();
        assert_eq!(mapping.len(), 1);
        assert!(mapping.contains_key("2024-01-01"));
    }
}
