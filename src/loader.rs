//! The page-load pipeline: storage read, selection, presentation

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::present::{Presenter, RenderState, ThemeSurface};
use crate::select::{SelectionKind, select_puzzle};
use crate::store::{KeyValueStore, load_mapping};
use crate::theme::DEFAULT_THEME;

/// Loader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Storage key holding the JSON puzzle library
    pub storage_key: String,
    /// Storage key holding extra page themes (JSON theme registry)
    pub themes_key: String,
    /// Theme for puzzles that name none
    pub default_theme: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            storage_key: "puzzles".to_string(),
            themes_key: "themes".to_string(),
            default_theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Load the puzzle for `today`, style the page and return its render state.
///
/// Storage problems degrade to an empty library; the only hard failure is
/// having no puzzle dated `today` or earlier.
pub fn load_todays_puzzle(
    config: &LoaderConfig,
    store: &impl KeyValueStore,
    presenter: &Presenter,
    surface: &mut impl ThemeSurface,
    today: &str,
) -> Result<RenderState, LoadError> {
    let mapping = load_mapping(store, &config.storage_key);

    let selection = match select_puzzle(&mapping, today) {
        Ok(selection) => selection,
        Err(e) => {
            log::error!("No suitable puzzle found! ({})", e);
            return Err(e);
        }
    };
    if selection.kind == SelectionKind::Fallback {
        log::info!(
            "No puzzle for today. Loading puzzle from {}",
            selection.date
        );
    }

    let state = presenter.apply(selection.date, selection.record);
    presenter.apply_theme(surface, &state.theme);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::RecordingSurface;
    use crate::store::{BrokenStore, MemoryStore};
    use crate::theme::ThemeRegistry;

    const LIBRARY: &str = r#"{
        "2024-01-01": {
            "theme": "film-noir",
            "missingLink": "ONE",
            "clues": [{"id": "c1", "text": "t", "solution": "ONE", "solved": true}]
        },
        "2024-01-03": {"theme": "spring-theme", "missingLink": "THREE"},
        "2024-02-01": {"missingLink": "FUTURE"}
    }"#;

    fn setup() -> (LoaderConfig, MemoryStore, Presenter) {
        let config = LoaderConfig::default();
        let mut store = MemoryStore::new();
        store.set_item(config.storage_key.clone(), LIBRARY);
        let presenter = Presenter::new(ThemeRegistry::builtin())
            .with_default_theme(config.default_theme.clone());
        (config, store, presenter)
    }

    #[test]
    fn test_fallback_load_applies_theme() {
        let (config, store, presenter) = setup();
        let mut surface = RecordingSurface::default();

        let state =
            load_todays_puzzle(&config, &store, &presenter, &mut surface, "2024-01-02").unwrap();
        assert_eq!(state.date, "2024-01-01");
        assert_eq!(state.missing_link.as_deref(), Some("ONE"));
        assert!(!state.clues[0].solved);
        assert_eq!(surface.properties.len(), 3);
    }

    #[test]
    fn test_exact_load_page_class() {
        let (config, store, presenter) = setup();
        let mut surface = RecordingSurface::default();

        let state =
            load_todays_puzzle(&config, &store, &presenter, &mut surface, "2024-01-03").unwrap();
        assert_eq!(state.missing_link.as_deref(), Some("THREE"));
        assert_eq!(surface.classes, ["spring-theme"]);
    }

    #[test]
    fn test_unthemed_puzzle_uses_default() {
        let (config, store, presenter) = setup();
        let mut surface = RecordingSurface::default();

        let state =
            load_todays_puzzle(&config, &store, &presenter, &mut surface, "2024-03-01").unwrap();
        assert_eq!(state.missing_link.as_deref(), Some("FUTURE"));
        assert_eq!(state.theme, DEFAULT_THEME);
        assert!(surface.properties.is_empty());
    }

    #[test]
    fn test_nothing_on_or_before_today() {
        let (config, store, presenter) = setup();
        let mut surface = RecordingSurface::default();

        let err = load_todays_puzzle(&config, &store, &presenter, &mut surface, "2023-12-31")
            .unwrap_err();
        assert_eq!(
            err,
            LoadError::NoPuzzleFound {
                today: "2023-12-31".to_string()
            }
        );
        assert_eq!(surface.clears, 0);
    }

    #[test]
    fn test_broken_storage_finds_nothing() {
        let (config, _, presenter) = setup();
        let mut surface = RecordingSurface::default();
        assert!(
            load_todays_puzzle(&config, &BrokenStore, &presenter, &mut surface, "2024-01-02")
                .is_err()
        );
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: LoaderConfig = serde_json::from_str(r#"{"storage_key": "daily"}"#).unwrap();
        assert_eq!(config.storage_key, "daily");
        assert_eq!(config.themes_key, "themes");
        assert_eq!(config.default_theme, DEFAULT_THEME);
    }
}
