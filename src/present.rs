//! Turning a selected puzzle into render state and page styling
//!
//! [`Presenter::apply`] builds a fresh [`RenderState`] for the load; nothing
//! is shared with earlier loads. Styling goes through a [`ThemeSurface`] so
//! the same logic drives the browser DOM and the test recorder.

use serde::Serialize;

use crate::puzzle::{Clue, Phase2Clue, PuzzleRecord};
use crate::theme::{DEFAULT_THEME, ThemeRef, ThemeRegistry};

/// Page styling operations needed to apply a theme
pub trait ThemeSurface {
    /// Remove every class from the page body
    fn clear_page_classes(&mut self);
    fn add_page_class(&mut self, class: &str);
    /// Set a CSS custom property on the root element
    fn set_property(&mut self, name: &str, value: &str);
    /// Replace the custom animation stylesheet, if any, with `css`
    fn install_animation(&mut self, css: &str);
}

/// Per-load state handed to the game
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    /// Date of the puzzle being shown
    pub date: String,
    pub theme: String,
    pub missing_link: Option<String>,
    pub source_type_emoji: Option<String>,
    pub phase3_solution: Option<String>,
    pub phase3_clue: Option<String>,
    pub clues: Vec<Clue>,
    pub phase2_clues: Vec<Phase2Clue>,
}

impl RenderState {
    pub fn clue_by_id(&self, id: &str) -> Option<&Clue> {
        self.clues.iter().find(|c| c.id == id)
    }

    pub fn phase2_clue_by_id(&self, id: &str) -> Option<&Phase2Clue> {
        self.phase2_clues.iter().find(|c| c.id == id)
    }

    /// Fields written onto the page's game data object, keyed as the page
    /// scripts read them
    pub fn to_game_data(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(fields)) => fields,
            _ => serde_json::Map::new(),
        }
    }
}

/// Applies puzzles using a fixed theme registry
#[derive(Debug, Clone)]
pub struct Presenter {
    registry: ThemeRegistry,
    default_theme: String,
}

impl Presenter {
    pub fn new(registry: ThemeRegistry) -> Self {
        Self {
            registry,
            default_theme: DEFAULT_THEME.to_string(),
        }
    }

    /// Use `name` for puzzles that specify no theme
    pub fn with_default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = name.into();
        self
    }

    /// Copy `record` into fresh render state with every clue unsolved
    pub fn apply(&self, date: &str, record: &PuzzleRecord) -> RenderState {
        RenderState {
            date: date.to_string(),
            theme: record
                .theme
                .clone()
                .unwrap_or_else(|| self.default_theme.clone()),
            missing_link: record.missing_link.clone(),
            source_type_emoji: record.source_type_emoji.clone(),
            phase3_solution: record.phase3_solution.clone(),
            phase3_clue: record.phase3_clue.clone(),
            clues: record
                .clues
                .iter()
                .map(|c| Clue {
                    solved: false,
                    ..c.clone()
                })
                .collect(),
            phase2_clues: record
                .phase2_clues
                .iter()
                .map(|c| Phase2Clue {
                    solved: false,
                    ..c.clone()
                })
                .collect(),
        }
    }

    /// Style the page for theme `name`.
    ///
    /// Unknown registry themes leave the page on its default styling.
    pub fn apply_theme(&self, surface: &mut impl ThemeSurface, name: &str) {
        surface.clear_page_classes();

        let name = match ThemeRef::parse(name) {
            ThemeRef::PageClass(class) => {
                surface.add_page_class(&class);
                log::info!("Applied page theme {}", class);
                return;
            }
            ThemeRef::Registry(name) => name,
        };

        let Some(theme) = self.registry.get(&name) else {
            log::warn!("Theme {} not found, using default", name);
            return;
        };

        for (property, value) in &theme.properties {
            surface.set_property(property, value);
        }

        match (theme.final_animation.as_deref(), theme.animation()) {
            (_, Some(animation)) => surface.install_animation(animation.keyframes()),
            (Some(other), None) => {
                log::info!("Unknown final animation {}, keeping default", other)
            }
            (None, None) => {}
        }

        log::info!("Applied theme {}", name);
    }
}

/// Records surface operations for assertions
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub classes: Vec<String>,
    pub properties: Vec<(String, String)>,
    pub animation: Option<String>,
    pub clears: usize,
}

#[cfg(test)]
impl ThemeSurface for RecordingSurface {
    fn clear_page_classes(&mut self) {
        self.classes.clear();
        self.clears += 1;
    }

    fn add_page_class(&mut self, class: &str) {
        self.classes.push(class.to_string());
    }

    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.push((name.to_string(), value.to_string()));
    }

    fn install_animation(&mut self, css: &str) {
        self.animation = Some(css.to_string());
    }
}
