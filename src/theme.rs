//! Visual themes
//!
//! A puzzle names its theme with a plain identifier. Two kinds exist:
//! - identifiers ending in `-theme` switch a class on the page body
//!   (the stylesheet does the rest)
//! - anything else is looked up in the [`ThemeRegistry`] and applied as CSS
//!   custom properties, optionally with a custom final animation

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Theme used when a puzzle names none
pub const DEFAULT_THEME: &str = "default";

/// Suffix marking a class-switched theme
pub const PAGE_CLASS_SUFFIX: &str = "-theme";

/// How a theme identifier is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeRef {
    /// Toggle this class on the page body
    PageClass(String),
    /// Inject the registry entry with this name
    Registry(String),
}

impl ThemeRef {
    pub fn parse(name: &str) -> Self {
        if name.ends_with(PAGE_CLASS_SUFFIX) {
            ThemeRef::PageClass(name.to_string())
        } else {
            ThemeRef::Registry(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ThemeRef::PageClass(name) | ThemeRef::Registry(name) => name,
        }
    }
}

/// Celebration animation played when the final phase is solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalAnimation {
    Confetti,
    Bounce,
}

impl FinalAnimation {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalAnimation::Confetti => "confetti",
            FinalAnimation::Bounce => "bounce",
        }
    }

    /// Stylesheet replacing the default `.final-celebration` animation
    pub fn keyframes(&self) -> &'static str {
        match self {
            FinalAnimation::Confetti => {
                "@keyframes confetti {\n\
                 0% { transform: translateY(0) rotate(0deg); opacity: 1; }\n\
                 100% { transform: translateY(100px) rotate(720deg); opacity: 0; }\n\
                 }\n\
                 .final-celebration { animation: confetti 2s ease-out infinite; }\n"
            }
            FinalAnimation::Bounce => {
                "@keyframes bounce {\n\
                 0%, 20%, 50%, 80%, 100% { transform: translateY(0); }\n\
                 40% { transform: translateY(-20px); }\n\
                 60% { transform: translateY(-10px); }\n\
                 }\n\
                 .final-celebration { animation: bounce 1s infinite; }\n"
            }
        }
    }
}

impl FromStr for FinalAnimation {
    type Err = UnknownAnimation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confetti" => Ok(FinalAnimation::Confetti),
            "bounce" => Ok(FinalAnimation::Bounce),
            _ => Err(UnknownAnimation(s.to_string())),
        }
    }
}

/// Animation name with no keyframes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown final animation {0:?}")]
pub struct UnknownAnimation(pub String);

/// A registry theme: CSS custom properties plus an optional animation.
///
/// Deserializes from the flat page format, e.g.
/// `{"--clr-bg": "#121212", "finalAnimation": "bounce"}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Theme {
    /// Animation name; unknown names keep the default animation
    #[serde(
        rename = "finalAnimation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub final_animation: Option<String>,
    /// `--custom-property` -> value
    #[serde(flatten)]
    pub properties: BTreeMap<String, String>,
}

impl Theme {
    /// Build a theme from `(property, value)` pairs
    pub fn with_properties(properties: &[(&str, &str)]) -> Self {
        Self {
            final_animation: None,
            properties: properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn animation(&self) -> Option<FinalAnimation> {
        self.final_animation.as_deref()?.parse().ok()
    }
}

/// Named themes available for CSS-property injection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Themes shipped with the page
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(DEFAULT_THEME, Theme::default());
        registry.insert(
            "mondrian",
            Theme::with_properties(&[
                ("--clr-bg", "#FFFFFF"),
                ("--clr-text-default", "#000000"),
                ("--clr-primary", "#FF0000"),
                ("--clr-box-bg-back", "#FFFF00"),
                ("--clr-box-bg-final", "#0000FF"),
            ]),
        );
        registry.insert(
            "film-noir",
            Theme::with_properties(&[
                ("--clr-bg", "#121212"),
                ("--clr-text-default", "#FFFFFF"),
                ("--clr-primary", "#8E8E8E"),
            ]),
        );
        registry
    }

    /// Parse a registry from JSON (`{"name": {"--prop": "value", ...}}`)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, name: impl Into<String>, theme: Theme) {
        self.themes.insert(name.into(), theme);
    }

    /// Add every theme from `other`, replacing same-named entries
    pub fn extend(&mut self, other: ThemeRegistry) {
        self.themes.extend(other.themes);
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
