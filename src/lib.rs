//! Daily Link - a daily "missing link" word puzzle
//!
//! Core modules:
//! - `puzzle`: Puzzle records and the date-indexed library
//! - `store`: Reading the library from key-value storage
//! - `select`: Choosing today's puzzle (or the latest earlier one)
//! - `theme`: Theme registry and final animations
//! - `present`: Render state and page styling
//! - `loader`: The page-load pipeline tying them together
//! - `web`: Browser storage/DOM bindings (WASM only)

pub mod error;
pub mod loader;
pub mod present;
pub mod puzzle;
pub mod select;
pub mod store;
pub mod theme;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{LoadError, StoreError};
pub use loader::{LoaderConfig, load_todays_puzzle};
pub use present::{Presenter, RenderState, ThemeSurface};
pub use puzzle::{Clue, Phase2Clue, PuzzleMapping, PuzzleRecord};
pub use select::{Selection, SelectionKind, select_puzzle};
pub use store::{KeyValueStore, MemoryStore, load_mapping, load_themes};
pub use theme::{FinalAnimation, Theme, ThemeRef, ThemeRegistry, UnknownAnimation};
