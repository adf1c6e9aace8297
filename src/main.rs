//! Daily Link entry point
//!
//! On the web this runs once at module start: load today's puzzle, style the
//! page and publish the render state as `window.gameData`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use daily_link::loader::{LoaderConfig, load_todays_puzzle};
    use daily_link::present::Presenter;
    use daily_link::select::today_iso;
    use daily_link::store::{KeyValueStore, load_themes};
    use daily_link::web::{DomSurface, LocalStorage, MissingStorage, publish_render_state};

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        match LocalStorage::open() {
            Ok(store) => load_page(&store),
            Err(e) => load_page(&MissingStorage(e.to_string())),
        }
    }

    fn load_page(store: &impl KeyValueStore) {
        let config = LoaderConfig::default();
        let presenter = Presenter::new(load_themes(store, &config.themes_key))
            .with_default_theme(config.default_theme.clone());
        let Some(mut surface) = DomSurface::new() else {
            log::error!("No document available");
            return;
        };

        // The loader has already logged why nothing was loaded
        let Ok(state) = load_todays_puzzle(&config, store, &presenter, &mut surface, &today_iso())
        else {
            return;
        };

        match publish_render_state(&state) {
            Ok(()) => log::info!("Puzzle for {} ready", state.date),
            Err(e) => log::error!("Could not publish game data: {:?}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Logs what the page would be styled with
#[cfg(not(target_arch = "wasm32"))]
struct LogSurface;

#[cfg(not(target_arch = "wasm32"))]
impl daily_link::present::ThemeSurface for LogSurface {
    fn clear_page_classes(&mut self) {}

    fn add_page_class(&mut self, class: &str) {
        log::info!("body class: {}", class);
    }

    fn set_property(&mut self, name: &str, value: &str) {
        log::info!("style: {}: {}", name, value);
    }

    fn install_animation(&mut self, css: &str) {
        log::info!("animation:\n{}", css);
    }
}

/// Load a puzzle library from `DAILY_LINK_PUZZLES` (a JSON file), extra
/// themes from `DAILY_LINK_THEMES`, for `DAILY_LINK_TODAY` (default: today)
/// and print the render state.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use daily_link::loader::{LoaderConfig, load_todays_puzzle};
    use daily_link::present::Presenter;
    use daily_link::select::today_iso;
    use daily_link::store::{MemoryStore, load_themes};

    env_logger::init();
    log::info!("Daily Link (native) starting...");

    let config = LoaderConfig::default();
    let mut store = MemoryStore::new();
    match std::env::var("DAILY_LINK_PUZZLES") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => store.set_item(config.storage_key.clone(), json),
            Err(e) => log::warn!("Could not read {}: {}", path, e),
        },
        Err(_) => log::info!("DAILY_LINK_PUZZLES not set, starting with no puzzles"),
    }
    if let Ok(path) = std::env::var("DAILY_LINK_THEMES") {
        match std::fs::read_to_string(&path) {
            Ok(json) => store.set_item(config.themes_key.clone(), json),
            Err(e) => log::warn!("Could not read {}: {}", path, e),
        }
    }
    let today = std::env::var("DAILY_LINK_TODAY").unwrap_or_else(|_| today_iso());

    let presenter = Presenter::new(load_themes(&store, &config.themes_key))
        .with_default_theme(config.default_theme.clone());
    let Ok(state) = load_todays_puzzle(&config, &store, &presenter, &mut LogSurface, &today)
    else {
        std::process::exit(1);
    };

    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize render state: {}", e),
    }
}
