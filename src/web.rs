//! Browser implementations of the storage and styling seams (WASM only)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::error::StoreError;
use crate::present::{RenderState, ThemeSurface};
use crate::store::KeyValueStore;

/// Id of the `<style>` element holding the custom final animation
const ANIMATION_STYLE_ID: &str = "custom-animations";

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .map(|storage| Self { storage })
            .ok_or_else(|| StoreError::Unavailable("localStorage not accessible".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

/// Storage that was not available at startup; reads report why
pub struct MissingStorage(pub String);

impl KeyValueStore for MissingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable(self.0.clone()))
    }
}

/// Styles `document.body` and `document.documentElement`
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn root(&self) -> Option<HtmlElement> {
        self.document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl ThemeSurface for DomSurface {
    fn clear_page_classes(&mut self) {
        if let Some(body) = self.document.body() {
            body.set_class_name("");
        }
    }

    fn add_page_class(&mut self, class: &str) {
        if let Some(body) = self.document.body() {
            let _ = body.class_list().add_1(class);
        }
    }

    fn set_property(&mut self, name: &str, value: &str) {
        if let Some(root) = self.root() {
            let _ = root.style().set_property(name, value);
        }
    }

    fn install_animation(&mut self, css: &str) {
        if let Some(existing) = self.document.get_element_by_id(ANIMATION_STYLE_ID) {
            existing.remove();
        }

        let Ok(style) = self.document.create_element("style") else {
            log::warn!("Could not create animation style element");
            return;
        };
        style.set_id(ANIMATION_STYLE_ID);
        style.set_text_content(Some(css));
        if let Some(head) = self.document.head() {
            let _ = head.append_child(&style);
        }
    }
}

/// Name of the page-owned render state object on `window`
const GAME_DATA: &str = "gameData";

/// Clue accessors installed on `gameData`. They read the object's own clue
/// arrays, so solved flags the page sets later are visible through them.
const CLUE_ACCESSORS: [(&str, &str); 2] = [
    ("getClueById", "return this.clues.find(clue => clue.id === id);"),
    (
        "getPhase2ClueById",
        "return this.phase2Clues.find(clue => clue.id === id);",
    ),
];

/// Write the render state into the page's `window.gameData`.
///
/// The existing object is updated in place (created if missing) so fields
/// the page owns survive the load.
pub fn publish_render_state(state: &RenderState) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let key = JsValue::from_str(GAME_DATA);

    let existing = js_sys::Reflect::get(&window, &key)?;
    let game_data: js_sys::Object = if existing.is_object() {
        existing.unchecked_into()
    } else {
        let created = js_sys::Object::new();
        js_sys::Reflect::set(&window, &key, &created)?;
        created
    };

    let json = serde_json::to_string(&state.to_game_data())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let fields: js_sys::Object = js_sys::JSON::parse(&json)?.unchecked_into();
    js_sys::Object::assign(&game_data, &fields);

    for (name, body) in CLUE_ACCESSORS {
        let accessor = js_sys::Function::new_with_args("id", body);
        js_sys::Reflect::set(&game_data, &JsValue::from_str(name), &accessor)?;
    }
    Ok(())
}
