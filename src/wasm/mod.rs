//! WASM bindings for the editor

use crate::render::RenderedBlock;
use crate::storage::{self, current_timestamp, LocalStore};
use crate::{ui, BlockKey, DocPosition, Editor, EditorConfig, KeyCommand, Selection};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Initialize panic hook and logger
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // a second init reports an already-installed logger; keep the first
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// How often the page timer polls the autosave deadline
const POLL_INTERVAL_MS: u64 = 1_000;

/// A `setInterval` registration, cleared when dropped
struct IntervalTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl IntervalTimer {
    fn start(interval_ms: u64, callback: Closure<dyn FnMut()>) -> Result<Self, JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
        let timeout = i32::try_from(interval_ms).unwrap_or(i32::MAX);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|e| JsError::new(&format!("setInterval failed: {:?}", e)))?;
        Ok(Self {
            handle,
            _callback: callback,
        })
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

/// WASM-exposed editor wrapper
///
/// Loads from `localStorage` on construction and saves on a repeating
/// timer until freed.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Rc<RefCell<Editor<LocalStore>>>,
    _autosave: IntervalTimer,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmEditor, JsError> {
        Self::create(EditorConfig::default())
    }

    /// Create an editor from a partial config object, e.g.
    /// `{ storageKey: "notes", autosaveIntervalMs: 10000 }`
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<WasmEditor, JsError> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        config.validate()?;
        Self::create(config)
    }

    fn create(config: EditorConfig) -> Result<WasmEditor, JsError> {
        let store = LocalStore::open()?;
        let poll_ms = config.autosave_interval_ms.min(POLL_INTERVAL_MS);
        let editor = Rc::new(RefCell::new(Editor::new(store, config)));

        let shared = Rc::clone(&editor);
        let callback = Closure::<dyn FnMut()>::new(move || match shared.try_borrow_mut() {
            Ok(mut editor) => {
                editor.tick(current_timestamp());
            }
            Err(_) => log::debug!("editor busy, skipping autosave tick"),
        });
        let autosave = IntervalTimer::start(poll_ms, callback)?;

        Ok(Self {
            editor,
            _autosave: autosave,
        })
    }

    /// Characters about to be inserted; returns true when a shortcut fired
    #[wasm_bindgen(js_name = handleInput)]
    pub fn handle_input(&mut self, chars: &str) -> bool {
        self.editor.borrow_mut().handle_input(chars).is_handled()
    }

    /// Enter key; returns true when a heading was ended
    #[wasm_bindgen(js_name = pressReturn)]
    pub fn press_return(&mut self) -> bool {
        self.editor.borrow_mut().press_return().is_handled()
    }

    /// Run a named key command such as `bold` or `backspace`
    #[wasm_bindgen(js_name = keyCommand)]
    pub fn key_command(&mut self, name: &str) -> bool {
        self.editor
            .borrow_mut()
            .key_command(&KeyCommand::from_name(name))
    }

    /// Set the selection by block key and character offset
    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(
        &mut self,
        anchor_key: &str,
        anchor_offset: usize,
        focus_key: &str,
        focus_offset: usize,
    ) {
        let selection = Selection::new(
            DocPosition::new(BlockKey::from(anchor_key), anchor_offset),
            DocPosition::new(BlockKey::from(focus_key), focus_offset),
        );
        self.editor.borrow_mut().set_selection(selection);
    }

    pub fn undo(&mut self) -> bool {
        self.editor.borrow_mut().undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.borrow_mut().redo()
    }

    /// Save now (the Save button)
    pub fn save(&mut self) -> Result<(), JsError> {
        self.editor.borrow_mut().save()?;
        Ok(())
    }

    /// Get full document text, blocks joined by newlines
    #[wasm_bindgen(js_name = getText)]
    pub fn get_text(&self) -> String {
        self.editor.borrow().content().plain_text()
    }

    /// Get render data (styled blocks, placeholder state)
    #[wasm_bindgen(js_name = getRenderData)]
    pub fn get_render_data(&self) -> JsValue {
        let editor = self.editor.borrow();
        let render_data = RenderData {
            version: editor.content().version(),
            blocks: editor.render(),
            show_placeholder: editor.show_placeholder(),
            placeholder: ui::PLACEHOLDER.to_string(),
        };
        to_js(&render_data)
    }

    /// Get cursor position info
    #[wasm_bindgen(js_name = getCursorInfo)]
    pub fn get_cursor_info(&self) -> JsValue {
        let editor = self.editor.borrow();
        let selection = editor.state().selection();
        let cursor_info = CursorInfo {
            key: selection.focus.key.to_string(),
            offset: selection.focus.offset,
            has_selection: !selection.is_collapsed(),
            styles: editor
                .state()
                .current_inline_style()
                .iter()
                .map(|s| s.tag().to_string())
                .collect(),
        };
        to_js(&cursor_info)
    }

    /// Get the document in its persisted raw form
    #[wasm_bindgen(js_name = getRawContent)]
    pub fn get_raw_content(&self) -> JsValue {
        to_js(&self.editor.borrow().raw_content())
    }

    /// Get the persisted JSON text
    #[wasm_bindgen(js_name = getRawJson)]
    pub fn get_raw_json(&self) -> Result<String, JsError> {
        Ok(storage::serialize(self.editor.borrow().content())?)
    }

    #[wasm_bindgen(js_name = showPlaceholder)]
    pub fn show_placeholder(&self) -> bool {
        self.editor.borrow().show_placeholder()
    }

    /// Title, labels and shortcut help text
    #[wasm_bindgen(js_name = uiStrings)]
    pub fn ui_strings() -> JsValue {
        let strings = UiStrings {
            title: ui::TITLE.to_string(),
            save_label: ui::SAVE_LABEL.to_string(),
            placeholder: ui::PLACEHOLDER.to_string(),
            help_items: ui::HELP_ITEMS.iter().map(|s| s.to_string()).collect(),
            help_footer: ui::HELP_FOOTER.to_string(),
        };
        to_js(&strings)
    }
}

impl Drop for WasmEditor {
    fn drop(&mut self) {
        if let Ok(mut editor) = self.editor.try_borrow_mut() {
            editor.unmount();
        }
    }
}

/// Plain objects rather than JS `Map`s for nested JSON maps
fn to_js<T: Serialize>(value: &T) -> JsValue {
    match value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(js) => js,
        Err(e) => {
            log::warn!("failed to convert to JS value: {}", e);
            JsValue::NULL
        }
    }
}

/// Serializable render data for JS
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData {
    pub version: u64,
    pub blocks: Vec<RenderedBlock>,
    pub show_placeholder: bool,
    pub placeholder: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorInfo {
    pub key: String,
    pub offset: usize,
    pub has_selection: bool,
    /// Style tags the next typed character gets
    pub styles: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiStrings {
    pub title: String,
    pub save_label: String,
    pub placeholder: String,
    pub help_items: Vec<String>,
    pub help_footer: String,
}
