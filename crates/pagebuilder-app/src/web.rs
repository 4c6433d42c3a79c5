//! WebAssembly entry point and JavaScript bindings.

use kurbo::Point;
use pagebuilder_core::storage::{MemoryStorage, Storage, create_default_storage};
use pagebuilder_core::{
    Builder, BuilderConfig, DragOutcome, DragPayload, DragSource, DropTarget, ElementId, Modifiers,
    MoveOutcome,
};
use wasm_bindgen::prelude::*;

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialised: {}", e).into());
    }

    log::info!("Starting page builder (WASM)");
}

/// Builder session exposed to JavaScript. The page renders from
/// [`WebBuilder::project_json`] after each call.
#[wasm_bindgen]
pub struct WebBuilder {
    builder: Builder,
}

#[wasm_bindgen]
impl WebBuilder {
    /// Create a session backed by `localStorage`, restoring the saved
    /// project. `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WebBuilder, JsError> {
        let config = if config_json.trim().is_empty() {
            BuilderConfig::default()
        } else {
            BuilderConfig::from_json(config_json).map_err(js_error)?
        };
        let storage: Box<dyn Storage> = match create_default_storage() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("localStorage unavailable ({}); project will not persist", e);
                Box::new(MemoryStorage::new())
            }
        };
        let mut builder = Builder::new(config, storage);
        builder.restore().map_err(js_error)?;
        Ok(WebBuilder { builder })
    }

    /// The live document as a JSON array of elements.
    #[wasm_bindgen(js_name = projectJson)]
    pub fn project_json(&self) -> Result<String, JsError> {
        self.builder.store().document().to_json().map_err(js_error)
    }

    /// Selected element id, if any.
    pub fn selection(&self) -> Option<String> {
        self.builder.store().selection().map(|id| id.to_string())
    }

    pub fn select(&mut self, id: Option<String>) {
        match id {
            Some(id) => self.builder.store_mut().select(Some(ElementId::from(id))),
            None => self.builder.click_canvas(),
        }
    }

    /// Press on a draggable. `payload_json` is the draggable's data
    /// (`{"type": ...}` or `{"type": ..., "component": ...}`).
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, draggable_id: &str, payload_json: &str, x: f64, y: f64) -> Result<(), JsError> {
        let payload: DragPayload = serde_json::from_str(payload_json).map_err(js_error)?;
        let source = DragSource::from_draggable(draggable_id, &payload);
        self.builder.pointer_down(source, Point::new(x, y));
        Ok(())
    }

    /// Press on an element's resize handle.
    #[wasm_bindgen(js_name = resizeDown)]
    pub fn resize_down(&mut self, id: &str, x: f64, y: f64) {
        self.builder.pointer_down(
            DragSource::Resize {
                id: ElementId::from(id),
            },
            Point::new(x, y),
        );
    }

    /// Returns whether the document changed.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        matches!(self.builder.pointer_move(Point::new(x, y)), MoveOutcome::Committed(_))
    }

    /// Release the pointer. Returns the id of a newly created element.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64, over_canvas: bool) -> Result<Option<String>, JsError> {
        let target = if over_canvas {
            DropTarget::Canvas
        } else {
            DropTarget::Outside
        };
        match self.builder.pointer_up(Point::new(x, y), target).map_err(js_error)? {
            DragOutcome::Created(id) => Ok(Some(id.to_string())),
            _ => Ok(None),
        }
    }

    /// Handle a key press. Returns whether a shortcut ran.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Result<bool, JsError> {
        let modifiers = Modifiers {
            ctrl,
            shift,
            alt,
            meta,
        };
        let command = self.builder.key_down(key, modifiers).map_err(js_error)?;
        Ok(command.is_some())
    }

    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        pagebuilder_core::inspector::set_style(self.builder.store_mut(), &ElementId::from(id), property, value)
    }

    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        pagebuilder_core::inspector::set_text(self.builder.store_mut(), &ElementId::from(id), text)
    }

    pub fn undo(&mut self) -> bool {
        self.builder.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.builder.redo()
    }

    pub fn save(&self) -> Result<(), JsError> {
        self.builder.save().map_err(js_error)
    }

    /// Generated component source.
    #[wasm_bindgen(js_name = exportCode)]
    pub fn export_code(&self) -> String {
        self.builder.export().contents
    }
}
