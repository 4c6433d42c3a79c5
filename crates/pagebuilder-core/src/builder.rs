//! The builder: store, drag controller, storage and configuration wired
//! together behind one event-driven API.

use crate::config::BuilderConfig;
use crate::drag::{DragController, DragOutcome, DragSettings, DragSource, DropTarget, MoveOutcome};
use crate::element::{Element, ElementId};
use crate::export::ExportArtifact;
use crate::shortcuts::{Command, Modifiers, ShortcutRegistry};
use crate::snap::snap_point;
use crate::storage::{MemoryStorage, Storage};
use crate::store::{Store, StoreError};
use kurbo::Point;

/// Editor session.
///
/// All mutation goes through the owned [`Store`]; callers render from
/// [`Builder::store`] after each event.
pub struct Builder {
    config: BuilderConfig,
    store: Store,
    drag: DragController,
    storage: Box<dyn Storage>,
}

impl Builder {
    pub fn new(config: BuilderConfig, storage: Box<dyn Storage>) -> Self {
        let drag = DragController::new(DragSettings {
            grid_size: config.grid_size,
            activation_distance: config.activation_distance,
            default_size: config.default_size(),
        });
        Self {
            store: Store::with_history_limit(config.history_limit),
            config,
            drag,
            storage,
        }
    }

    /// Builder with default config and in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(BuilderConfig::default(), Box::new(MemoryStorage::new()))
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    // --- Pointer events ---

    pub fn pointer_down(&mut self, source: DragSource, pointer: Point) {
        self.drag.pointer_down(source, pointer);
    }

    pub fn pointer_move(&mut self, pointer: Point) -> MoveOutcome {
        self.drag.pointer_move(pointer, &mut self.store)
    }

    /// Finish the current gesture. A press released without dragging
    /// selects the pressed element.
    pub fn pointer_up(&mut self, pointer: Point, target: DropTarget) -> Result<DragOutcome, StoreError> {
        let outcome = self.drag.pointer_up(pointer, target, &mut self.store)?;
        if let DragOutcome::Click(DragSource::Element { id } | DragSource::Resize { id }) = &outcome {
            if self.store.get(id).is_some() {
                self.store.select(Some(id.clone()));
            }
        }
        Ok(outcome)
    }

    /// Click on empty canvas.
    pub fn click_canvas(&mut self) {
        self.store.select(None);
    }

    // --- Keyboard ---

    /// Handle a key press. Returns the command that ran, if any.
    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) -> Result<Option<Command>, StoreError> {
        let Some(command) = ShortcutRegistry::command_for(key, modifiers) else {
            return Ok(None);
        };
        log::debug!("Key {} -> {:?}", key, command);
        self.run(command)?;
        Ok(Some(command))
    }

    /// Run an editor command.
    pub fn run(&mut self, command: Command) -> Result<(), StoreError> {
        match command {
            Command::DeleteSelected => {
                // Ignored while a drag is in progress.
                if !self.drag.is_dragging() {
                    self.store.remove_selected();
                }
            }
            Command::CancelDrag => {
                self.drag.cancel(&mut self.store);
            }
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::Save => self.save()?,
        }
        Ok(())
    }

    // --- Direct edits ---

    /// Add an element of type `tag` at the snapped `position`, as a palette
    /// drop would.
    pub fn add_element(&mut self, tag: &str, position: Point) -> Result<ElementId, StoreError> {
        let position = snap_point(position, self.config.grid_size).point;
        let element = Element::from_palette(ElementId::generate(), tag, position, self.config.default_size());
        let id = element.id.clone();
        self.store.add(element)?;
        Ok(id)
    }

    /// Step back in history. Ignored while a drag is in progress.
    pub fn undo(&mut self) -> bool {
        if self.drag.is_dragging() {
            log::debug!("Undo ignored during drag");
            return false;
        }
        self.store.undo()
    }

    /// Step forward in history. Ignored while a drag is in progress.
    pub fn redo(&mut self) -> bool {
        if self.drag.is_dragging() {
            log::debug!("Redo ignored during drag");
            return false;
        }
        self.store.redo()
    }

    // --- Persistence ---

    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save_project(self.storage.as_ref(), &self.config.storage_key)
    }

    /// Load the saved project, if there is one. Returns whether a project
    /// was loaded.
    pub fn restore(&mut self) -> Result<bool, StoreError> {
        if !self.storage.exists(&self.config.storage_key)? {
            log::info!("No saved project under {}", self.config.storage_key);
            return Ok(false);
        }
        self.drag.cancel(&mut self.store);
        self.store
            .restore_project(self.storage.as_ref(), &self.config.storage_key)?;
        Ok(true)
    }

    pub fn export(&self) -> ExportArtifact {
        self.store.export_code(&self.config.export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    #[test]
    fn test_click_selects_and_delete_removes() {
        let mut builder = Builder::in_memory();
        let id = builder.add_element("button", Point::new(41.0, 59.0)).unwrap();
        assert_eq!(builder.store().get(&id).unwrap().position(), Point::new(40.0, 60.0));

        builder.pointer_down(DragSource::Element { id: id.clone() }, Point::new(50.0, 70.0));
        let outcome = builder.pointer_up(Point::new(51.0, 70.0), DropTarget::Canvas).unwrap();
        assert!(matches!(outcome, DragOutcome::Click(_)));
        assert_eq!(builder.store().selection(), Some(&id));

        let command = builder.key_down("Delete", Modifiers::NONE).unwrap();
        assert_eq!(command, Some(Command::DeleteSelected));
        assert!(builder.store().document().is_empty());
        assert_eq!(builder.store().selection(), None);
    }

    #[test]
    fn test_escape_cancels_drag() {
        let mut builder = Builder::in_memory();
        let id = builder.add_element("button", Point::ZERO).unwrap();
        builder.pointer_down(DragSource::Element { id: id.clone() }, Point::new(10.0, 10.0));
        builder.pointer_move(Point::new(90.0, 10.0));
        assert_eq!(builder.store().get(&id).unwrap().position(), Point::new(80.0, 0.0));

        builder.key_down("Escape", Modifiers::NONE).unwrap();
        assert!(!builder.drag().is_active());
        assert_eq!(builder.store().get(&id).unwrap().position(), Point::ZERO);
    }

    #[test]
    fn test_undo_redo_keys() {
        let mut builder = Builder::in_memory();
        builder.add_element("text", Point::ZERO).unwrap();
        builder.key_down("z", Modifiers::ctrl()).unwrap();
        assert!(builder.store().document().is_empty());
        builder.key_down("y", Modifiers::ctrl()).unwrap();
        assert_eq!(builder.store().document().len(), 1);
    }

    #[test]
    fn test_undo_redo_ignored_during_drag() {
        let mut builder = Builder::in_memory();
        let id = builder.add_element("button", Point::ZERO).unwrap();
        builder.pointer_down(DragSource::Element { id: id.clone() }, Point::new(10.0, 10.0));
        builder.pointer_move(Point::new(90.0, 10.0));
        let history = builder.store().history_len();

        builder.key_down("z", Modifiers::ctrl()).unwrap();
        assert!(!builder.undo());
        assert!(!builder.redo());
        assert_eq!(builder.store().get(&id).unwrap().position(), Point::new(80.0, 0.0));
        assert_eq!(builder.store().history_len(), history);

        builder.key_down("Escape", Modifiers::NONE).unwrap();
        assert_eq!(builder.store().get(&id).unwrap().position(), Point::ZERO);
        assert!(builder.store().can_undo());
        assert!(!builder.store().can_redo());

        assert!(builder.undo());
        assert!(builder.store().get(&id).is_some());
        assert!(builder.store().can_redo());
    }

    #[test]
    fn test_save_and_restore() {
        let mut builder = Builder::in_memory();
        assert!(!builder.restore().unwrap());

        builder.add_element("image", Point::new(100.0, 100.0)).unwrap();
        builder.key_down("s", Modifiers::ctrl()).unwrap();
        assert!(builder.storage().exists("builder_project").unwrap());

        builder.add_element("button", Point::new(400.0, 400.0)).unwrap();
        assert!(builder.restore().unwrap());
        assert_eq!(builder.store().document().len(), 1);
        assert!(!builder.store().can_undo());
    }

    #[test]
    fn test_config_drives_defaults() {
        let config = BuilderConfig {
            grid_size: 10.0,
            default_width: 50.0,
            default_height: 50.0,
            ..BuilderConfig::default()
        };
        let mut builder = Builder::new(config, Box::new(MemoryStorage::new()));
        let id = builder.add_element("shape", Point::new(14.0, 16.0)).unwrap();
        let element = builder.store().get(&id).unwrap();
        assert_eq!(element.position(), Point::new(10.0, 20.0));
        assert_eq!(element.size(Size::ZERO), Size::new(50.0, 50.0));
    }

    #[test]
    fn test_export_uses_config() {
        let mut builder = Builder::in_memory();
        builder.add_element("button", Point::ZERO).unwrap();
        let artifact = builder.export();
        assert_eq!(artifact.file_name, "ExportedComponent.tsx");
        assert!(artifact.contents.contains("<button"));
    }
}
