//! The document store: live document, selection and undo history.

use crate::document::Document;
use crate::element::{Element, ElementId, ElementUpdate};
use crate::export::{ExportArtifact, ExportOptions, export_document};
use crate::history::History;
use crate::storage::{Storage, StorageError};
use std::collections::HashSet;
use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Element id already in use: {0}")]
    DuplicateId(ElementId),
    #[error("Invalid project data: {0}")]
    InvalidProject(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Authoritative editor state.
///
/// Every mutation (`add`, `update`, `remove`, ...) replaces the live
/// document and records exactly one snapshot. Selection is a separate
/// pointer and is never part of history.
#[derive(Debug, Clone, Default)]
pub struct Store {
    document: Document,
    selection: Option<ElementId>,
    history: History,
}

impl Store {
    /// Create an empty store with a one-entry history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store keeping at most `limit` history snapshots.
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            history: History::default().with_limit(limit),
            ..Self::default()
        }
    }

    /// The live document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Top-level elements of the live document.
    pub fn elements(&self) -> &[Element] {
        self.document.elements()
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.document.get(id)
    }

    /// Id of the selected element.
    pub fn selection(&self) -> Option<&ElementId> {
        self.selection.as_ref()
    }

    /// The selected element, read from the live document.
    pub fn selected(&self) -> Option<&Element> {
        self.selection.as_ref().and_then(|id| self.document.get(id))
    }

    /// Append an element at the top level.
    ///
    /// Rejects the element if any id in its subtree is already in the
    /// document or repeats within the subtree.
    pub fn add(&mut self, element: Element) -> Result<(), StoreError> {
        let duplicate = {
            let mut seen = HashSet::new();
            let mut duplicate = None;
            element.walk(&mut |e| {
                if duplicate.is_none() && (!seen.insert(&e.id) || self.document.contains(&e.id)) {
                    duplicate = Some(e.id.clone());
                }
            });
            duplicate
        };
        if let Some(id) = duplicate {
            log::warn!("Rejected element with duplicate id {}", id);
            return Err(StoreError::DuplicateId(id));
        }

        log::debug!("Adding {} element {}", element.tag(), element.id);
        self.document.push(element);
        self.commit();
        Ok(())
    }

    /// Shallow-merge `update` into the element with `id`.
    ///
    /// Returns `false` (and records nothing) if no element has that id or
    /// the update would leave two elements with the same id.
    pub fn update(&mut self, id: &ElementId, update: ElementUpdate) -> bool {
        self.update_with(id, |element| update.apply_to(element))
    }

    /// Edit the element with `id`, recording one snapshot.
    ///
    /// The edit runs on a copy of the document and is discarded if it
    /// leaves a duplicate id anywhere in the tree. Returns `false` (and
    /// records nothing) in that case or if no element has that id.
    pub fn update_with(&mut self, id: &ElementId, edit: impl FnOnce(&mut Element)) -> bool {
        let mut document = self.document.clone();
        let Some(element) = document.get_mut(id) else {
            log::debug!("Update of unknown element {} ignored", id);
            return false;
        };
        edit(element);
        if let Some(duplicate) = document.first_duplicate_id() {
            log::warn!("Update of {} rejected: duplicate id {}", id, duplicate);
            return false;
        }

        self.document = document;
        self.drop_stale_selection();
        self.commit();
        true
    }

    /// Remove the element with `id` (and its children).
    ///
    /// Clears the selection if it pointed into the removed subtree. Returns
    /// `false` (and records nothing) if no element has that id.
    pub fn remove(&mut self, id: &ElementId) -> bool {
        if self.document.remove(id).is_none() {
            log::debug!("Removal of unknown element {} ignored", id);
            return false;
        }
        log::debug!("Removed element {}", id);
        self.drop_stale_selection();
        self.commit();
        true
    }

    /// Remove the selected element, if any.
    pub fn remove_selected(&mut self) -> bool {
        match self.selection.clone() {
            Some(id) => self.remove(&id),
            None => false,
        }
    }

    /// Replace the selection pointer. Does not touch history.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selection = id;
    }

    /// Step back one snapshot. Clears the selection.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                self.selection = None;
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Clears the selection.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                self.selection = None;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of history snapshots.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Position of the history cursor.
    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    /// Serialize the live document under `key`, overwriting any prior save.
    pub fn save_project(&self, storage: &dyn Storage, key: &str) -> Result<(), StoreError> {
        let json = self.document.to_json()?;
        storage.set(key, &json)?;
        log::info!("Saved project ({} elements) under {}", self.document.len(), key);
        Ok(())
    }

    /// Replace the document with `elements` and restart history from it.
    ///
    /// The prior history and selection are discarded. The elements are
    /// trusted as given; use [`Store::load_project_json`] for unvalidated
    /// input.
    pub fn load_project(&mut self, elements: Vec<Element>) {
        self.document = Document::from_elements(elements);
        self.history.reset(self.document.clone());
        self.selection = None;
        log::info!("Loaded project with {} elements", self.document.len());
    }

    /// Parse, validate and load a persisted project.
    ///
    /// On error the store is left untouched.
    pub fn load_project_json(&mut self, json: &str) -> Result<(), StoreError> {
        let document = Document::from_json(json)?;
        if let Some(id) = document.first_duplicate_id() {
            return Err(StoreError::DuplicateId(id));
        }
        self.load_project(document.into_elements());
        Ok(())
    }

    /// Load the project saved under `key`.
    pub fn restore_project(&mut self, storage: &dyn Storage, key: &str) -> Result<(), StoreError> {
        let json = storage.get(key)?;
        self.load_project_json(&json)
    }

    /// Render the live document as code. Pure read.
    pub fn export_code(&self, options: &ExportOptions) -> ExportArtifact {
        let artifact = export_document(&self.document, options);
        log::info!("Exported {} ({} bytes)", artifact.file_name, artifact.contents.len());
        artifact
    }

    fn drop_stale_selection(&mut self) {
        if self
            .selection
            .as_ref()
            .is_some_and(|selected| !self.document.contains(selected))
        {
            self.selection = None;
        }
    }

    fn commit(&mut self) {
        self.history.record(self.document.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, Style};
    use crate::storage::MemoryStorage;

    fn button(id: &str) -> Element {
        Element::new(ElementId::from(id), ElementKind::from_tag("button"))
            .with_style(Style::new().with("left", "0px").with("top", "0px"))
    }

    fn id(s: &str) -> ElementId {
        ElementId::from(s)
    }

    #[test]
    fn test_initial_state() {
        let store = Store::new();
        assert!(store.document().is_empty());
        assert_eq!(store.history_len(), 1);
        assert_eq!(store.history_index(), 0);
        assert!(store.selection().is_none());
    }

    #[test]
    fn test_add_undo_redo() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        assert_eq!(store.elements().len(), 1);
        assert_eq!(store.history_len(), 2);

        assert!(store.undo());
        assert!(store.document().is_empty());

        assert!(store.redo());
        assert_eq!(store.elements(), &[button("a")]);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        let result = store.add(button("a"));
        assert!(matches!(result, Err(StoreError::DuplicateId(_))));
        assert_eq!(store.elements().len(), 1);
        assert_eq!(store.history_len(), 2);
    }

    #[test]
    fn test_add_duplicate_nested_rejected() {
        let mut store = Store::new();
        store
            .add(Element::new(id("box"), ElementKind::Container).with_children(vec![button("inner")]))
            .unwrap();
        let result = store.add(button("inner"));
        assert!(matches!(result, Err(StoreError::DuplicateId(d)) if d == id("inner")));
    }

    #[test]
    fn test_add_repeated_id_within_subtree_rejected() {
        let mut store = Store::new();
        let container = Element::new(id("x"), ElementKind::Container).with_children(vec![button("x")]);
        let result = store.add(container);
        assert!(matches!(result, Err(StoreError::DuplicateId(d)) if d == id("x")));
        assert!(store.document().is_empty());
        assert_eq!(store.history_len(), 1);
    }

    #[test]
    fn test_update_children_with_existing_id_rejected() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        store.add(Element::new(id("box"), ElementKind::Container)).unwrap();
        let before = store.document().clone();
        let history = store.history_len();

        let ok = store.update(&id("box"), ElementUpdate::new().children(vec![button("a")]));
        assert!(!ok);
        assert_eq!(store.document(), &before);
        assert_eq!(store.document().first_duplicate_id(), None);
        assert_eq!(store.history_len(), history);

        assert!(store.update(&id("box"), ElementUpdate::new().children(vec![button("b")])));
        assert!(store.get(&id("b")).is_some());
    }

    #[test]
    fn test_rename_onto_existing_id_rejected() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        store.add(button("b")).unwrap();
        let history = store.history_len();

        assert!(!store.update_with(&id("b"), |e| e.id = id("a")));
        assert!(store.get(&id("b")).is_some());
        assert_eq!(store.history_len(), history);
    }

    #[test]
    fn test_update_shallow_merge() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();

        let updated = store.update(
            &id("a"),
            ElementUpdate::new().style(Style::new().with("left", "40px")),
        );
        assert!(updated);
        let element = store.get(&id("a")).unwrap();
        assert_eq!(element.style.px("left"), Some(40.0));
        assert_eq!(element.style.px("top"), None);
        assert_eq!(store.history_len(), 3);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        let before = store.document().clone();

        assert!(!store.update(&id("zzz"), ElementUpdate::new().class_name(Some("x".into()))));
        assert_eq!(store.document(), &before);
        assert_eq!(store.history_len(), 2);
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        store.add(button("b")).unwrap();
        store.select(Some(id("a")));

        assert!(store.remove(&id("b")));
        assert_eq!(store.selection(), Some(&id("a")));

        assert!(store.remove(&id("a")));
        assert!(store.selection().is_none());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        assert!(!store.remove(&id("zzz")));
        assert_eq!(store.history_len(), 2);
    }

    #[test]
    fn test_add_then_remove_restores_document() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        let before = store.document().clone();

        store.add(button("b")).unwrap();
        store.remove(&id("b"));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_select_does_not_touch_history() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        store.select(Some(id("a")));
        assert_eq!(store.selected().map(|e| &e.id), Some(&id("a")));
        assert_eq!(store.history_len(), 2);
        store.select(None);
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_undo_clears_selection() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        store.add(button("b")).unwrap();
        store.select(Some(id("a")));
        store.undo();
        assert!(store.selection().is_none());
    }

    #[test]
    fn test_new_mutation_truncates_redo() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        store.add(button("b")).unwrap();
        store.undo();
        store.add(button("c")).unwrap();

        assert!(!store.can_redo());
        assert!(!store.redo());
        let ids: Vec<&str> = store.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_undo_redo_at_ends_are_noops() {
        let mut store = Store::new();
        assert!(!store.undo());
        store.add(button("a")).unwrap();
        assert!(!store.redo());
        assert_eq!(store.history_index(), 1);
    }

    #[test]
    fn test_load_project_resets_history() {
        let mut store = Store::new();
        store.add(button("old")).unwrap();
        store.select(Some(id("old")));

        store.load_project(vec![button("a"), button("b"), button("c")]);
        assert_eq!(store.elements().len(), 3);
        assert_eq!(store.history_len(), 1);
        assert_eq!(store.history_index(), 0);
        assert!(store.selection().is_none());

        assert!(!store.undo());
        assert_eq!(store.elements().len(), 3);
    }

    #[test]
    fn test_load_project_json_validates() {
        let mut store = Store::new();
        store.add(button("keep")).unwrap();

        let bad_shape = store.load_project_json(r#"{"not": "an array"}"#);
        assert!(matches!(bad_shape, Err(StoreError::InvalidProject(_))));

        let dup = store.load_project_json(
            r#"[{"id":"x","type":"text","props":{"style":{}}},{"id":"x","type":"button","props":{"style":{}}}]"#,
        );
        assert!(matches!(dup, Err(StoreError::DuplicateId(_))));

        assert_eq!(store.elements(), &[button("keep")]);
        assert_eq!(store.history_len(), 2);
    }

    #[test]
    fn test_save_and_restore_project() {
        let storage = MemoryStorage::new();
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        store.save_project(&storage, "builder_project").unwrap();

        let mut restored = Store::new();
        restored.restore_project(&storage, "builder_project").unwrap();
        assert_eq!(restored.document(), store.document());
        assert_eq!(restored.history_len(), 1);
    }

    #[test]
    fn test_restore_missing_project() {
        let storage = MemoryStorage::new();
        let mut store = Store::new();
        let result = store.restore_project(&storage, "builder_project");
        assert!(matches!(result, Err(StoreError::Storage(StorageError::NotFound(_)))));
    }

    #[test]
    fn test_export_is_pure() {
        let mut store = Store::new();
        store.add(button("a")).unwrap();
        let len = store.history_len();
        let artifact = store.export_code(&ExportOptions::default());
        assert!(artifact.contents.contains("<button"));
        assert_eq!(store.history_len(), len);
    }

    #[test]
    fn test_history_limit() {
        let mut store = Store::with_history_limit(Some(2));
        store.add(button("a")).unwrap();
        store.add(button("b")).unwrap();
        assert_eq!(store.history_len(), 2);
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.elements(), &[button("a")]);
    }
}
