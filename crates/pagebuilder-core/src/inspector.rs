//! Property panel edits.
//!
//! The store only merges top-level element fields, so every edit here reads
//! the current element, merges the one nested value itself and commits the
//! result as a single update. Edits that would not change anything are
//! skipped and record no history.

use crate::element::{ElementId, ElementUpdate, StyleValue};
use crate::store::Store;

/// Set one style property on an element.
///
/// An empty text value clears the property, matching a cleared form field.
/// Returns `true` if the element changed.
pub fn set_style(store: &mut Store, id: &ElementId, property: &str, value: impl Into<StyleValue>) -> bool {
    let value = value.into();
    if value.as_str().is_some_and(str::is_empty) {
        return clear_style(store, id, property);
    }
    let Some(element) = store.get(id) else {
        return false;
    };
    if element.style.get(property) == Some(&value) {
        return false;
    }
    let mut style = element.style.clone();
    style.set(property, value);
    log::debug!("Set style {} on {}", property, id);
    store.update(id, ElementUpdate::new().style(style))
}

/// Remove one style property from an element.
pub fn clear_style(store: &mut Store, id: &ElementId, property: &str) -> bool {
    let Some(element) = store.get(id) else {
        return false;
    };
    if !element.style.contains(property) {
        return false;
    }
    let mut style = element.style.clone();
    style.remove(property);
    store.update(id, ElementUpdate::new().style(style))
}

/// Replace the text content of a text-bearing element.
///
/// Returns `false` for kinds without text (images, inputs, ...).
pub fn set_text(store: &mut Store, id: &ElementId, text: &str) -> bool {
    let Some(element) = store.get(id) else {
        return false;
    };
    if element.kind.text_content() == Some(text) {
        return false;
    }
    let mut kind = element.kind.clone();
    if !kind.set_text_content(text) {
        log::warn!("Element {} ({}) has no text content", id, element.tag());
        return false;
    }
    store.update(id, ElementUpdate::new().kind(kind))
}

/// Set or clear (`None` or empty) the class name of an element.
pub fn set_class_name(store: &mut Store, id: &ElementId, class_name: Option<&str>) -> bool {
    let class_name = class_name.filter(|name| !name.is_empty()).map(str::to_string);
    let changed = store
        .get(id)
        .is_some_and(|element| element.class_name != class_name);
    changed && store.update(id, ElementUpdate::new().class_name(class_name))
}
