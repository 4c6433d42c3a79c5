//! The page document: the ordered list of top-level elements.

use crate::element::{Element, ElementId};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered sequence of top-level elements.
///
/// Serializes as a plain JSON array of elements, which is also the
/// persisted project layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Top-level elements in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Append an element at the top level.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Find an element by id anywhere in the tree.
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        fn find<'a>(elements: &'a [Element], id: &ElementId) -> Option<&'a Element> {
            elements.iter().find_map(|e| {
                if &e.id == id {
                    Some(e)
                } else {
                    find(&e.children, id)
                }
            })
        }
        find(&self.elements, id)
    }

    /// Find an element by id anywhere in the tree, mutably.
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        fn find<'a>(elements: &'a mut [Element], id: &ElementId) -> Option<&'a mut Element> {
            for element in elements {
                if &element.id == id {
                    return Some(element);
                }
                if let Some(found) = find(&mut element.children, id) {
                    return Some(found);
                }
            }
            None
        }
        find(&mut self.elements, id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Remove an element (and its subtree) by id.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        fn remove_from(elements: &mut Vec<Element>, id: &ElementId) -> Option<Element> {
            if let Some(pos) = elements.iter().position(|e| &e.id == id) {
                return Some(elements.remove(pos));
            }
            elements
                .iter_mut()
                .find_map(|e| remove_from(&mut e.children, id))
        }
        remove_from(&mut self.elements, id)
    }

    /// Visit every element in the tree, depth first in document order.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Element)) {
        for element in &self.elements {
            element.walk(&mut visit);
        }
    }

    /// All ids in the tree, depth first.
    pub fn ids(&self) -> Vec<&ElementId> {
        let mut ids = Vec::new();
        self.walk(|e| ids.push(&e.id));
        ids
    }

    /// The first id that appears more than once in the tree, if any.
    pub fn first_duplicate_id(&self) -> Option<ElementId> {
        let mut seen = HashSet::new();
        self.ids().into_iter().find(|id| !seen.insert(*id)).cloned()
    }

    /// Bounding boxes of the top-level elements, skipping `exclude` and the
    /// top-level container that holds it.
    pub fn other_bounds<'a>(
        &'a self,
        exclude: &'a ElementId,
        default_size: Size,
    ) -> impl Iterator<Item = (&'a ElementId, Rect)> + 'a {
        self.elements
            .iter()
            .filter(move |e| !subtree_contains(e, exclude))
            .map(move |e| (&e.id, e.bounds(default_size)))
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Vec<Element>> for Document {
    fn from(elements: Vec<Element>) -> Self {
        Self::from_elements(elements)
    }
}

fn subtree_contains(element: &Element, id: &ElementId) -> bool {
    &element.id == id || element.children.iter().any(|child| subtree_contains(child, id))
}
