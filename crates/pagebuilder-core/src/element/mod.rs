//! Element definitions for the page document.

mod kind;
mod style;
mod wire;

pub use kind::{ElementKind, SelectOption};
pub use style::{Style, StyleValue};
pub use wire::ElementError;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix of generated element ids.
pub const ELEMENT_ID_PREFIX: &str = "component-";

/// Unique identifier for elements. Never reused within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh, collision-resistant id.
    pub fn generate() -> Self {
        Self(format!("{}{}", ELEMENT_ID_PREFIX, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A placed item in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "wire::RawElement", into = "wire::RawElement")]
pub struct Element {
    pub id: ElementId,
    /// Type tag plus type-specific fields.
    pub kind: ElementKind,
    /// CSS-like style properties.
    pub style: Style,
    /// Extra CSS class applied by the renderer.
    pub class_name: Option<String>,
    /// Nested elements (only rendered by container kinds).
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with an empty style.
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            style: Style::new(),
            class_name: None,
            children: Vec::new(),
        }
    }

    /// Create an element of type `tag` dropped from the palette at `position`.
    ///
    /// The element is absolutely positioned, sized with its kind's default
    /// size and carries default content.
    pub fn from_palette(id: ElementId, tag: &str, position: Point, fallback_size: Size) -> Self {
        let kind = ElementKind::with_defaults(tag);
        let size = kind.default_size(fallback_size);
        let mut style = Style::new().with("position", "absolute").with("zIndex", 1);
        style.set_px(Style::LEFT, position.x);
        style.set_px(Style::TOP, position.y);
        style.set_px(Style::WIDTH, size.width);
        style.set_px(Style::HEIGHT, size.height);

        Self::new(id, kind).with_style(style)
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    pub fn tag(&self) -> &str {
        self.kind.tag()
    }

    /// Top-left position from `left`/`top`; unset offsets read as zero.
    pub fn position(&self) -> Point {
        Point::new(
            self.style.px(Style::LEFT).unwrap_or(0.0),
            self.style.px(Style::TOP).unwrap_or(0.0),
        )
    }

    /// Size from `width`/`height`; unset dimensions fall back to `default`.
    ///
    /// This is the size placement uses for collision tests. It may differ
    /// from the rendered size when CSS overrides the dimensions with
    /// non-pixel values.
    pub fn size(&self, default: Size) -> Size {
        Size::new(
            self.style.px(Style::WIDTH).unwrap_or(default.width),
            self.style.px(Style::HEIGHT).unwrap_or(default.height),
        )
    }

    /// Bounding box used for collision tests.
    pub fn bounds(&self, default_size: Size) -> Rect {
        Rect::from_origin_size(self.position(), self.size(default_size))
    }

    /// Visit this element and all of its descendants, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// A shallow partial update of an element.
///
/// Each field that is `Some` replaces the corresponding top-level field of
/// the element. Nested maps are not merged: to change one style property,
/// pass the full style with that property changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementUpdate {
    pub kind: Option<ElementKind>,
    pub style: Option<Style>,
    pub class_name: Option<Option<String>>,
    pub children: Option<Vec<Element>>,
}

impl ElementUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn class_name(mut self, class_name: Option<String>) -> Self {
        self.class_name = Some(class_name);
        self
    }

    pub fn children(mut self, children: Vec<Element>) -> Self {
        self.children = Some(children);
        self
    }

    /// Check if the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.style.is_none()
            && self.class_name.is_none()
            && self.children.is_none()
    }

    /// Apply the update to an element.
    pub fn apply_to(self, element: &mut Element) {
        if let Some(kind) = self.kind {
            element.kind = kind;
        }
        if let Some(style) = self.style {
            element.style = style;
        }
        if let Some(class_name) = self.class_name {
            element.class_name = class_name;
        }
        if let Some(children) = self.children {
            element.children = children;
        }
    }
}
