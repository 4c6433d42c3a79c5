//! Element palette offered by the toolbar.

use crate::drag::{DragPayload, DragSource, PALETTE_ID_PREFIX};

/// One draggable palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteItem {
    pub tag: &'static str,
    pub label: &'static str,
}

impl PaletteItem {
    pub const fn new(tag: &'static str, label: &'static str) -> Self {
        Self { tag, label }
    }

    /// Draggable id, e.g. `toolbar-button`.
    pub fn draggable_id(&self) -> String {
        format!("{}{}", PALETTE_ID_PREFIX, self.tag)
    }

    /// Data attached to the draggable.
    pub fn payload(&self) -> DragPayload {
        DragPayload {
            tag: self.tag.to_string(),
            component: None,
        }
    }

    pub fn drag_source(&self) -> DragSource {
        DragSource::Palette {
            tag: self.tag.to_string(),
        }
    }

    fn matches(&self, query: &str) -> bool {
        self.tag.to_lowercase().contains(query) || self.label.to_lowercase().contains(query)
    }
}

/// Number of items shown in the quick-add grid.
pub const QUICK_ADD_COUNT: usize = 9;

const ITEMS: &[PaletteItem] = &[
    PaletteItem::new("image", "Image"),
    PaletteItem::new("text", "Title"),
    PaletteItem::new("paragraph", "Paragraph"),
    PaletteItem::new("button", "Button"),
    PaletteItem::new("container", "Container"),
    PaletteItem::new("video", "Video"),
    PaletteItem::new("shape", "Shape"),
    PaletteItem::new("line", "Line"),
    PaletteItem::new("divider", "Divider"),
    PaletteItem::new("gallery", "Gallery"),
    PaletteItem::new("menu", "Menu"),
    PaletteItem::new("iframe", "IFrame"),
    PaletteItem::new("heading", "Heading"),
    PaletteItem::new("link", "Link"),
    PaletteItem::new("input", "Input"),
    PaletteItem::new("textarea", "Text Area"),
    PaletteItem::new("checkbox", "Checkbox"),
    PaletteItem::new("radio", "Radio"),
    PaletteItem::new("select", "Select"),
    PaletteItem::new("slider", "Slider"),
    PaletteItem::new("alert", "Alert"),
];

/// The toolbar palette.
pub struct Palette;

impl Palette {
    /// All palette items in display order.
    pub fn all() -> &'static [PaletteItem] {
        ITEMS
    }

    /// Items shown in the quick-add grid.
    pub fn quick_add() -> &'static [PaletteItem] {
        &ITEMS[..QUICK_ADD_COUNT]
    }

    /// Items whose tag or label contains `query`, ignoring case. A blank
    /// query returns everything.
    pub fn search(query: &str) -> Vec<PaletteItem> {
        let query = query.trim().to_lowercase();
        ITEMS
            .iter()
            .filter(|item| query.is_empty() || item.matches(&query))
            .copied()
            .collect()
    }

    /// Look up an item by tag.
    pub fn find(tag: &str) -> Option<&'static PaletteItem> {
        ITEMS.iter().find(|item| item.tag == tag)
    }
}
