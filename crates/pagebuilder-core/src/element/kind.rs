//! Per-type element variants and their defaults.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a `select` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The type of an element together with the fields only that type uses.
///
/// Unknown type tags are kept as [`ElementKind::Other`] with their raw
/// property bag, so documents using tags this crate does not know still
/// load, save and export.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Button { label: Option<String> },
    Text { content: Option<String> },
    Heading { content: Option<String> },
    Paragraph { content: Option<String> },
    Alert { content: Option<String> },
    Link { href: Option<String>, label: Option<String> },
    Image { src: Option<String>, alt: Option<String> },
    Video { src: Option<String> },
    Container,
    Input { placeholder: Option<String> },
    Textarea { placeholder: Option<String> },
    Checkbox { checked: bool },
    Radio { checked: bool },
    Select { options: Vec<SelectOption> },
    Slider { min: Option<f64>, max: Option<f64>, step: Option<f64> },
    Divider,
    Other { tag: String, props: Map<String, Value> },
}

impl ElementKind {
    /// Build an empty kind for a type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "button" => ElementKind::Button { label: None },
            "text" => ElementKind::Text { content: None },
            "heading" => ElementKind::Heading { content: None },
            "paragraph" => ElementKind::Paragraph { content: None },
            "alert" => ElementKind::Alert { content: None },
            "link" => ElementKind::Link { href: None, label: None },
            "image" => ElementKind::Image { src: None, alt: None },
            "video" => ElementKind::Video { src: None },
            "container" => ElementKind::Container,
            "input" => ElementKind::Input { placeholder: None },
            "textarea" => ElementKind::Textarea { placeholder: None },
            "checkbox" => ElementKind::Checkbox { checked: false },
            "radio" => ElementKind::Radio { checked: false },
            "select" => ElementKind::Select { options: Vec::new() },
            "slider" => ElementKind::Slider { min: None, max: None, step: None },
            "divider" => ElementKind::Divider,
            other => ElementKind::Other {
                tag: other.to_string(),
                props: Map::new(),
            },
        }
    }

    /// Build a kind for a freshly dropped element, with default content.
    pub fn with_defaults(tag: &str) -> Self {
        let text = |s: &str| Some(s.to_string());
        match tag {
            "button" => ElementKind::Button { label: text("Button") },
            "text" => ElementKind::Text { content: text("New Text") },
            "heading" => ElementKind::Heading { content: text("Heading") },
            "paragraph" => ElementKind::Paragraph { content: text("Paragraph text") },
            "alert" => ElementKind::Alert { content: text("Alert") },
            "link" => ElementKind::Link {
                href: text("#"),
                label: text("Link"),
            },
            "image" => ElementKind::Image {
                src: text("https://via.placeholder.com/400x300"),
                alt: text(""),
            },
            "input" => ElementKind::Input { placeholder: text("Enter text") },
            "textarea" => ElementKind::Textarea { placeholder: text("Enter text") },
            "select" => ElementKind::Select {
                options: vec![
                    SelectOption::new("option-1", "Option 1"),
                    SelectOption::new("option-2", "Option 2"),
                ],
            },
            "slider" => ElementKind::Slider {
                min: Some(0.0),
                max: Some(100.0),
                step: Some(1.0),
            },
            other => Self::from_tag(other),
        }
    }

    /// Size given to a freshly dropped element of this kind.
    ///
    /// Falls back to `fallback` for kinds without an intrinsic size.
    pub fn default_size(&self, fallback: Size) -> Size {
        match self {
            ElementKind::Text { .. } | ElementKind::Input { .. } | ElementKind::Select { .. } => {
                Size::new(200.0, 40.0)
            }
            ElementKind::Heading { .. } | ElementKind::Alert { .. } => Size::new(300.0, 60.0),
            ElementKind::Paragraph { .. } => Size::new(300.0, 80.0),
            ElementKind::Textarea { .. } => Size::new(300.0, 100.0),
            ElementKind::Image { .. } => Size::new(200.0, 160.0),
            ElementKind::Video { .. } => Size::new(320.0, 180.0),
            ElementKind::Container => Size::new(300.0, 200.0),
            ElementKind::Checkbox { .. } | ElementKind::Radio { .. } => Size::new(20.0, 20.0),
            ElementKind::Slider { .. } | ElementKind::Divider => Size::new(200.0, 20.0),
            ElementKind::Button { .. } | ElementKind::Link { .. } | ElementKind::Other { .. } => {
                fallback
            }
        }
    }

    /// The type tag used on the wire and in exported markup.
    pub fn tag(&self) -> &str {
        match self {
            ElementKind::Button { .. } => "button",
            ElementKind::Text { .. } => "text",
            ElementKind::Heading { .. } => "heading",
            ElementKind::Paragraph { .. } => "paragraph",
            ElementKind::Alert { .. } => "alert",
            ElementKind::Link { .. } => "link",
            ElementKind::Image { .. } => "image",
            ElementKind::Video { .. } => "video",
            ElementKind::Container => "container",
            ElementKind::Input { .. } => "input",
            ElementKind::Textarea { .. } => "textarea",
            ElementKind::Checkbox { .. } => "checkbox",
            ElementKind::Radio { .. } => "radio",
            ElementKind::Select { .. } => "select",
            ElementKind::Slider { .. } => "slider",
            ElementKind::Divider => "divider",
            ElementKind::Other { tag, .. } => tag,
        }
    }

    /// Text content shown inside the element, for kinds that have one.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            ElementKind::Button { label } | ElementKind::Link { label, .. } => label.as_deref(),
            ElementKind::Text { content }
            | ElementKind::Heading { content }
            | ElementKind::Paragraph { content }
            | ElementKind::Alert { content } => content.as_deref(),
            ElementKind::Other { props, .. } => props.get("children").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Replace the text content. Returns `false` if the kind has no text.
    pub fn set_text_content(&mut self, text: impl Into<String>) -> bool {
        match self {
            ElementKind::Button { label } | ElementKind::Link { label, .. } => {
                *label = Some(text.into());
                true
            }
            ElementKind::Text { content }
            | ElementKind::Heading { content }
            | ElementKind::Paragraph { content }
            | ElementKind::Alert { content } => {
                *content = Some(text.into());
                true
            }
            ElementKind::Other { props, .. } => {
                props.insert("children".to_string(), Value::String(text.into()));
                true
            }
            _ => false,
        }
    }
}
