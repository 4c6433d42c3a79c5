//! Persisted JSON layout of an element.
//!
//! Elements are stored as `{ id, type, props: { style, ... }, children? }`
//! where `props` is an open bag. Conversion pulls the fields a known kind
//! understands out of the bag; unknown kinds keep the whole bag.

use super::{Element, ElementId, ElementKind, SelectOption, Style};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors converting a persisted element into the typed model.
#[derive(Debug, Error)]
pub enum ElementError {
    #[error("Element {id}: invalid `{field}` property: {source}")]
    InvalidField {
        id: String,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Element with empty id")]
    EmptyId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RawProps {
    #[serde(default)]
    style: Style,
    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawElement {
    id: ElementId,
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    props: RawProps,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,
}

struct Fields<'a> {
    id: &'a ElementId,
    map: Map<String, Value>,
}

impl Fields<'_> {
    fn take<T: DeserializeOwned>(&mut self, field: &'static str) -> Result<Option<T>, ElementError> {
        match self.map.remove(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|source| {
                ElementError::InvalidField {
                    id: self.id.to_string(),
                    field,
                    source,
                }
            }),
        }
    }

    fn text(&mut self) -> Result<Option<String>, ElementError> {
        self.take("children")
    }
}

impl TryFrom<RawElement> for Element {
    type Error = ElementError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        if raw.id.as_str().is_empty() {
            return Err(ElementError::EmptyId);
        }
        let RawProps {
            style,
            class_name,
            fields,
        } = raw.props;
        let mut f = Fields {
            id: &raw.id,
            map: fields,
        };

        let kind = match raw.tag.as_str() {
            "button" => ElementKind::Button { label: f.text()? },
            "text" => ElementKind::Text { content: f.text()? },
            "heading" => ElementKind::Heading { content: f.text()? },
            "paragraph" => ElementKind::Paragraph { content: f.text()? },
            "alert" => ElementKind::Alert { content: f.text()? },
            "link" => ElementKind::Link {
                href: f.take("href")?,
                label: f.text()?,
            },
            "image" => ElementKind::Image {
                src: f.take("src")?,
                alt: f.take("alt")?,
            },
            "video" => ElementKind::Video { src: f.take("src")? },
            "container" => ElementKind::Container,
            "input" => ElementKind::Input {
                placeholder: f.take("placeholder")?,
            },
            "textarea" => ElementKind::Textarea {
                placeholder: f.take("placeholder")?,
            },
            "checkbox" => ElementKind::Checkbox {
                checked: f.take("checked")?.unwrap_or(false),
            },
            "radio" => ElementKind::Radio {
                checked: f.take("checked")?.unwrap_or(false),
            },
            "select" => ElementKind::Select {
                options: f.take::<Vec<SelectOption>>("options")?.unwrap_or_default(),
            },
            "slider" => ElementKind::Slider {
                min: f.take("min")?,
                max: f.take("max")?,
                step: f.take("step")?,
            },
            "divider" => ElementKind::Divider,
            _ => ElementKind::Other {
                tag: raw.tag.clone(),
                props: std::mem::take(&mut f.map),
            },
        };

        if !f.map.is_empty() {
            log::debug!(
                "Dropping unused props {:?} of {} element {}",
                f.map.keys().collect::<Vec<_>>(),
                raw.tag,
                raw.id
            );
        }

        Ok(Element {
            id: raw.id,
            kind,
            style,
            class_name,
            children: raw.children,
        })
    }
}

fn put<T: Serialize>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value.and_then(|v| serde_json::to_value(v).ok()) {
        map.insert(key.to_string(), value);
    }
}

impl From<Element> for RawElement {
    fn from(element: Element) -> Self {
        let tag = element.kind.tag().to_string();
        let mut fields = Map::new();
        match element.kind {
            ElementKind::Button { label } => put(&mut fields, "children", label),
            ElementKind::Text { content }
            | ElementKind::Heading { content }
            | ElementKind::Paragraph { content }
            | ElementKind::Alert { content } => put(&mut fields, "children", content),
            ElementKind::Link { href, label } => {
                put(&mut fields, "href", href);
                put(&mut fields, "children", label);
            }
            ElementKind::Image { src, alt } => {
                put(&mut fields, "src", src);
                put(&mut fields, "alt", alt);
            }
            ElementKind::Video { src } => put(&mut fields, "src", src),
            ElementKind::Input { placeholder } | ElementKind::Textarea { placeholder } => {
                put(&mut fields, "placeholder", placeholder)
            }
            ElementKind::Checkbox { checked } | ElementKind::Radio { checked } => {
                put(&mut fields, "checked", Some(checked))
            }
            ElementKind::Select { options } => put(&mut fields, "options", Some(options)),
            ElementKind::Slider { min, max, step } => {
                put(&mut fields, "min", min);
                put(&mut fields, "max", max);
                put(&mut fields, "step", step);
            }
            ElementKind::Container | ElementKind::Divider => {}
            ElementKind::Other { props, .. } => fields = props,
        }

        RawElement {
            id: element.id,
            tag,
            props: RawProps {
                style: element.style,
                class_name: element.class_name,
                fields,
            },
            children: element.children,
        }
    }
}
