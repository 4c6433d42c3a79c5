//! CSS-like style map attached to every element.

use crate::geometry::{format_px, parse_px};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single style value: either a string (`"12px"`, `"#fff"`) or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Interpret the value as a pixel quantity, if it is one.
    pub fn as_px(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) if n.is_finite() => Some(*n),
            StyleValue::Number(_) => None,
            StyleValue::Text(s) => parse_px(s),
        }
    }

    /// Get the string payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(value as f64)
    }
}

/// Style property map (property name → value). Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, StyleValue>);

impl Style {
    pub const LEFT: &'static str = "left";
    pub const TOP: &'static str = "top";
    pub const WIDTH: &'static str = "width";
    pub const HEIGHT: &'static str = "height";

    /// Create an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    /// Set a property, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Option<StyleValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Read a pixel property. `None` means unset (or not a pixel value).
    pub fn px(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(StyleValue::as_px)
    }

    /// Store a pixel property as `"<integer>px"`.
    pub fn set_px(&mut self, key: impl Into<String>, value: f64) {
        self.set(key, format_px(value));
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_accessors() {
        let mut style = Style::new().with("left", "40px").with("zIndex", 1);
        assert_eq!(style.px(Style::LEFT), Some(40.0));
        assert_eq!(style.px(Style::TOP), None);

        style.set_px(Style::TOP, 60.0);
        assert_eq!(style.get(Style::TOP), Some(&StyleValue::from("60px")));
    }

    #[test]
    fn test_non_pixel_width_is_unset() {
        let style = Style::new().with("width", "100%");
        assert_eq!(style.px(Style::WIDTH), None);
    }

    #[test]
    fn test_json_shape() {
        let style = Style::new().with("position", "absolute").with("zIndex", 1);
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r#"{"position":"absolute","zIndex":1.0}"#);

        let back: Style = serde_json::from_str(r#"{"position":"absolute","zIndex":1}"#).unwrap();
        assert_eq!(back.get("zIndex"), Some(&StyleValue::Number(1.0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(StyleValue::Number(1.0).to_string(), "1");
        assert_eq!(StyleValue::Number(0.5).to_string(), "0.5");
        assert_eq!(StyleValue::from("red").to_string(), "red");
    }
}
