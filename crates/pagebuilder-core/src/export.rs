//! Code export: renders the document as a React component source file.

use crate::document::Document;
use crate::element::{Element, ElementKind, Style};
use serde::{Deserialize, Serialize};

/// Options for code export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Name of the generated component (also the file stem).
    pub component_name: String,
    /// Class name of the outer wrapper `<div>`.
    pub root_class: String,
    /// Escape user-entered text and attribute values.
    ///
    /// Off by default: exported markup reproduces content verbatim, so
    /// content containing markup is injected as-is.
    pub escape_text: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            component_name: "ExportedComponent".to_string(),
            root_class: "exported-component".to_string(),
            escape_text: false,
        }
    }
}

impl ExportOptions {
    /// File name of the export artifact.
    pub fn file_name(&self) -> String {
        format!("{}.tsx", self.component_name)
    }
}

/// The generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

/// Indented line buffer for generated source.
struct CodeWriter {
    buffer: String,
    indent_level: usize,
}

impl CodeWriter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn finish(self) -> String {
        self.buffer
    }
}

/// Renders elements to JSX.
pub struct CodeExporter<'a> {
    options: &'a ExportOptions,
}

impl<'a> CodeExporter<'a> {
    pub fn new(options: &'a ExportOptions) -> Self {
        Self { options }
    }

    /// Render the whole document as one component file.
    pub fn export(&self, document: &Document) -> ExportArtifact {
        let mut w = CodeWriter::new();
        w.line("import React from 'react';");
        w.line("");
        w.line(&format!("export const {} = () => {{", self.options.component_name));
        w.indent();
        w.line("return (");
        w.indent();
        w.line(&format!("<div className=\"{}\">", self.attr(&self.options.root_class)));
        w.indent();
        for element in document.elements() {
            self.write_element(&mut w, element);
        }
        w.dedent();
        w.line("</div>");
        w.dedent();
        w.line(");");
        w.dedent();
        w.line("};");

        ExportArtifact {
            file_name: self.options.file_name(),
            contents: w.finish(),
        }
    }

    /// Render a single element (and its children) to JSX.
    pub fn render_element(&self, element: &Element) -> String {
        let mut w = CodeWriter::new();
        self.write_element(&mut w, element);
        w.finish()
    }

    fn write_element(&self, w: &mut CodeWriter, element: &Element) {
        let attrs = self.common_attrs(element);
        let text = |fallback: &str| self.text(element.kind.text_content().unwrap_or(fallback));

        let line = match &element.kind {
            ElementKind::Heading { .. } => format!("<h1{}>{}</h1>", attrs, text("")),
            ElementKind::Text { .. } | ElementKind::Paragraph { .. } => {
                format!("<p{}>{}</p>", attrs, text(""))
            }
            ElementKind::Button { .. } => format!("<button{}>{}</button>", attrs, text("Button")),
            ElementKind::Link { href, .. } => format!(
                "<a href=\"{}\"{}>{}</a>",
                self.attr(href.as_deref().unwrap_or("#")),
                attrs,
                text("Link")
            ),
            ElementKind::Image { src, alt } => format!(
                "<img src=\"{}\" alt=\"{}\"{} />",
                self.attr(src.as_deref().unwrap_or("")),
                self.attr(alt.as_deref().unwrap_or("")),
                attrs
            ),
            ElementKind::Video { src } => format!(
                "<video src=\"{}\" controls{} />",
                self.attr(src.as_deref().unwrap_or("")),
                attrs
            ),
            ElementKind::Input { placeholder } => format!(
                "<input type=\"text\" placeholder=\"{}\"{} />",
                self.attr(placeholder.as_deref().unwrap_or("")),
                attrs
            ),
            ElementKind::Textarea { placeholder } => format!(
                "<textarea placeholder=\"{}\"{} />",
                self.attr(placeholder.as_deref().unwrap_or("")),
                attrs
            ),
            ElementKind::Checkbox { checked } => {
                format!("<input type=\"checkbox\"{}{} />", checked_attr(*checked), attrs)
            }
            ElementKind::Radio { checked } => {
                format!("<input type=\"radio\"{}{} />", checked_attr(*checked), attrs)
            }
            ElementKind::Slider { min, max, step } => format!(
                "<input type=\"range\" min=\"{}\" max=\"{}\" step=\"{}\"{} />",
                min.unwrap_or(0.0),
                max.unwrap_or(100.0),
                step.unwrap_or(1.0),
                attrs
            ),
            ElementKind::Alert { .. } => format!("<div role=\"alert\"{}>{}</div>", attrs, text("")),
            ElementKind::Divider => format!("<hr{} />", attrs),
            ElementKind::Select { options } => {
                w.line(&format!("<select{}>", attrs));
                w.indent();
                for option in options {
                    w.line(&format!(
                        "<option value=\"{}\">{}</option>",
                        self.attr(&option.value),
                        self.text(&option.label)
                    ));
                }
                w.dedent();
                w.line("</select>");
                return;
            }
            ElementKind::Container => {
                if element.children.is_empty() {
                    format!("<div{}></div>", attrs)
                } else {
                    w.line(&format!("<div{}>", attrs));
                    w.indent();
                    for child in &element.children {
                        self.write_element(w, child);
                    }
                    w.dedent();
                    w.line("</div>");
                    return;
                }
            }
            ElementKind::Other { tag, .. } => {
                format!("<div{}>Component: {}</div>", attrs, self.text(tag))
            }
        };
        w.line(&line);
    }

    fn common_attrs(&self, element: &Element) -> String {
        let mut attrs = String::new();
        if let Some(class_name) = &element.class_name {
            attrs.push_str(&format!(" className=\"{}\"", self.attr(class_name)));
        }
        attrs.push_str(&format!(" style={{{}}}", self.style_object(&element.style)));
        attrs
    }

    /// `{ key: "value", ... }` as used inside `style={...}`.
    fn style_object(&self, style: &Style) -> String {
        if style.is_empty() {
            return "{}".to_string();
        }
        let pairs: Vec<String> = style
            .iter()
            .map(|(key, value)| format!("{}: \"{}\"", key, self.attr(&value.to_string())))
            .collect();
        format!("{{ {} }}", pairs.join(", "))
    }

    fn text(&self, text: &str) -> String {
        if self.options.escape_text {
            escape_text(text)
        } else {
            text.to_string()
        }
    }

    fn attr(&self, value: &str) -> String {
        if self.options.escape_text {
            escape_attr(value)
        } else {
            value.to_string()
        }
    }
}

fn checked_attr(checked: bool) -> &'static str {
    if checked { " checked" } else { "" }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("{'{'}"),
            '}' => out.push_str("{'}'}"),
            c => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\\' => out.push_str("\\\\"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Render a document with the given options.
pub fn export_document(document: &Document, options: &ExportOptions) -> ExportArtifact {
    CodeExporter::new(options).export(document)
}
