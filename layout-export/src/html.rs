//! Document export to standalone HTML.
//!
//! Every element is written as one absolutely positioned tag whose inline
//! style starts with the element's geometry, followed by its style map with
//! property names converted to CSS kebab-case:
//!
//! ```text
//! <button style="position: absolute; left: 10px; top: 20px; width: 120px; height: 40px; background-color: #3b82f6; ...">Go</button>
//! ```

use std::fmt::Write;

use layout_core::{Document, Element, ElementKind};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

/// File name hosts offer the export under.
pub const EXPORT_FILE_NAME: &str = "design.html";

/// MIME type of the export.
pub const EXPORT_MIME_TYPE: &str = "text/html";

/// Configuration for HTML export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Page title (default: "Design").
    pub title: String,
    /// Value of the `lang` attribute on `<html>` (default: "en").
    pub lang: String,
    /// Prefix for each element line (default: two spaces).
    pub indent: String,
    /// Font family applied to the page body.
    pub body_font_family: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Design".to_string(),
            lang: "en".to_string(),
            indent: "  ".to_string(),
            body_font_family: "Inter, system-ui, sans-serif".to_string(),
        }
    }
}

impl ExportConfig {
    /// Check that the configuration yields well-formed markup.
    ///
    /// The title is escaped on output and never rejected. The other values
    /// are written verbatim into places escaping cannot protect.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> ExportResult<()> {
        if self.lang.is_empty()
            || !self
                .lang
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ExportError::InvalidConfig(format!(
                "lang must be a language tag, got {:?}",
                self.lang
            )));
        }
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ExportError::InvalidConfig(
                "indent may only contain spaces and tabs".to_string(),
            ));
        }
        if self.body_font_family.contains(['<', '>', '{', '}', ';']) {
            return Err(ExportError::InvalidConfig(format!(
                "body_font_family is not a font list: {:?}",
                self.body_font_family
            )));
        }
        Ok(())
    }
}

/// An exported page, ready for a host's download mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type.
    pub mime_type: String,
    /// The HTML page.
    pub html: String,
}

/// Exports a [`Document`] as an HTML page.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    config: ExportConfig,
}

impl HtmlExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The exporter's configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a document.
    ///
    /// The output depends only on the document's elements and their order;
    /// the selection is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn export(&self, document: &Document) -> ExportResult<String> {
        self.config.validate()?;

        let mut html = String::with_capacity(512 + document.len() * 256);
        self.write_head(&mut html)?;
        for element in document.elements() {
            html.push_str(&self.config.indent);
            write_element(&mut html, element)?;
            html.push('\n');
        }
        html.push_str("</body>\n</html>");

        tracing::info!(
            elements = document.len(),
            bytes = html.len(),
            "Exported document to HTML"
        );
        Ok(html)
    }

    /// Export a document together with its download metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn export_artifact(&self, document: &Document) -> ExportResult<ExportArtifact> {
        Ok(ExportArtifact {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            html: self.export(document)?,
        })
    }

    fn write_head(&self, out: &mut String) -> ExportResult<()> {
        let config = &self.config;
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"{}\">", config.lang)?;
        writeln!(out, "<head>")?;
        writeln!(out, "  <meta charset=\"UTF-8\">")?;
        writeln!(
            out,
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(out, "  <title>{}</title>", escape_html(&config.title))?;
        writeln!(out, "  <style>")?;
        writeln!(
            out,
            "    body {{ margin: 0; font-family: {}; }}",
            config.body_font_family
        )?;
        writeln!(out, "  </style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        Ok(())
    }
}

/// Export a document with the default configuration.
///
/// # Errors
///
/// Returns an error only if formatting fails.
pub fn export_html(document: &Document) -> ExportResult<String> {
    HtmlExporter::with_defaults().export(document)
}

fn write_element(out: &mut String, element: &Element) -> std::fmt::Result {
    let style = escape_html(&inline_style(element));
    let content = escape_html(&element.content);
    match element.kind {
        ElementKind::Button => write!(out, "<button style=\"{style}\">{content}</button>"),
        ElementKind::Input => write!(
            out,
            "<input type=\"text\" style=\"{style}\" placeholder=\"{content}\" />"
        ),
        ElementKind::Text => write!(out, "<div style=\"{style}\">{content}</div>"),
        ElementKind::Container => write!(out, "<div style=\"{style}\"></div>"),
    }
}

fn inline_style(element: &Element) -> String {
    let t = &element.transform;
    let mut style = format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; ",
        t.x, t.y, t.width, t.height
    );
    let declarations: Vec<String> = element
        .styles
        .iter()
        .map(|(property, value)| format!("{}: {value}", to_css_property(property)))
        .collect();
    style.push_str(&declarations.join("; "));
    style
}

/// Convert a camelCase style property to its CSS name.
///
/// A hyphen is inserted before every uppercase letter, which is lowercased:
/// `backgroundColor` becomes `background-color`.
#[must_use]
pub fn to_css_property(name: &str) -> String {
    let mut css = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            css.push('-');
            css.extend(c.to_lowercase());
        } else {
            css.push(c);
        }
    }
    css
}

/// Escape text for use in HTML content or a quoted attribute value.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_core::{resolve_default_styles, StyleMap, Transform};

    fn element(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Element {
        Element::new(kind)
            .with_transform(Transform {
                x,
                y,
                width,
                height,
            })
            .with_styles(resolve_default_styles(kind))
    }

    fn document(elements: Vec<Element>) -> Document {
        Document::from_elements(elements).expect("unique ids")
    }

    #[test]
    fn test_empty_document() {
        let html = export_html(&Document::new()).expect("export");
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains("<title>Design</title>"));
        assert!(html.contains("body { margin: 0; font-family: Inter, system-ui, sans-serif; }"));
        assert!(html.ends_with("<body>\n</body>\n</html>"));
    }

    #[test]
    fn test_button_markup() {
        let doc = document(vec![
            element(ElementKind::Button, 10.0, 20.0, 120.0, 40.0).with_content("Go"),
        ]);
        let html = export_html(&doc).expect("export");
        assert!(html.contains(
            "<button style=\"position: absolute; left: 10px; top: 20px; width: 120px; height: 40px; background-color: #3b82f6; "
        ));
        assert!(html.contains("cursor: pointer; "));
        assert!(html.contains("font-weight: 600"));
        assert!(html.contains("\">Go</button>\n"));
    }

    #[test]
    fn test_tag_per_kind() {
        let doc = document(vec![
            element(ElementKind::Input, 0.0, 0.0, 200.0, 40.0).with_content("Email"),
            element(ElementKind::Text, 0.0, 50.0, 200.0, 100.0).with_content("Hello"),
            element(ElementKind::Container, 0.0, 160.0, 200.0, 100.0).with_content("ignored"),
        ]);
        let html = export_html(&doc).expect("export");

        let body: Vec<&str> = html
            .lines()
            .skip_while(|line| *line != "<body>")
            .skip(1)
            .take_while(|line| *line != "</body>")
            .collect();
        assert_eq!(body.len(), 3);
        assert!(body[0].starts_with("  <input type=\"text\" style=\""));
        assert!(body[0].ends_with("\" placeholder=\"Email\" />"));
        assert!(body[1].starts_with("  <div style=\""));
        assert!(body[1].ends_with("\">Hello</div>"));
        assert!(body[2].ends_with("\"></div>"));
        assert!(!html.contains("ignored"));
    }

    #[test]
    fn test_fractional_and_negative_geometry() {
        let doc = document(vec![element(ElementKind::Container, -12.5, 0.25, 50.0, 30.0)]);
        let html = export_html(&doc).expect("export");
        assert!(html.contains("left: -12.5px; top: 0.25px; width: 50px; height: 30px; "));
    }

    #[test]
    fn test_large_coordinates_keep_precision() {
        let doc = document(vec![element(
            ElementKind::Container,
            16_777_217.0,
            -9_007_199_254.5,
            50.0,
            30.0,
        )]);
        let html = export_html(&doc).expect("export");
        assert!(html.contains("left: 16777217px; top: -9007199254.5px; "));
    }

    #[test]
    fn test_empty_style_map() {
        let doc = document(vec![Element::new(ElementKind::Text)
            .with_transform(Transform::default())
            .with_content("plain")]);
        let html = export_html(&doc).expect("export");
        assert!(html.contains(
            "<div style=\"position: absolute; left: 0px; top: 0px; width: 100px; height: 100px; \">plain</div>"
        ));
    }

    #[test]
    fn test_content_is_escaped() {
        let doc = document(vec![
            element(ElementKind::Text, 0.0, 0.0, 200.0, 100.0)
                .with_content("<script>alert('x')</script> & more"),
            element(ElementKind::Input, 0.0, 0.0, 200.0, 40.0).with_content("\" onfocus=\"x"),
        ]);
        let html = export_html(&doc).expect("export");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
        assert!(html.contains("placeholder=\"&quot; onfocus=&quot;x\""));
    }

    #[test]
    fn test_style_values_are_escaped() {
        let styles = StyleMap::new().with("fontFamily", "\"Fira Sans\", serif");
        let doc = document(vec![Element::new(ElementKind::Button)
            .with_content("Go")
            .with_styles(styles)]);
        let html = export_html(&doc).expect("export");
        assert!(html.contains("font-family: &quot;Fira Sans&quot;, serif\">Go</button>"));
    }

    #[test]
    fn test_selection_does_not_affect_output() {
        let button = element(ElementKind::Button, 1.0, 2.0, 120.0, 40.0);
        let id = button.id;
        let json_unselected = document(vec![button.clone()]).to_json().expect("json");
        let mut selected: serde_json::Value =
            serde_json::from_str(&json_unselected).expect("value");
        selected["selected"] = serde_json::json!(id);
        let selected = Document::from_json(&selected.to_string()).expect("doc");
        assert_eq!(selected.selection(), Some(id));

        let a = export_html(&document(vec![button])).expect("export");
        let b = export_html(&selected).expect("export");
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_config() {
        let exporter = HtmlExporter::new(ExportConfig {
            title: "Tom & Jerry".to_string(),
            lang: "en-GB".to_string(),
            indent: "\t".to_string(),
            ..ExportConfig::default()
        });
        let doc = document(vec![element(ElementKind::Container, 0.0, 0.0, 200.0, 100.0)]);
        let html = exporter.export(&doc).expect("export");
        assert!(html.contains("<html lang=\"en-GB\">"));
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains("\n\t<div style=\""));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad = [
            ExportConfig {
                lang: String::new(),
                ..ExportConfig::default()
            },
            ExportConfig {
                lang: "en\" onload=\"x".to_string(),
                ..ExportConfig::default()
            },
            ExportConfig {
                indent: "<!-- -->".to_string(),
                ..ExportConfig::default()
            },
            ExportConfig {
                body_font_family: "serif; } </style><script>".to_string(),
                ..ExportConfig::default()
            },
        ];
        for config in bad {
            let result = HtmlExporter::new(config).export(&Document::new());
            assert!(matches!(result, Err(ExportError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: ExportConfig = serde_json::from_str(r#"{"title": "Landing"}"#).expect("parse");
        assert_eq!(config.title, "Landing");
        assert_eq!(config.lang, "en");
        assert_eq!(config.indent, "  ");
    }

    #[test]
    fn test_artifact_metadata() {
        let doc = document(vec![element(ElementKind::Button, 0.0, 0.0, 120.0, 40.0)]);
        let exporter = HtmlExporter::with_defaults();
        let artifact = exporter.export_artifact(&doc).expect("artifact");
        assert_eq!(artifact.file_name, "design.html");
        assert_eq!(artifact.mime_type, "text/html");
        assert_eq!(artifact.html, exporter.export(&doc).expect("export"));
    }

    #[test]
    fn test_to_css_property() {
        assert_eq!(to_css_property("backgroundColor"), "background-color");
        assert_eq!(to_css_property("borderRadius"), "border-radius");
        assert_eq!(to_css_property("color"), "color");
        assert_eq!(
            to_css_property("borderTopLeftRadius"),
            "border-top-left-radius"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }
}
