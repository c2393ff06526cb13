//! Layout elements - the building blocks of a design.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EditorError, EditorResult, StyleMap};

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an element ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if `s` is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of placeable primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A push button with a text label.
    Button,
    /// A single-line text field.
    Input,
    /// A block of body text.
    Text,
    /// An empty box used for grouping visually.
    Container,
}

impl ElementKind {
    /// All element kinds, in palette order.
    pub const ALL: [Self; 4] = [Self::Button, Self::Input, Self::Text, Self::Container];

    /// Lowercase type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Text => "text",
            Self::Container => "container",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "button" => Ok(Self::Button),
            "input" => Ok(Self::Input),
            "text" => Ok(Self::Text),
            "container" => Ok(Self::Container),
            other => Err(EditorError::UnknownElementType(other.to_string())),
        }
    }
}

/// Position and size of an element in canvas space (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// X position (pixels from left). May be negative.
    pub x: f64,
    /// Y position (pixels from top). May be negative.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }
}

/// A placed element with geometry, content and styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Element type. Never changes after creation.
    pub kind: ElementKind,
    /// Position and size.
    pub transform: Transform,
    /// Button label, input placeholder or text body. Unused for containers.
    pub content: String,
    /// Visual style properties.
    pub styles: StyleMap,
}

impl Element {
    /// Create a bare element of the given kind with a fresh ID.
    ///
    /// Use [`ElementFactory`](crate::ElementFactory) to get the editor defaults.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            transform: Transform::default(),
            content: String::new(),
            styles: StyleMap::new(),
        }
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the styles.
    #[must_use]
    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    /// Check if a point (in canvas coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let t = &self.transform;
        x >= t.x && x <= t.x + t.width && y >= t.y && y <= t.y + t.height
    }
}

/// A shallow partial update of an element.
///
/// Fields left as `None` are untouched. `styles` replaces the whole map;
/// callers compose single-property edits themselves (see
/// [`DocumentStore::set_style`](crate::DocumentStore::set_style)).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    /// New X position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New Y position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Full replacement style map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

impl ElementPatch {
    /// Patch that moves an element.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that resizes an element.
    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Patch that replaces the content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Patch that replaces the style map.
    #[must_use]
    pub fn styles(styles: StyleMap) -> Self {
        Self {
            styles: Some(styles),
            ..Self::default()
        }
    }

    /// Check if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.content.is_none()
            && self.styles.is_none()
    }

    /// Reject NaN and infinite geometry.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidGeometry`] naming the first bad field.
    pub fn validate(&self) -> EditorResult<()> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(EditorError::InvalidGeometry(format!("{name} = {v}")));
                }
            }
        }
        Ok(())
    }

    /// Merge this patch into `element`.
    pub fn apply_to(&self, element: &mut Element) {
        let t = &mut element.transform;
        if let Some(x) = self.x {
            t.x = x;
        }
        if let Some(y) = self.y {
            t.y = y;
        }
        if let Some(width) = self.width {
            t.width = width;
        }
        if let Some(height) = self.height {
            t.height = height;
        }
        if let Some(content) = &self.content {
            element.content.clone_from(content);
        }
        if let Some(styles) = &self.styles {
            element.styles.clone_from(styles);
        }
    }
}
