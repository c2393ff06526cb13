//! Element factory - the only way new elements enter a document.

use crate::{resolve_default_styles, EditorConfig, EditorResult, Element, ElementKind, Transform};

/// Body text given to freshly created text elements.
pub const DEFAULT_TEXT_CONTENT: &str = "Double-click to edit";

/// Label given to freshly created buttons.
pub const DEFAULT_BUTTON_LABEL: &str = "Button";

/// Builds new elements with editor defaults.
///
/// Every element is placed at the same spawn point. Stacking is expected;
/// the user drags elements apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementFactory {
    spawn_x: f64,
    spawn_y: f64,
}

impl Default for ElementFactory {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl ElementFactory {
    /// Create a factory using the spawn point from `config`.
    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            spawn_x: config.spawn_x,
            spawn_y: config.spawn_y,
        }
    }

    /// Default `(width, height)` for a kind.
    #[must_use]
    pub const fn default_size(kind: ElementKind) -> (f64, f64) {
        match kind {
            ElementKind::Button => (120.0, 40.0),
            ElementKind::Input => (200.0, 40.0),
            ElementKind::Text | ElementKind::Container => (200.0, 100.0),
        }
    }

    /// Default content for a kind.
    #[must_use]
    pub const fn default_content(kind: ElementKind) -> &'static str {
        match kind {
            ElementKind::Button => DEFAULT_BUTTON_LABEL,
            ElementKind::Text => DEFAULT_TEXT_CONTENT,
            ElementKind::Input | ElementKind::Container => "",
        }
    }

    /// Create a new element of the given kind with a fresh ID.
    #[must_use]
    pub fn create(&self, kind: ElementKind) -> Element {
        let (width, height) = Self::default_size(kind);
        let element = Element::new(kind)
            .with_transform(Transform {
                x: self.spawn_x,
                y: self.spawn_y,
                width,
                height,
            })
            .with_content(Self::default_content(kind))
            .with_styles(resolve_default_styles(kind));
        tracing::debug!(id = %element.id, %kind, "Created element");
        element
    }

    /// Create a new element from a type name.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownElementType`](crate::EditorError::UnknownElementType)
    /// for names outside the closed set.
    pub fn create_named(&self, type_name: &str) -> EditorResult<Element> {
        let kind: ElementKind = type_name.parse()?;
        Ok(self.create(kind))
    }
}
