//! Style maps and the default style resolver.
//!
//! Every element carries a [`StyleMap`] of CSS-like properties keyed by their
//! camelCase name (`backgroundColor`, `fontSize`, ...). New elements get their
//! map from [`resolve_default_styles`]: a shared base set with per-type
//! overrides layered on top.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EditorResult, ElementKind};

/// Background colour property.
pub const BACKGROUND_COLOR: &str = "backgroundColor";
/// Border property.
pub const BORDER: &str = "border";
/// Border radius property.
pub const BORDER_RADIUS: &str = "borderRadius";
/// Foreground (text) colour property.
pub const COLOR: &str = "color";
/// Font size property.
pub const FONT_SIZE: &str = "fontSize";
/// Font family property.
pub const FONT_FAMILY: &str = "fontFamily";
/// Font weight property.
pub const FONT_WEIGHT: &str = "fontWeight";
/// Cursor property.
pub const CURSOR: &str = "cursor";
/// Padding property.
pub const PADDING: &str = "padding";

/// Mapping from style property name to value.
///
/// Keys are unique. Iteration is ordered by key so that anything derived from
/// a map (notably the HTML export) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, String>);

impl StyleMap {
    /// Create an empty style map.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Get a property value.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    /// Set a property, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(property.into(), value.into())
    }

    /// Remove a property.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.0.remove(property)
    }

    /// Set a property, builder style.
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(property, value);
        self
    }

    /// Layer `overrides` on top of this map. Later values win on collision.
    #[must_use]
    pub fn layered(mut self, overrides: &StyleMap) -> Self {
        for (property, value) in overrides {
            self.insert(property.clone(), value.clone());
        }
        self
    }

    /// Check whether a property is set.
    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    /// Iterate over `(property, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Styles shared by every element type.
fn base_styles() -> StyleMap {
    StyleMap::from_iter([
        (BACKGROUND_COLOR, "#ffffff"),
        (BORDER, "1px solid #e5e7eb"),
        (BORDER_RADIUS, "8px"),
        (COLOR, "#000000"),
        (FONT_SIZE, "14px"),
        (FONT_FAMILY, "Inter, system-ui, sans-serif"),
    ])
}

/// Per-type overrides applied on top of [`base_styles`].
fn type_overrides(kind: ElementKind) -> StyleMap {
    match kind {
        ElementKind::Button => StyleMap::from_iter([
            (BACKGROUND_COLOR, "#3b82f6"),
            (COLOR, "#ffffff"),
            (FONT_WEIGHT, "600"),
            (CURSOR, "pointer"),
        ]),
        ElementKind::Input => StyleMap::from_iter([(PADDING, "8px 12px")]),
        ElementKind::Text => {
            StyleMap::from_iter([(BORDER, "none"), (BACKGROUND_COLOR, "transparent")])
        }
        ElementKind::Container => StyleMap::from_iter([(BACKGROUND_COLOR, "#f9fafb")]),
    }
}

/// Default style set for an element type.
#[must_use]
pub fn resolve_default_styles(kind: ElementKind) -> StyleMap {
    base_styles().layered(&type_overrides(kind))
}

/// Default style set for an element type given by name.
///
/// # Errors
///
/// Returns [`EditorError::UnknownElementType`](crate::EditorError::UnknownElementType)
/// if `type_name` is not one of `button`, `input`, `text` or `container`.
pub fn resolve_default_styles_named(type_name: &str) -> EditorResult<StyleMap> {
    let kind: ElementKind = type_name.parse()?;
    Ok(resolve_default_styles(kind))
}
