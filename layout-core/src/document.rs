//! The document: an ordered element sequence plus the selection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{EditorError, EditorResult, Element, ElementId, ElementPatch};

/// All elements of a design, in z-order (first = bottom), plus the selection.
///
/// Mutation goes through [`DocumentStore`](crate::DocumentStore); the
/// document itself is the read model handed to renderers and exporters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Elements in insertion order.
    elements: Vec<Element>,
    /// Currently selected element, if any.
    #[serde(default)]
    selected: Option<ElementId>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from existing elements, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::DuplicateElementId`] if two elements share an ID.
    pub fn from_elements(elements: Vec<Element>) -> EditorResult<Self> {
        let doc = Self {
            elements,
            selected: None,
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Check the document invariants: unique IDs, selection points at a
    /// present element.
    fn validate(&self) -> EditorResult<()> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if !seen.insert(element.id) {
                return Err(EditorError::DuplicateElementId(element.id));
            }
        }
        match self.selected {
            Some(id) if !seen.contains(&id) => Err(EditorError::ElementNotFound(id)),
            _ => Ok(()),
        }
    }

    /// Append an element on top of the z-order.
    pub(crate) fn push(&mut self, element: Element) -> ElementId {
        debug_assert!(
            self.get_element(element.id).is_none(),
            "duplicate element id {}",
            element.id
        );
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Insert an element at `index` (clamped to the end).
    pub(crate) fn insert(&mut self, index: usize, element: Element) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
    }

    /// Merge `patch` into the element with the given ID.
    ///
    /// Returns the element as it was before the merge.
    pub(crate) fn patch(&mut self, id: ElementId, patch: &ElementPatch) -> EditorResult<Element> {
        let element = self
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EditorError::ElementNotFound(id))?;
        let before = element.clone();
        patch.apply_to(element);
        Ok(before)
    }

    /// Replace the element with the same ID wholesale.
    pub(crate) fn replace(&mut self, element: Element) -> EditorResult<()> {
        let slot = self
            .elements
            .iter_mut()
            .find(|e| e.id == element.id)
            .ok_or(EditorError::ElementNotFound(element.id))?;
        *slot = element;
        Ok(())
    }

    /// Remove an element, returning its former index and the element.
    ///
    /// Clears the selection if it pointed at the removed element.
    pub(crate) fn take(&mut self, id: ElementId) -> EditorResult<(usize, Element)> {
        let index = self.index_of(id).ok_or(EditorError::ElementNotFound(id))?;
        let element = self.elements.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok((index, element))
    }

    /// Set or clear the selection.
    pub(crate) fn set_selection(&mut self, id: Option<ElementId>) -> EditorResult<()> {
        if let Some(id) = id {
            if self.index_of(id).is_none() {
                return Err(EditorError::ElementNotFound(id));
            }
        }
        self.selected = id;
        Ok(())
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Position of an element in z-order.
    #[must_use]
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// All elements, bottom to top.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// All elements as a slice, bottom to top.
    #[must_use]
    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    /// The selected element ID.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.get_element(id))
    }

    /// Find the topmost element containing the given canvas point.
    #[must_use]
    pub fn element_at(&self, x: f64, y: f64) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains_point(x, y))
            .map(|e| e.id)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string(self).map_err(EditorError::Serialization)
    }

    /// Deserialize a document from JSON, checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, element IDs repeat, or the
    /// selection names a missing element.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementFactory, ElementKind, Transform};

    fn placed(kind: ElementKind, x: f64, y: f64) -> Element {
        let (width, height) = ElementFactory::default_size(kind);
        Element::new(kind).with_transform(Transform {
            x,
            y,
            width,
            height,
        })
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut doc = Document::new();
        assert!(doc.is_empty());

        let a = doc.push(placed(ElementKind::Button, 0.0, 0.0));
        let b = doc.push(placed(ElementKind::Text, 0.0, 0.0));
        let c = doc.push(placed(ElementKind::Input, 0.0, 0.0));

        let order: Vec<_> = doc.elements().map(|e| e.id).collect();
        assert_eq!(order, vec![a, b, c]);
        assert_eq!(doc.index_of(c), Some(2));
        assert!(doc.selection().is_none());
    }

    #[test]
    fn test_take_clears_matching_selection_only() {
        let mut doc = Document::new();
        let a = doc.push(placed(ElementKind::Button, 0.0, 0.0));
        let b = doc.push(placed(ElementKind::Button, 0.0, 0.0));

        doc.set_selection(Some(a)).expect("select");
        doc.take(b).expect("remove b");
        assert_eq!(doc.selection(), Some(a));

        doc.take(a).expect("remove a");
        assert!(doc.selection().is_none());
    }

    #[test]
    fn test_missing_ids_leave_document_untouched() {
        let mut doc = Document::new();
        doc.push(placed(ElementKind::Container, 0.0, 0.0));
        let before = doc.clone();
        let ghost = ElementId::new();

        assert!(matches!(doc.take(ghost), Err(EditorError::ElementNotFound(id)) if id == ghost));
        assert!(doc.patch(ghost, &ElementPatch::content("x")).is_err());
        assert!(doc.set_selection(Some(ghost)).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_element_at_returns_topmost() {
        let mut doc = Document::new();
        let bottom = doc.push(placed(ElementKind::Container, 0.0, 0.0));
        let top = doc.push(placed(ElementKind::Button, 50.0, 50.0));

        assert_eq!(doc.element_at(60.0, 60.0), Some(top));
        assert_eq!(doc.element_at(10.0, 10.0), Some(bottom));
        assert_eq!(doc.element_at(500.0, 500.0), None);
    }

    #[test]
    fn test_from_elements_rejects_duplicates() {
        let element = placed(ElementKind::Text, 0.0, 0.0);
        let result = Document::from_elements(vec![element.clone(), element]);
        assert!(matches!(result, Err(EditorError::DuplicateElementId(_))));
    }

    #[test]
    fn test_json_round_trip_and_dangling_selection() {
        let mut doc = Document::new();
        let id = doc.push(ElementFactory::default().create(ElementKind::Button));
        doc.set_selection(Some(id)).expect("select");

        let json = doc.to_json().expect("to json");
        let restored = Document::from_json(&json).expect("from json");
        assert_eq!(restored, doc);

        let mut broken = doc.clone();
        broken.selected = Some(ElementId::new());
        let json = broken.to_json().expect("to json");
        assert!(Document::from_json(&json).is_err());
    }
}
