//! The document store - single point of mutation for a design.
//!
//! [`DocumentStore`] owns the [`Document`], the undo [`History`] and the
//! element factory. Every mutation goes through one of its methods, is
//! recorded for undo, and is announced to subscribed observers.
//!
//! # Example
//!
//! ```
//! use layout_core::{DocumentStore, ElementKind};
//!
//! let mut store = DocumentStore::new();
//! let id = store.create(ElementKind::Button);
//! store.select(Some(id)).unwrap();
//! store.resize_by(id, -500.0, -500.0).unwrap();
//!
//! let button = store.document().get_element(id).unwrap();
//! assert_eq!(button.transform.width, 50.0);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    Document, Edit, EditorConfig, EditorError, EditorResult, Element, ElementFactory, ElementId,
    ElementKind, ElementPatch, History, StyleMap,
};

/// What a successful mutation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Change {
    /// An element was inserted.
    Added(ElementId),
    /// An element's geometry, content or styles changed.
    Updated(ElementId),
    /// An element was removed.
    Removed(ElementId),
    /// The selection changed.
    SelectionChanged(Option<ElementId>),
}

/// Callback invoked after each mutation with the new document state.
pub type Observer = Arc<dyn Fn(&Document, &Change) + Send + Sync>;

/// A document-level operation, as produced by command interpreters and
/// replayed by [`DocumentStore::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Create a new element of the given kind.
    Add {
        /// Element type.
        kind: ElementKind,
    },
    /// Merge fields into an element.
    Update {
        /// Target element.
        id: ElementId,
        /// Fields to merge.
        patch: ElementPatch,
    },
    /// Remove an element.
    Delete {
        /// Target element.
        id: ElementId,
    },
    /// Set or clear the selection.
    Select {
        /// Element to select, or `None` to clear.
        id: Option<ElementId>,
    },
}

/// Owns a document and mediates every change to it.
#[derive(Clone)]
pub struct DocumentStore {
    document: Document,
    history: History,
    factory: ElementFactory,
    config: EditorConfig,
    observers: Vec<Observer>,
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("document", &self.document)
            .field("history", &self.history)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: Document::new(),
            history: History::with_max_levels(config.history_limit),
            factory: ElementFactory::from_config(&config),
            config,
            observers: Vec::new(),
        }
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The undo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.document.selection()
    }

    /// Register an observer called after every successful mutation.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&Document, &Change) + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
    }

    fn notify(&self, change: Change) {
        for observer in &self.observers {
            observer(&self.document, &change);
        }
    }

    /// Create an element of the given kind with editor defaults and append it.
    pub fn create(&mut self, kind: ElementKind) -> ElementId {
        let element = self.factory.create(kind);
        self.append(element)
    }

    /// Create an element from a type name and append it.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownElementType`] for names outside the
    /// closed set.
    pub fn create_named(&mut self, type_name: &str) -> EditorResult<ElementId> {
        let element = self.factory.create_named(type_name)?;
        Ok(self.append(element))
    }

    /// Append a caller-built element on top of the z-order. Does not change
    /// the selection.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::DuplicateElementId`] if an element with the
    /// same ID is already present. The document and history are unchanged.
    pub fn add(&mut self, element: Element) -> EditorResult<ElementId> {
        if self.document.get_element(element.id).is_some() {
            tracing::warn!(id = %element.id, "Rejected element with duplicate id");
            return Err(EditorError::DuplicateElementId(element.id));
        }
        Ok(self.append(element))
    }

    /// Append an element whose ID is known to be fresh.
    fn append(&mut self, element: Element) -> ElementId {
        let index = self.document.len();
        let id = self.document.push(element.clone());
        self.history.record(Edit::Add { index, element });
        tracing::debug!(%id, index, "Added element");
        self.notify(Change::Added(id));
        id
    }

    /// Merge `patch` into the element with the given ID.
    ///
    /// A `styles` field replaces the whole style map.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ElementNotFound`] if `id` is absent and
    /// [`EditorError::InvalidGeometry`] for non-finite numbers. The document
    /// is unchanged in both cases.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> EditorResult<()> {
        patch.validate()?;
        let before = self.document.patch(id, patch).map_err(|e| {
            tracing::warn!(%id, "Update of missing element ignored");
            e
        })?;
        let Some(after) = self.document.get_element(id).cloned() else {
            return Err(EditorError::ElementNotFound(id));
        };
        if before == after {
            return Ok(());
        }
        self.history.record(Edit::Update { before, after });
        tracing::debug!(%id, ?patch, "Updated element");
        self.notify(Change::Updated(id));
        Ok(())
    }

    /// Remove an element. Clears the selection if it pointed at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ElementNotFound`] if `id` is absent.
    pub fn delete(&mut self, id: ElementId) -> EditorResult<()> {
        let was_selected = self.document.selection() == Some(id);
        let (index, element) = self.document.take(id).map_err(|e| {
            tracing::warn!(%id, "Delete of missing element ignored");
            e
        })?;
        self.history.record(Edit::Delete { index, element });
        tracing::debug!(%id, index, "Deleted element");
        self.notify(Change::Removed(id));
        if was_selected {
            self.notify(Change::SelectionChanged(None));
        }
        Ok(())
    }

    /// Set or clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ElementNotFound`] if `id` names no element; the
    /// selection is left as it was.
    pub fn select(&mut self, id: Option<ElementId>) -> EditorResult<()> {
        if self.document.selection() == id {
            return Ok(());
        }
        self.document.set_selection(id)?;
        tracing::debug!(?id, "Selection changed");
        self.notify(Change::SelectionChanged(id));
        Ok(())
    }

    /// Move an element to absolute canvas coordinates. No clamping is applied.
    ///
    /// # Errors
    ///
    /// See [`DocumentStore::update`].
    pub fn move_to(&mut self, id: ElementId, x: f64, y: f64) -> EditorResult<()> {
        self.update(id, &ElementPatch::position(x, y))
    }

    /// Resize an element from the size it had when the gesture started by a
    /// cumulative delta. The result never drops below the configured floor.
    ///
    /// # Errors
    ///
    /// See [`DocumentStore::update`].
    pub fn resize(
        &mut self,
        id: ElementId,
        start_width: f64,
        start_height: f64,
        delta_x: f64,
        delta_y: f64,
    ) -> EditorResult<()> {
        let (width, height) = self
            .config
            .resized(start_width, start_height, delta_x, delta_y);
        self.update(id, &ElementPatch::size(width, height))
    }

    /// Resize an element relative to its current size.
    ///
    /// # Errors
    ///
    /// See [`DocumentStore::update`].
    pub fn resize_by(&mut self, id: ElementId, delta_x: f64, delta_y: f64) -> EditorResult<()> {
        let t = self
            .document
            .get_element(id)
            .map(|e| e.transform)
            .ok_or(EditorError::ElementNotFound(id))?;
        self.resize(id, t.width, t.height, delta_x, delta_y)
    }

    /// Replace an element's content.
    ///
    /// # Errors
    ///
    /// See [`DocumentStore::update`].
    pub fn set_content(&mut self, id: ElementId, content: impl Into<String>) -> EditorResult<()> {
        self.update(id, &ElementPatch::content(content))
    }

    /// Set one style property, keeping the others.
    ///
    /// # Errors
    ///
    /// See [`DocumentStore::update`].
    pub fn set_style(
        &mut self,
        id: ElementId,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> EditorResult<()> {
        let styles: StyleMap = self
            .document
            .get_element(id)
            .map(|e| e.styles.clone().with(property, value))
            .ok_or(EditorError::ElementNotFound(id))?;
        self.update(id, &ElementPatch::styles(styles))
    }

    /// Apply a single operation.
    ///
    /// Returns the ID of the element the operation created or touched, if any.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying store method.
    pub fn apply(&mut self, operation: &Operation) -> EditorResult<Option<ElementId>> {
        match operation {
            Operation::Add { kind } => Ok(Some(self.create(*kind))),
            Operation::Update { id, patch } => self.update(*id, patch).map(|()| Some(*id)),
            Operation::Delete { id } => self.delete(*id).map(|()| Some(*id)),
            Operation::Select { id } => self.select(*id).map(|()| *id),
        }
    }

    /// Revert the most recent mutation.
    ///
    /// Returns `false` if there was nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded edit no longer matches the document.
    pub fn undo(&mut self) -> EditorResult<bool> {
        let selected = self.document.selection();
        let Some(edit) = self.history.undo(&mut self.document)? else {
            return Ok(false);
        };
        let id = edit.element_id();
        tracing::debug!(%id, action = edit.action(), "Undid edit");
        self.notify(match edit {
            Edit::Add { .. } => Change::Removed(id),
            Edit::Update { .. } => Change::Updated(id),
            Edit::Delete { .. } => Change::Added(id),
        });
        self.notify_selection_loss(selected);
        Ok(true)
    }

    /// Reapply the most recently undone mutation.
    ///
    /// Returns `false` if there was nothing to redo.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded edit no longer matches the document.
    pub fn redo(&mut self) -> EditorResult<bool> {
        let selected = self.document.selection();
        let Some(edit) = self.history.redo(&mut self.document)? else {
            return Ok(false);
        };
        let id = edit.element_id();
        tracing::debug!(%id, action = edit.action(), "Redid edit");
        self.notify(match edit {
            Edit::Add { .. } => Change::Added(id),
            Edit::Update { .. } => Change::Updated(id),
            Edit::Delete { .. } => Change::Removed(id),
        });
        self.notify_selection_loss(selected);
        Ok(true)
    }

    fn notify_selection_loss(&self, previous: Option<ElementId>) {
        if previous.is_some() && self.document.selection().is_none() {
            self.notify(Change::SelectionChanged(None));
        }
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
