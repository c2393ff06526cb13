//! # Undo/Redo History
//!
//! Every document mutation is recorded as an [`Edit`] holding full element
//! snapshots, so it can be reverted and reapplied without consulting the
//! store.
//!
//! - Undo applies the inverse and moves the edit to the redo stack
//! - Redo reapplies the edit and moves it back
//! - Recording a new edit clears the redo stack
//! - Selection changes are not recorded

use serde::Serialize;

use crate::{Document, EditorResult, Element, ElementId};

/// A recorded document mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Edit {
    /// An element was appended at `index`.
    Add {
        /// Z-order position the element was placed at.
        index: usize,
        /// The element as created.
        element: Element,
    },
    /// An element's fields were merged.
    Update {
        /// Snapshot before the merge.
        before: Element,
        /// Snapshot after the merge.
        after: Element,
    },
    /// An element was removed from `index`.
    Delete {
        /// Z-order position the element occupied.
        index: usize,
        /// The removed element.
        element: Element,
    },
}

impl Edit {
    /// ID of the element this edit touched.
    #[must_use]
    pub fn element_id(&self) -> ElementId {
        match self {
            Self::Add { element, .. } | Self::Delete { element, .. } => element.id,
            Self::Update { after, .. } => after.id,
        }
    }

    /// Short action name: `add`, `update` or `delete`.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }

    fn revert(&self, doc: &mut Document) -> EditorResult<()> {
        match self {
            Self::Add { element, .. } => doc.take(element.id).map(|_| ()),
            Self::Update { before, .. } => doc.replace(before.clone()),
            Self::Delete { index, element } => {
                doc.insert(*index, element.clone());
                Ok(())
            }
        }
    }

    fn reapply(&self, doc: &mut Document) -> EditorResult<()> {
        match self {
            Self::Add { index, element } => {
                doc.insert(*index, element.clone());
                Ok(())
            }
            Self::Update { after, .. } => doc.replace(after.clone()),
            Self::Delete { element, .. } => doc.take(element.id).map(|_| ()),
        }
    }
}

/// Bounded undo/redo stacks.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Applied edits (most recent last).
    undo_stack: Vec<Edit>,
    /// Undone edits (most recent last).
    redo_stack: Vec<Edit>,
    /// Maximum number of undo levels (0 = unlimited).
    max_levels: usize,
}

impl History {
    /// Create a history with the given undo depth (0 = unlimited).
    #[must_use]
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record an applied edit.
    pub fn record(&mut self, edit: Edit) {
        self.undo_stack.push(edit);
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Revert the most recent edit.
    ///
    /// Returns the reverted edit, or `None` if there was nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns an error if the document no longer matches the recorded edit;
    /// the edit stays on the undo stack in that case.
    pub fn undo(&mut self, doc: &mut Document) -> EditorResult<Option<Edit>> {
        let Some(edit) = self.undo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = edit.revert(doc) {
            self.undo_stack.push(edit);
            return Err(e);
        }
        self.redo_stack.push(edit.clone());
        Ok(Some(edit))
    }

    /// Reapply the most recently undone edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the document no longer matches the recorded edit;
    /// the edit stays on the redo stack in that case.
    pub fn redo(&mut self, doc: &mut Document) -> EditorResult<Option<Edit>> {
        let Some(edit) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = edit.reapply(doc) {
            self.redo_stack.push(edit);
            return Err(e);
        }
        self.undo_stack.push(edit.clone());
        Ok(Some(edit))
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Applied edits, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Edit] {
        &self.undo_stack
    }

    /// Drop all recorded edits.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
