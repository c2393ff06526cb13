//! Editor interaction state.
//!
//! [`EditorState`] sits between the rendering layer and the
//! [`DocumentStore`]: it tracks in-place editing and the canvas viewport, and
//! translates [`CanvasEvent`]s and text commands into store operations.

use crate::{
    CanvasEvent, CommandContext, CommandInterpreter, CommandOutcome, DocumentStore, EditorConfig,
    EditorError, EditorResult, ElementId, ElementKind, Viewport,
};

/// The complete interactive editor state for one session.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// The document store.
    pub store: DocumentStore,
    /// Element whose content is being edited in place.
    editing: Option<ElementId>,
    /// Visible canvas size, once the renderer has reported it.
    viewport: Option<Viewport>,
}

impl EditorState {
    /// Create an editor with the given configuration.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let viewport = config.viewport;
        Self {
            store: DocumentStore::with_config(config),
            editing: None,
            viewport,
        }
    }

    /// Element currently being edited in place.
    #[must_use]
    pub fn editing(&self) -> Option<ElementId> {
        self.editing
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Process a gesture from the rendering layer.
    ///
    /// Gestures that reference elements no longer in the document are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidGeometry`] for non-finite coordinates.
    pub fn process_event(&mut self, event: &CanvasEvent) -> EditorResult<()> {
        match self.dispatch(event) {
            Err(EditorError::ElementNotFound(id)) => {
                tracing::debug!(%id, ?event, "Dropped event for missing element");
                Ok(())
            }
            other => other,
        }
    }

    fn dispatch(&mut self, event: &CanvasEvent) -> EditorResult<()> {
        match event {
            CanvasEvent::Click { target } => {
                if self.editing.is_some() && self.editing != *target {
                    self.editing = None;
                }
                self.store.select(*target)
            }
            CanvasEvent::DoubleClick { id } => {
                let kind = self
                    .store
                    .document()
                    .get_element(*id)
                    .map(|e| e.kind)
                    .ok_or(EditorError::ElementNotFound(*id))?;
                if kind != ElementKind::Container {
                    self.editing = Some(*id);
                }
                Ok(())
            }
            CanvasEvent::EditInput { id, text } => {
                if self.editing != Some(*id) {
                    tracing::debug!(%id, "Ignoring input for element not in edit mode");
                    return Ok(());
                }
                self.store.set_content(*id, text.as_str())
            }
            CanvasEvent::Blur => {
                self.editing = None;
                Ok(())
            }
            CanvasEvent::Key { key, modifiers } => match key.as_str() {
                "Enter" if !modifiers.shift => {
                    self.editing = None;
                    Ok(())
                }
                "Delete" => match self.store.selection() {
                    Some(id) if self.editing != Some(id) => self.store.delete(id),
                    _ => Ok(()),
                },
                _ => Ok(()),
            },
            CanvasEvent::DragStop { id, x, y } => self.store.move_to(*id, *x, *y),
            CanvasEvent::Resize {
                id,
                start_width,
                start_height,
                delta_x,
                delta_y,
            } => self
                .store
                .resize(*id, *start_width, *start_height, *delta_x, *delta_y),
            CanvasEvent::ViewportResized { width, height } => {
                self.viewport = Some(Viewport::new(*width, *height));
                Ok(())
            }
        }
    }

    /// Interpret a text command and apply the resulting operations.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while applying the planned operations.
    pub fn run_command<I>(
        &mut self,
        interpreter: &mut I,
        input: &str,
    ) -> EditorResult<CommandOutcome>
    where
        I: CommandInterpreter + ?Sized,
    {
        let context = CommandContext::from_document(self.store.document(), self.viewport);
        let outcome = interpreter.interpret(input, &context);
        outcome.apply_to(&mut self.store)?;
        if self
            .editing
            .is_some_and(|id| self.store.document().get_element(id).is_none())
        {
            self.editing = None;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandIntent, KeyModifiers, KeywordInterpreter};

    fn editor_with(kind: ElementKind) -> (EditorState, ElementId) {
        let mut editor = EditorState::default();
        let id = editor.store.create(kind);
        (editor, id)
    }

    fn element(editor: &EditorState, id: ElementId) -> &crate::Element {
        editor.store.document().get_element(id).expect("element")
    }

    #[test]
    fn test_click_selects_and_canvas_click_clears() {
        let (mut editor, id) = editor_with(ElementKind::Button);
        editor
            .process_event(&CanvasEvent::Click { target: Some(id) })
            .expect("click");
        assert_eq!(editor.store.selection(), Some(id));

        editor
            .process_event(&CanvasEvent::Click { target: None })
            .expect("click canvas");
        assert!(editor.store.selection().is_none());
    }

    #[test]
    fn test_edit_flow() {
        let (mut editor, id) = editor_with(ElementKind::Text);
        editor
            .process_event(&CanvasEvent::EditInput {
                id,
                text: "ignored".into(),
            })
            .expect("input");
        assert_eq!(element(&editor, id).content, crate::DEFAULT_TEXT_CONTENT);

        editor
            .process_event(&CanvasEvent::DoubleClick { id })
            .expect("double click");
        assert_eq!(editor.editing(), Some(id));
        editor
            .process_event(&CanvasEvent::EditInput {
                id,
                text: "Welcome".into(),
            })
            .expect("input");
        editor
            .process_event(&CanvasEvent::key("Enter"))
            .expect("enter");
        assert!(editor.editing().is_none());
        assert_eq!(element(&editor, id).content, "Welcome");
    }

    #[test]
    fn test_shift_enter_keeps_editing() {
        let (mut editor, id) = editor_with(ElementKind::Text);
        editor
            .process_event(&CanvasEvent::DoubleClick { id })
            .expect("double click");
        editor
            .process_event(&CanvasEvent::Key {
                key: "Enter".into(),
                modifiers: KeyModifiers {
                    shift: true,
                    ..KeyModifiers::default()
                },
            })
            .expect("shift enter");
        assert_eq!(editor.editing(), Some(id));
        editor.process_event(&CanvasEvent::Blur).expect("blur");
        assert!(editor.editing().is_none());
    }

    #[test]
    fn test_containers_are_not_editable() {
        let (mut editor, id) = editor_with(ElementKind::Container);
        editor
            .process_event(&CanvasEvent::DoubleClick { id })
            .expect("double click");
        assert!(editor.editing().is_none());
    }

    #[test]
    fn test_delete_key_respects_editing() {
        let (mut editor, id) = editor_with(ElementKind::Button);
        editor
            .process_event(&CanvasEvent::Click { target: Some(id) })
            .expect("select");
        editor
            .process_event(&CanvasEvent::DoubleClick { id })
            .expect("edit");

        editor
            .process_event(&CanvasEvent::key("Delete"))
            .expect("delete while editing");
        assert_eq!(editor.store.document().len(), 1);

        editor.process_event(&CanvasEvent::Blur).expect("blur");
        editor
            .process_event(&CanvasEvent::key("Delete"))
            .expect("delete");
        assert!(editor.store.document().is_empty());
        assert!(editor.store.selection().is_none());
    }

    #[test]
    fn test_drag_and_resize() {
        let (mut editor, id) = editor_with(ElementKind::Button);
        editor
            .process_event(&CanvasEvent::DragStop {
                id,
                x: -40.0,
                y: 15.0,
            })
            .expect("drag");
        editor
            .process_event(&CanvasEvent::Resize {
                id,
                start_width: 120.0,
                start_height: 40.0,
                delta_x: -100.0,
                delta_y: 25.0,
            })
            .expect("resize");

        let t = element(&editor, id).transform;
        assert!((t.x + 40.0).abs() < f64::EPSILON);
        assert!((t.y - 15.0).abs() < f64::EPSILON);
        assert!((t.width - 50.0).abs() < f64::EPSILON);
        assert!((t.height - 65.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_events_for_missing_elements_are_dropped() {
        let mut editor = EditorState::default();
        let ghost = ElementId::new();
        editor
            .process_event(&CanvasEvent::DragStop {
                id: ghost,
                x: 1.0,
                y: 1.0,
            })
            .expect("dropped");
        editor
            .process_event(&CanvasEvent::Click {
                target: Some(ghost),
            })
            .expect("dropped");
        assert!(editor.store.selection().is_none());
    }

    #[test]
    fn test_nan_drag_is_an_error() {
        let (mut editor, id) = editor_with(ElementKind::Button);
        let result = editor.process_event(&CanvasEvent::DragStop {
            id,
            x: f64::NAN,
            y: 0.0,
        });
        assert!(matches!(result, Err(EditorError::InvalidGeometry(_))));
    }

    #[test]
    fn test_center_command_uses_reported_viewport() {
        let (mut editor, id) = editor_with(ElementKind::Input);
        let mut interpreter = KeywordInterpreter::seeded(3);
        editor.store.select(Some(id)).expect("select");

        let outcome = editor
            .run_command(&mut interpreter, "center please")
            .expect("command");
        assert_eq!(outcome.intent, CommandIntent::Center);
        assert!(outcome.operations.is_empty());

        editor
            .process_event(&CanvasEvent::ViewportResized {
                width: 1000.0,
                height: 500.0,
            })
            .expect("viewport");
        editor
            .run_command(&mut interpreter, "center please")
            .expect("command");
        let t = element(&editor, id).transform;
        assert!((t.x - 400.0).abs() < f64::EPSILON);
        assert!((t.y - 230.0).abs() < f64::EPSILON);
    }
}
