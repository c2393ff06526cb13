//! Input events from the rendering layer.
//!
//! The renderer captures pointer and keyboard gestures and reports them as
//! [`CanvasEvent`]s; [`EditorState`](crate::EditorState) turns them into
//! store operations.

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    pub shift: bool,
    /// Control key pressed.
    pub ctrl: bool,
    /// Alt/Option key pressed.
    pub alt: bool,
    /// Meta/Command key pressed.
    pub meta: bool,
}

/// A gesture reported by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CanvasEvent {
    /// Click on an element, or on empty canvas when `target` is `None`.
    Click {
        /// Element under the pointer.
        target: Option<ElementId>,
    },

    /// Double click on an element; starts in-place editing.
    DoubleClick {
        /// Element under the pointer.
        id: ElementId,
    },

    /// Text typed into the in-place editor.
    EditInput {
        /// Element being edited.
        id: ElementId,
        /// Full new content.
        text: String,
    },

    /// The in-place editor lost focus.
    Blur,

    /// A key press.
    Key {
        /// Key name (`"Enter"`, `"Delete"`, ...).
        key: String,
        /// Active modifier keys.
        modifiers: KeyModifiers,
    },

    /// A drag ended with the element's top-left corner at `(x, y)`.
    DragStop {
        /// Dragged element.
        id: ElementId,
        /// Absolute X coordinate.
        x: f64,
        /// Absolute Y coordinate.
        y: f64,
    },

    /// The resize handle moved. Deltas are cumulative since the gesture began.
    Resize {
        /// Resized element.
        id: ElementId,
        /// Width when the gesture began.
        start_width: f64,
        /// Height when the gesture began.
        start_height: f64,
        /// Horizontal pointer travel.
        delta_x: f64,
        /// Vertical pointer travel.
        delta_y: f64,
    },

    /// The visible canvas changed size.
    ViewportResized {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
    },
}

impl CanvasEvent {
    /// Key press without modifiers.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key {
            key: key.into(),
            modifiers: KeyModifiers::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let id = ElementId::new();
        let event = CanvasEvent::DragStop {
            id,
            x: 5.0,
            y: -2.5,
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "DragStop");
        assert_eq!(json["data"]["x"], 5.0);

        let back: CanvasEvent = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, event);
    }

    #[test]
    fn test_key_helper_has_no_modifiers() {
        let CanvasEvent::Key { key, modifiers } = CanvasEvent::key("Delete") else {
            panic!("expected key event");
        };
        assert_eq!(key, "Delete");
        assert_eq!(modifiers, KeyModifiers::default());
    }
}
