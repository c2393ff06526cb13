//! Error types for editor operations.

use thiserror::Error;

use crate::ElementId;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Element type name outside the closed set of placeable primitives.
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    /// Element not found in the document.
    ///
    /// The document is left untouched whenever this is returned.
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    /// Two elements in one document share an ID.
    #[error("Duplicate element id: {0}")]
    DuplicateElementId(ElementId),

    /// A geometry update carried a value that cannot be placed on the canvas.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Document or configuration serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
