//! # Saorsa Layout Export
//!
//! Turns a [`layout_core::Document`] into a standalone HTML page.
//!
//! ```text
//! ┌──────────────┐   export()   ┌─────────────────────────────┐
//! │   Document   │ ───────────▶ │ <!DOCTYPE html> ... </html> │
//! └──────────────┘              └─────────────────────────────┘
//! ```
//!
//! Each element becomes one absolutely positioned tag, in document order.
//! Content and attribute values are escaped before they are embedded.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod html;

pub use error::{ExportError, ExportResult};
pub use html::{
    escape_html, export_html, to_css_property, ExportArtifact, ExportConfig, HtmlExporter,
    EXPORT_FILE_NAME, EXPORT_MIME_TYPE,
};
