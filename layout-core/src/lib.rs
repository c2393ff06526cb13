//! # Saorsa Layout Core
//!
//! Element model and manipulation engine for a direct-manipulation HTML
//! layout editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 layout-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Model           │  Interaction             │
//! │  - Styles        │  - Canvas events         │
//! │  - Elements      │  - In-place editing      │
//! │  - Document      │  - Text commands         │
//! ├─────────────────────────────────────────────┤
//! │  Document Store  │  Sessions                │
//! │  - Mutation API  │  - Multi-session map     │
//! │  - Undo/redo     │  - Single-writer lock    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! HTML export lives in the `layout-export` crate.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod factory;
pub mod history;
pub mod session;
pub mod state;
pub mod store;
pub mod style;

pub use command::{
    CommandContext, CommandIntent, CommandInterpreter, CommandOutcome, KeywordInterpreter,
    RECOLOR_PALETTE,
};
pub use config::{EditorConfig, Viewport, MIN_HEIGHT, MIN_WIDTH};
pub use document::Document;
pub use element::{Element, ElementId, ElementKind, ElementPatch, Transform};
pub use error::{EditorError, EditorResult};
pub use event::{CanvasEvent, KeyModifiers};
pub use factory::{ElementFactory, DEFAULT_BUTTON_LABEL, DEFAULT_TEXT_CONTENT};
pub use history::{Edit, History};
pub use session::{SessionError, SessionRegistry};
pub use state::EditorState;
pub use store::{Change, DocumentStore, Observer, Operation};
pub use style::{resolve_default_styles, resolve_default_styles_named, StyleMap};

/// Layout core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
