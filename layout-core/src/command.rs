//! # Command Interpretation
//!
//! Maps free-text instructions ("add a button", "make it blue", "center
//! this") to document [`Operation`]s.
//!
//! Interpreters only plan; they never touch the store. The caller applies
//! the returned operations, which keeps interpreters swappable:
//!
//! ```text
//! text + CommandContext ──► CommandInterpreter ──► CommandOutcome { intent, operations }
//!                                                              │
//!                                         DocumentStore::apply ◄┘
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::style::BACKGROUND_COLOR;
use crate::{
    Document, DocumentStore, EditorResult, Element, ElementId, ElementKind, ElementPatch,
    Operation, Viewport,
};

/// Colours the keyword interpreter picks from when asked to recolour.
pub const RECOLOR_PALETTE: [&str; 6] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899",
];

/// What the interpreter needs to know about the editor to plan operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandContext<'a> {
    /// The selected element, if any.
    pub selected: Option<&'a Element>,
    /// Current canvas viewport, if known.
    pub viewport: Option<Viewport>,
}

impl<'a> CommandContext<'a> {
    /// Build a context from a document's selection.
    #[must_use]
    pub fn from_document(document: &'a Document, viewport: Option<Viewport>) -> Self {
        Self {
            selected: document.selected_element(),
            viewport,
        }
    }

    /// ID of the selected element.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selected.map(|e| e.id)
    }
}

/// What an instruction was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "kind", rename_all = "snake_case")]
pub enum CommandIntent {
    /// Create an element of the given kind.
    Add(ElementKind),
    /// "add"/"create" without a recognisable element type.
    AddUnknown,
    /// Delete the selection.
    Delete,
    /// Give the selection a new background colour.
    Recolor,
    /// Center the selection in the viewport.
    Center,
    /// A request for usage help.
    Help,
    /// Nothing matched.
    Unrecognized,
}

impl CommandIntent {
    /// Reply text for the conversational layer.
    #[must_use]
    pub const fn acknowledgement(self) -> &'static str {
        match self {
            Self::Add(ElementKind::Button) => "✓ Button added to the canvas!",
            Self::Add(ElementKind::Input) => "✓ Input field added!",
            Self::Add(ElementKind::Text) => "✓ Text element added!",
            Self::Add(ElementKind::Container) => "✓ Container added!",
            Self::AddUnknown => {
                "I can add buttons, inputs, text, or containers. What would you like to add?"
            }
            Self::Delete => "✓ Selected element removed!",
            Self::Recolor => "✓ Background color changed!",
            Self::Center => "✓ Element centered on canvas!",
            Self::Help => {
                "I can help you:\n• Add elements (button, input, text, container)\n• Delete selected elements\n• Change colors\n• Center elements\n\nJust tell me what you want to do!"
            }
            Self::Unrecognized => {
                "I understand! Let me help you with that. Try selecting an element first, or ask me to add something new."
            }
        }
    }
}

/// The interpretation of one instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// What the instruction was recognised as.
    pub intent: CommandIntent,
    /// Operations to apply, in order. Empty when the intent cannot be
    /// satisfied (e.g. "delete" with nothing selected).
    pub operations: Vec<Operation>,
}

impl CommandOutcome {
    fn new(intent: CommandIntent, operations: Vec<Operation>) -> Self {
        Self { intent, operations }
    }

    /// Apply the planned operations to a store, in order.
    ///
    /// Returns the IDs the operations created or touched.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failing operation's error.
    pub fn apply_to(&self, store: &mut DocumentStore) -> EditorResult<Vec<ElementId>> {
        let mut touched = Vec::with_capacity(self.operations.len());
        for operation in &self.operations {
            if let Some(id) = store.apply(operation)? {
                touched.push(id);
            }
        }
        Ok(touched)
    }
}

/// Turns free text into planned document operations.
pub trait CommandInterpreter {
    /// Interpret `input` against the current editor context.
    fn interpret(&mut self, input: &str, context: &CommandContext<'_>) -> CommandOutcome;
}

/// Case-insensitive keyword matcher.
///
/// Keyword groups are checked in a fixed order and the first group with a
/// hit decides the intent, even if a later group would also match:
///
/// | Keywords | Intent |
/// |---|---|
/// | add / create + button | add button |
/// | add / create + input / text field | add input |
/// | add / create + text / heading | add text |
/// | add / create + container / box | add container |
/// | delete / remove | delete selection |
/// | color / background | recolour selection |
/// | center | center selection |
/// | help | help |
#[derive(Debug)]
pub struct KeywordInterpreter<R = StdRng> {
    rng: R,
}

impl KeywordInterpreter<StdRng> {
    /// Create an interpreter seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an interpreter with a fixed seed, for reproducible colour picks.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for KeywordInterpreter<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> KeywordInterpreter<R> {
    /// Create an interpreter drawing colours from `rng`.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn classify(text: &str) -> CommandIntent {
        if contains_any(text, &["add", "create"]) {
            if contains_any(text, &["button"]) {
                CommandIntent::Add(ElementKind::Button)
            } else if contains_any(text, &["input", "text field"]) {
                CommandIntent::Add(ElementKind::Input)
            } else if contains_any(text, &["text", "heading"]) {
                CommandIntent::Add(ElementKind::Text)
            } else if contains_any(text, &["container", "box"]) {
                CommandIntent::Add(ElementKind::Container)
            } else {
                CommandIntent::AddUnknown
            }
        } else if contains_any(text, &["delete", "remove"]) {
            CommandIntent::Delete
        } else if contains_any(text, &["color", "background"]) {
            CommandIntent::Recolor
        } else if contains_any(text, &["center"]) {
            CommandIntent::Center
        } else if contains_any(text, &["help"]) {
            CommandIntent::Help
        } else {
            CommandIntent::Unrecognized
        }
    }

    fn plan(&mut self, intent: CommandIntent, context: &CommandContext<'_>) -> Vec<Operation> {
        match intent {
            CommandIntent::Add(kind) => vec![Operation::Add { kind }],
            CommandIntent::Delete => context
                .selection()
                .map(|id| Operation::Delete { id })
                .into_iter()
                .collect(),
            CommandIntent::Recolor => {
                let Some(element) = context.selected else {
                    tracing::warn!("Recolor requested with nothing selected");
                    return Vec::new();
                };
                let Some(color) = RECOLOR_PALETTE.choose(&mut self.rng) else {
                    return Vec::new();
                };
                let styles = element.styles.clone().with(BACKGROUND_COLOR, *color);
                vec![Operation::Update {
                    id: element.id,
                    patch: ElementPatch::styles(styles),
                }]
            }
            CommandIntent::Center => {
                let (Some(element), Some(viewport)) = (context.selected, context.viewport) else {
                    tracing::warn!("Center requested without a selection or viewport");
                    return Vec::new();
                };
                let t = element.transform;
                vec![Operation::Update {
                    id: element.id,
                    patch: ElementPatch::position(
                        (viewport.width - t.width) / 2.0,
                        (viewport.height - t.height) / 2.0,
                    ),
                }]
            }
            CommandIntent::AddUnknown | CommandIntent::Help | CommandIntent::Unrecognized => {
                Vec::new()
            }
        }
    }
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

impl<R: Rng> CommandInterpreter for KeywordInterpreter<R> {
    fn interpret(&mut self, input: &str, context: &CommandContext<'_>) -> CommandOutcome {
        let text = input.to_lowercase();
        let intent = Self::classify(&text);
        let operations = self.plan(intent, context);
        tracing::debug!(input, ?intent, planned = operations.len(), "Interpreted command");
        CommandOutcome::new(intent, operations)
    }
}
