//! Shared session storage for multi-threaded hosts.
//!
//! The editing core is single-threaded. Hosts that drive several sessions,
//! or touch one session from several threads, keep their editors in a
//! [`SessionRegistry`], which serializes writers behind one lock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Document, EditorConfig, EditorError, EditorState};

/// Default session identifier.
pub const DEFAULT_SESSION: &str = "default";

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The requested session does not exist.
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    /// An editor operation inside the session failed.
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Thread-safe map of session ID to editor state.
///
/// # Example
///
/// ```
/// use layout_core::session::{SessionRegistry, DEFAULT_SESSION};
/// use layout_core::ElementKind;
///
/// let registry = SessionRegistry::new();
/// let id = registry
///     .update(DEFAULT_SESSION, |editor| editor.store.create(ElementKind::Text))
///     .unwrap();
///
/// let doc = registry.document(DEFAULT_SESSION).unwrap();
/// assert!(doc.get_element(id).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, EditorState>>>,
    config: EditorConfig,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// Create a registry holding an empty default session.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create a registry whose sessions use `config`.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        let mut sessions = HashMap::new();
        sessions.insert(
            DEFAULT_SESSION.to_string(),
            EditorState::new(config.clone()),
        );
        Self {
            sessions: Arc::new(RwLock::new(sessions)),
            config,
        }
    }

    /// Create a session if it does not exist yet.
    ///
    /// Returns `true` if a new session was created.
    pub fn get_or_create(&self, session_id: &str) -> bool {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if sessions.contains_key(session_id) {
            return false;
        }
        sessions.insert(
            session_id.to_string(),
            EditorState::new(self.config.clone()),
        );
        tracing::info!(session_id, "Created editing session");
        true
    }

    /// Read a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionNotFound`] if the session does not exist.
    pub fn read<F, T>(&self, session_id: &str, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&EditorState) -> T,
    {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let editor = sessions
            .get(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;
        Ok(f(editor))
    }

    /// Mutate a session while holding the write lock.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionNotFound`] if the session does not exist.
    pub fn update<F, T>(&self, session_id: &str, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut EditorState) -> T,
    {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let editor = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;
        Ok(f(editor))
    }

    /// Mutate a session with a fallible editor operation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionNotFound`] if the session does not
    /// exist, or [`SessionError::Editor`] if `f` fails.
    pub fn try_update<F, T>(&self, session_id: &str, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut EditorState) -> Result<T, EditorError>,
    {
        self.update(session_id, f)?.map_err(SessionError::from)
    }

    /// Snapshot a session's document.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionNotFound`] if the session does not exist.
    pub fn document(&self, session_id: &str) -> Result<Document, SessionError> {
        self.read(session_id, |editor| editor.store.document().clone())
    }

    /// Discard a session.
    ///
    /// Returns `true` if the session existed.
    pub fn remove(&self, session_id: &str) -> bool {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let removed = sessions.remove(session_id).is_some();
        if removed {
            tracing::info!(session_id, "Closed editing session");
        }
        removed
    }

    /// List all session IDs.
    #[must_use]
    pub fn session_ids(&self) -> Vec<String> {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.keys().cloned().collect()
    }
}
