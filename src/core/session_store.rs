//! Persistent collection of chat sessions.
//!
//! The whole collection is stored as one JSON array under [`SESSIONS_KEY`] and
//! rewritten on every change. There is no locking across the read-modify-write
//! cycle: two processes writing at once can lose each other's updates.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::session::ChatSession;
use crate::core::storage::{KeyValueStore, StorageError};

pub const SESSIONS_KEY: &str = "chat_sessions";

#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All stored sessions in insertion order; empty when nothing is stored
    /// or the stored data cannot be read.
    pub fn list_all(&self) -> Vec<ChatSession> {
        let raw = match self.store.get(SESSIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("Error retrieving chat sessions: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(sessions) => sessions,
            Err(err) => {
                warn!("Stored chat sessions are corrupt, ignoring them: {err}");
                Vec::new()
            }
        }
    }

    pub fn get_by_id(&self, id: &str) -> Option<ChatSession> {
        self.list_all().into_iter().find(|session| session.id == id)
    }

    /// Overwrite the session with the same id in place, or append it.
    pub fn save(&self, session: &ChatSession) -> Result<(), StorageError> {
        let mut sessions = self.list_all();
        match sessions.iter_mut().find(|stored| stored.id == session.id) {
            Some(stored) => *stored = session.clone(),
            None => sessions.push(session.clone()),
        }
        self.write_all(&sessions)?;
        debug!(session_id = %session.id, total = sessions.len(), "saved chat session");
        Ok(())
    }

    /// Remove a session. Deleting an unknown id still succeeds; only a failed
    /// write reports `false`.
    pub fn delete_by_id(&self, id: &str) -> bool {
        let mut sessions = self.list_all();
        sessions.retain(|session| session.id != id);
        match self.write_all(&sessions) {
            Ok(()) => true,
            Err(err) => {
                warn!("Error deleting chat session {id}: {err}");
                false
            }
        }
    }

    fn write_all(&self, sessions: &[ChatSession]) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(sessions)?;
        self.store.set(SESSIONS_KEY, &serialized)
    }
}
