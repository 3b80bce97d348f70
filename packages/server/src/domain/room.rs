//! ChatRoom aggregate: registry, typing set and per-connection session states.
//!
//! All presence state lives here so the coordinator can mutate it as one unit
//! under a single lock.

use std::collections::HashMap;

use super::{
    entity::Participant,
    error::RegistryError,
    registry::ConnectionRegistry,
    session::SessionState,
    typing::TypingSet,
    value_object::{ConnectionId, DisplayName, Timestamp},
};

#[derive(Debug, Clone, Default)]
pub struct ChatRoom {
    registry: ConnectionRegistry,
    typing: TypingSet,
    /// Open connections only. Closed ones are dropped, ids are never reused.
    sessions: HashMap<ConnectionId, SessionState>,
}

impl ChatRoom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly accepted connection as `Anonymous`.
    ///
    /// Returns `false` if the connection is already tracked.
    pub fn open_session(&mut self, connection_id: ConnectionId) -> bool {
        if self.sessions.contains_key(&connection_id) {
            return false;
        }
        self.sessions
            .insert(connection_id, SessionState::Anonymous);
        true
    }

    /// Current state; unknown connections are reported as `Closed`.
    pub fn session_state(&self, connection_id: &ConnectionId) -> SessionState {
        self.sessions
            .get(connection_id)
            .copied()
            .unwrap_or(SessionState::Closed)
    }

    /// Register the participant and mark its session `Active`.
    pub fn join(
        &mut self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        joined_at: Timestamp,
    ) -> Result<Participant, RegistryError> {
        let participant = self
            .registry
            .join(connection_id.clone(), display_name, joined_at)?;
        self.sessions.insert(connection_id, SessionState::Active);
        Ok(participant)
    }

    /// Close the session, removing the participant (if joined) and its typing entry.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        self.sessions.remove(connection_id);
        let participant = self.registry.remove(connection_id)?;
        self.typing.clear_for(connection_id);
        Some(participant)
    }

    pub fn set_typing(&mut self, connection_id: &ConnectionId, is_typing: bool) -> bool {
        self.typing
            .set_typing(&self.registry, connection_id, is_typing)
    }

    pub fn is_typing(&self, connection_id: &ConnectionId) -> bool {
        self.typing.is_typing(connection_id)
    }

    pub fn typing_snapshot(&self) -> Vec<String> {
        self.typing.snapshot(&self.registry)
    }

    pub fn roster(&self) -> Vec<Participant> {
        self.registry.all()
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn open_connections(&self) -> usize {
        self.sessions.len()
    }
}
