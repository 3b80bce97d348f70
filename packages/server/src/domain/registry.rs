//! Connection registry: the live set of participants, in join order.

use super::{
    entity::Participant,
    error::RegistryError,
    value_object::{ConnectionId, DisplayName, Timestamp},
};

/// Live participants keyed by connection id.
///
/// Membership is exactly "connections that joined and have not disconnected yet".
/// Stored in join order.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    participants: Vec<Participant>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant for `connection_id`.
    ///
    /// A second join on the same connection is rejected with
    /// [`RegistryError::DuplicateRegistration`] and leaves the registry unchanged.
    pub fn join(
        &mut self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        joined_at: Timestamp,
    ) -> Result<Participant, RegistryError> {
        if self.contains(&connection_id) {
            return Err(RegistryError::DuplicateRegistration(
                connection_id.into_string(),
            ));
        }

        let participant = Participant::new(connection_id, display_name, joined_at);
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Remove and return the participant for `connection_id`, if any.
    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.id == connection_id)?;
        Some(self.participants.remove(index))
    }

    pub fn find(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == connection_id)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.find(connection_id).is_some()
    }

    /// Point-in-time copy of the roster in join order.
    pub fn all(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    /// Connection ids of every participant, in join order.
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }

    /// Connection ids of every participant except `exclude`.
    pub fn connection_ids_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .filter(|p| &p.id != exclude)
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
