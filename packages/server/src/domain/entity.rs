//! Entities.

use super::value_object::{ConnectionId, DisplayName, Timestamp};

/// One joined, currently connected chat user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub name: DisplayName,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(id: ConnectionId, name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            joined_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Broadcast,
    Private,
    System,
}

/// Outbound chat message. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender_name: String,
    body: String,
    timestamp: Timestamp,
    kind: MessageKind,
}

impl Message {
    pub fn new(sender_name: String, body: String, timestamp: Timestamp, kind: MessageKind) -> Self {
        Self {
            sender_name,
            body,
            timestamp,
            kind,
        }
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }
}
