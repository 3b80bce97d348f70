//! Inbound client events and outbound notifications, independent of the wire format.

use super::{
    entity::{Message, Participant},
    value_object::ConnectionId,
};

/// Event sent by a client over its connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Join { display_name: String },
    SendMessage { body: String },
    PrivateMessage { to: ConnectionId, body: String },
    Typing { is_typing: bool },
}

impl ClientEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Join { .. } => EventKind::Join,
            Self::SendMessage { .. } => EventKind::SendMessage,
            Self::PrivateMessage { .. } => EventKind::PrivateMessage,
            Self::Typing { .. } => EventKind::Typing,
        }
    }
}

/// Everything that can drive a session transition, including the transport-level disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Join,
    SendMessage,
    PrivateMessage,
    Typing,
    Disconnect,
}

/// Notification pushed to one or many connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Tells a freshly accepted connection its own id.
    Connected { id: ConnectionId },
    UserList(Vec<Participant>),
    UserJoined {
        participant: Participant,
        notice: Message,
    },
    UserLeft {
        participant: Participant,
        notice: Message,
    },
    ReceiveMessage(Message),
    PrivateMessage(Message),
    TypingUsers(Vec<String>),
}

impl OutboundEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::UserList(_) => "user_list",
            Self::UserJoined { .. } => "user_joined",
            Self::UserLeft { .. } => "user_left",
            Self::ReceiveMessage(_) => "receive_message",
            Self::PrivateMessage(_) => "private_message",
            Self::TypingUsers(_) => "typing_users",
        }
    }
}
