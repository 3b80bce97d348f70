//! WebSocket event DTOs.
//!
//! Every frame is a JSON object `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Event received from a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEventDto {
    /// Payload is the display name
    UserJoin(String),
    SendMessage(SendMessagePayload),
    PrivateMessage(PrivateMessagePayload),
    /// Payload is whether the client is composing a message
    Typing(bool),
}

/// Unknown fields (e.g. a client-side `timestamp`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateMessagePayload {
    /// Connection id of the recipient
    pub to: String,
    pub message: String,
}

/// Event pushed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEventDto {
    Connected(ConnectedPayload),
    UserList(Vec<ParticipantInfo>),
    UserJoined(PresenceNotice),
    UserLeft(PresenceNotice),
    ReceiveMessage(ChatMessage),
    PrivateMessage(ChatMessage),
    TypingUsers(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedPayload {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub id: String,
    pub username: String,
}

/// Participant fields plus the system notice describing the change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceNotice {
    #[serde(flatten)]
    pub participant: ParticipantInfo,
    pub notice: ChatMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub from: String,
    pub message: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    pub kind: MessageType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Broadcast,
    Private,
    System,
}
