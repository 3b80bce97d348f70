//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /api/participants`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceDto {
    pub participants: Vec<ParticipantDetailDto>,
    pub typing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub id: String,
    pub username: String,
    /// RFC 3339, UTC
    pub joined_at: String,
}
