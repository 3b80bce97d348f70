//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ParticipantDetailDto, PresenceDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current roster (join order) and typing snapshot
pub async fn get_participants(State(state): State<Arc<AppState>>) -> Json<PresenceDto> {
    let roster = state.coordinator.roster().await;
    let typing = state.coordinator.typing_users().await;

    // Domain Model から DTO への変換
    Json(PresenceDto {
        participants: roster.iter().map(ParticipantDetailDto::from).collect(),
        typing,
    })
}
