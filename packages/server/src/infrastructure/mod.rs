//! Infrastructure layer: port implementations and wire DTOs.

pub mod dto;
pub mod message_pusher;
