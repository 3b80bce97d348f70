//! Presence and messaging coordinator for the Hearth group chat.
//!
//! The crate tracks connected participants, fans broadcast messages out to
//! all of them, routes private messages to a single recipient and keeps the
//! transient "who is typing" set, all behind a WebSocket endpoint.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
