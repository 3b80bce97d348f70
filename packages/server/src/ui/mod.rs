//! UI layer: axum server exposing the WebSocket endpoint and a small HTTP API.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
