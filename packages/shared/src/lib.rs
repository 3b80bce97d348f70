//! Utilities shared by the Hearth crates: logging setup and time handling.

pub mod logger;
pub mod time;
