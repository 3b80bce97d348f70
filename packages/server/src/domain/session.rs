//! Per-connection session state machine.
//!
//! ```text
//! Anonymous --join--> Active --send_message | private_message | typing--> Active
//! Anonymous | Active --disconnect--> Closed
//! ```
//!
//! `Closed` is terminal: every event is rejected.

use super::event::EventKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, not joined yet
    Anonymous,
    /// Joined and present in the registry
    Active,
    /// Disconnected
    Closed,
}

impl SessionState {
    /// State after `event`, or `None` when the event is not defined in this state.
    pub fn next(self, event: EventKind) -> Option<SessionState> {
        match (self, event) {
            (Self::Anonymous, EventKind::Join) => Some(Self::Active),
            (
                Self::Active,
                EventKind::SendMessage | EventKind::PrivateMessage | EventKind::Typing,
            ) => Some(Self::Active),
            (Self::Anonymous | Self::Active, EventKind::Disconnect) => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn accepts(self, event: EventKind) -> bool {
        self.next(event).is_some()
    }
}
