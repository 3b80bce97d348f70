//! Domain layer: value objects, entities and the presence/typing/routing rules.
//!
//! Nothing in this layer performs I/O. Outbound delivery is expressed through
//! the [`MessagePusher`] port which the infrastructure layer implements.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod registry;
pub mod room;
pub mod router;
pub mod session;
pub mod typing;
pub mod value_object;

pub use entity::{Message, MessageKind, Participant};
pub use error::{RegistryError, RouteError, ValueObjectError};
pub use event::{ClientEvent, EventKind, OutboundEvent};
pub use message_pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use registry::ConnectionRegistry;
pub use room::ChatRoom;
pub use router::{MessageRouter, PrivateDelivery};
pub use session::SessionState;
pub use typing::TypingSet;
pub use value_object::{ConnectionId, ConnectionIdFactory, DisplayName, Timestamp};
