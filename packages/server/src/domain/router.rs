//! Message router: builds broadcast, private and system messages.

use std::sync::Arc;

use hearth_shared::time::Clock;

use super::{
    entity::{Message, MessageKind},
    error::RouteError,
    registry::ConnectionRegistry,
    value_object::{ConnectionId, Timestamp},
};

/// Sender name used when the sender is no longer registered.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Sender name of join/leave notices.
pub const SYSTEM_SENDER: &str = "System";

/// A private message together with the single connection it is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateDelivery {
    pub recipient: ConnectionId,
    pub message: Message,
}

pub struct MessageRouter {
    clock: Arc<dyn Clock>,
}

impl MessageRouter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Build a broadcast message from `sender`.
    ///
    /// The caller fans it out to every registered connection, the sender included.
    pub fn broadcast(
        &self,
        registry: &ConnectionRegistry,
        sender: &ConnectionId,
        body: String,
    ) -> Message {
        Message::new(
            sender_name(registry, sender),
            body,
            self.now(),
            MessageKind::Broadcast,
        )
    }

    /// Build a private message for `recipient`.
    ///
    /// No message is built when the recipient is not registered.
    pub fn send_private(
        &self,
        registry: &ConnectionRegistry,
        sender: &ConnectionId,
        recipient: &ConnectionId,
        body: String,
    ) -> Result<PrivateDelivery, RouteError> {
        if !registry.contains(recipient) {
            return Err(RouteError::RecipientNotFound(recipient.to_string()));
        }

        let message = Message::new(
            sender_name(registry, sender),
            body,
            self.now(),
            MessageKind::Private,
        );
        Ok(PrivateDelivery {
            recipient: recipient.clone(),
            message,
        })
    }

    pub fn system_notice(&self, text: String) -> Message {
        Message::new(
            SYSTEM_SENDER.to_string(),
            text,
            self.now(),
            MessageKind::System,
        )
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}

fn sender_name(registry: &ConnectionRegistry, sender: &ConnectionId) -> String {
    registry
        .find(sender)
        .map(|p| p.name.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_SENDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::DisplayName;
    use hearth_shared::time::FixedClock;

    const NOW: i64 = 1_700_000_000_000;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn setup() -> (MessageRouter, ConnectionRegistry) {
        let mut registry = ConnectionRegistry::new();
        registry
            .join(id("c1"), DisplayName::new("alice").unwrap(), Timestamp::new(0))
            .unwrap();
        registry
            .join(id("c2"), DisplayName::new("bob").unwrap(), Timestamp::new(0))
            .unwrap();
        (MessageRouter::new(Arc::new(FixedClock::new(NOW))), registry)
    }

    #[test]
    fn test_broadcast_resolves_sender_name() {
        // テスト項目: ブロードキャストは送信者名と現在時刻を持つ
        // given (前提条件):
        let (router, registry) = setup();

        // when (操作):
        let message = router.broadcast(&registry, &id("c1"), "hi".to_string());

        // then (期待する結果):
        assert_eq!(message.sender_name(), "alice");
        assert_eq!(message.body(), "hi");
        assert_eq!(message.kind(), MessageKind::Broadcast);
        assert_eq!(message.timestamp(), Timestamp::new(NOW));
    }

    #[test]
    fn test_broadcast_from_unregistered_sender_uses_unknown() {
        // テスト項目: 切断済みの送信者からのメッセージは "Unknown" になる
        // given (前提条件):
        let (router, registry) = setup();

        // when (操作):
        let message = router.broadcast(&registry, &id("gone"), "late".to_string());

        // then (期待する結果):
        assert_eq!(message.sender_name(), UNKNOWN_SENDER);
    }

    #[test]
    fn test_send_private_to_registered_recipient() {
        // テスト項目: 登録済みの宛先へのプライベートメッセージは宛先付きで作られる
        // given (前提条件):
        let (router, registry) = setup();

        // when (操作):
        let delivery = router
            .send_private(&registry, &id("c1"), &id("c2"), "secret".to_string())
            .unwrap();

        // then (期待する結果):
        assert_eq!(delivery.recipient, id("c2"));
        assert_eq!(delivery.message.sender_name(), "alice");
        assert_eq!(delivery.message.body(), "secret");
        assert_eq!(delivery.message.kind(), MessageKind::Private);
    }

    #[test]
    fn test_send_private_to_missing_recipient_is_not_found() {
        // テスト項目: 未登録の宛先には NotFound が返り、メッセージは作られない
        // given (前提条件):
        let (router, registry) = setup();

        // when (操作):
        let result = router.send_private(&registry, &id("c1"), &id("nobody"), "x".to_string());

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RouteError::RecipientNotFound("nobody".to_string()))
        );
    }

    #[test]
    fn test_system_notice() {
        // テスト項目: システム通知は System 送信者と system 種別を持つ
        // given (前提条件):
        let (router, _registry) = setup();

        // when (操作):
        let message = router.system_notice("alice joined the chat".to_string());

        // then (期待する結果):
        assert_eq!(message.sender_name(), SYSTEM_SENDER);
        assert_eq!(message.kind(), MessageKind::System);
        assert_eq!(message.timestamp(), Timestamp::new(NOW));
    }
}
