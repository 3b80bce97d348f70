//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ドメインの `OutboundEvent` を JSON フレームにシリアライズして送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信は unbounded チャンネルへの書き込みのみなので、呼び出し側をブロックしません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, OutboundEvent, PusherChannel},
    infrastructure::dto::websocket::ServerEventDto,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    /// イベントを 1 フレーム分の JSON に変換
    fn encode(event: &OutboundEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEventDto::from(event))
            .map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
        clients.insert(client_id, sender);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let Some(sender) = clients.get(client_id) else {
            return Err(MessagePushError::ClientNotFound(client_id.to_string()));
        };
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", event.name(), client_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            let Some(sender) = clients.get(target) else {
                tracing::warn!("Client '{}' not found during broadcast, skipping", target);
                continue;
            };
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(frame.clone()) {
                tracing::warn!("Failed to push '{}' to client '{}': {}", event.name(), target, e);
            } else {
                tracing::debug!("Broadcasted '{}' to client '{}'", event.name(), target);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定のクライアントへの送信（JSON フレーム）
    // - broadcast: 複数クライアントへの送信
    // - エラーハンドリング（存在しないクライアント、閉じたチャンネル）
    // ========================================

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn typing_event() -> OutboundEvent {
        OutboundEvent::TypingUsers(vec!["alice".to_string()])
    }

    const TYPING_FRAME: &str = r#"{"event":"typing_users","data":["alice"]}"#;

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントに JSON フレームを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(id("alice"), tx).await;

        // when (操作):
        let result = pusher.push_to(&id("alice"), &typing_event()).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some(TYPING_FRAME.to_string()));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();

        // when (操作):
        let result = pusher.push_to(&id("nonexistent"), &typing_event()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound("nonexistent".to_string()))
        );
    }

    #[tokio::test]
    async fn test_push_to_closed_channel() {
        // テスト項目: 受信側が閉じたチャンネルへの送信は PushFailed になる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register_client(id("alice"), tx).await;
        drop(rx);

        // when (操作):
        let result = pusher.push_to(&id("alice"), &typing_event()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_broadcast_isolates_failures() {
        // テスト項目: 一部の宛先が存在しない・閉じていても、他の宛先には届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx_alice, mut rx_alice) = mpsc::unbounded_channel();
        let (tx_bob, rx_bob) = mpsc::unbounded_channel();
        let (tx_carol, mut rx_carol) = mpsc::unbounded_channel();
        pusher.register_client(id("alice"), tx_alice).await;
        pusher.register_client(id("bob"), tx_bob).await;
        pusher.register_client(id("carol"), tx_carol).await;
        drop(rx_bob);

        // when (操作):
        let targets = vec![id("alice"), id("bob"), id("ghost"), id("carol")];
        let result = pusher.broadcast(&targets, &typing_event()).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx_alice.recv().await, Some(TYPING_FRAME.to_string()));
        assert_eq!(rx_carol.recv().await, Some(TYPING_FRAME.to_string()));
    }

    #[tokio::test]
    async fn test_unregistered_client_receives_nothing() {
        // テスト項目: 登録解除したクライアントには送信されない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(id("alice"), tx).await;

        // when (操作):
        pusher.unregister_client(&id("alice")).await;
        let result = pusher.broadcast(&[id("alice")], &typing_event()).await;

        // then (期待する結果):
        assert!(result.is_ok());
        // 送信側が破棄されたのでチャンネルは閉じている
        assert_eq!(rx.recv().await, None);
    }
}
