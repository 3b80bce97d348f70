//! MessagePusher trait 定義
//!
//! クライアントへの通知（push）のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::{event::OutboundEvent, value_object::ConnectionId};

/// 接続ごとの送信チャンネル（シリアライズ済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to serialize event: {0}")]
    Serialization(String),
}

/// クライアントへの通知を抽象化する trait
///
/// 送信はすべて fire-and-forget で、呼び出し側をブロックしてはならない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, client_id: &ConnectionId);

    /// 特定のクライアントにイベントを送信
    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントにイベントを送信
    ///
    /// 一部の宛先への送信失敗は他の宛先への送信を妨げない。
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;
}
