//! UseCase: セッションコーディネーター
//!
//! 接続・join・メッセージ送信・プライベートメッセージ・入力中通知・切断の
//! 各イベントを 1 つのロックで直列化して処理する。
//!
//! ## 処理の流れ
//!
//! 1. `ChatRoom` のロックを取得
//! 2. 接続の状態遷移（Anonymous / Active / Closed）を検証
//! 3. ドメインの状態を更新し、送信するイベントを組み立てる
//! 4. `MessagePusher` に渡す（unbounded チャンネルなのでブロックしない）
//!
//! 通知をロック中に渡すことで、名簿や入力中リストが更新順のまま全員に届く。

use std::sync::Arc;

use hearth_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ChatRoom, ClientEvent, ConnectionId, DisplayName, EventKind, Message, MessagePusher,
    MessageRouter, OutboundEvent, Participant, PusherChannel, SessionState, Timestamp,
};

use super::error::CoordinatorError;

/// プレゼンスとメッセージングのコーディネーター
pub struct SessionCoordinator {
    /// 名簿・入力中リスト・セッション状態（唯一の共有状態）
    room: Mutex<ChatRoom>,
    /// メッセージの組み立て
    router: MessageRouter,
    clock: Arc<dyn Clock>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SessionCoordinator {
    /// 新しい SessionCoordinator を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            room: Mutex::new(ChatRoom::new()),
            router: MessageRouter::new(clock.clone()),
            clock,
            message_pusher,
        }
    }

    /// 新しい接続を受け付ける（Anonymous 状態で開始）
    ///
    /// 送信チャンネルを登録し、接続自身の ID を `connected` イベントで通知する。
    pub async fn connect(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), CoordinatorError> {
        let mut room = self.room.lock().await;
        if !room.open_session(connection_id.clone()) {
            return Err(CoordinatorError::ConnectionAlreadyOpen(
                connection_id.into_string(),
            ));
        }

        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        tracing::info!(
            "Connection '{}' opened ({} open)",
            connection_id,
            room.open_connections()
        );

        let connected = OutboundEvent::Connected {
            id: connection_id.clone(),
        };
        self.deliver_to(&connection_id, &connected).await;
        Ok(())
    }

    /// クライアントイベントを対応するエントリポイントに振り分ける
    pub async fn dispatch(
        &self,
        connection_id: &ConnectionId,
        event: ClientEvent,
    ) -> Result<(), CoordinatorError> {
        match event {
            ClientEvent::Join { display_name } => {
                self.join(connection_id, &display_name).await.map(|_| ())
            }
            ClientEvent::SendMessage { body } => {
                self.send_message(connection_id, body).await.map(|_| ())
            }
            ClientEvent::PrivateMessage { to, body } => self
                .send_private(connection_id, &to, body)
                .await
                .map(|_| ()),
            ClientEvent::Typing { is_typing } => self
                .set_typing(connection_id, is_typing)
                .await
                .map(|_| ()),
        }
    }

    /// Anonymous --join--> Active
    ///
    /// 全員（本人を含む）に `user_list`、本人以外に `user_joined` を送る。
    pub async fn join(
        &self,
        connection_id: &ConnectionId,
        display_name: &str,
    ) -> Result<Participant, CoordinatorError> {
        let mut room = self.room.lock().await;
        check_transition(&room, connection_id, EventKind::Join)?;

        let name = DisplayName::new(display_name)
            .map_err(|e| CoordinatorError::InvalidDisplayName(e.to_string()))?;
        let participant = room.join(connection_id.clone(), name, self.now())?;
        tracing::info!("'{}' joined as '{}'", connection_id, participant.name);

        let roster = OutboundEvent::UserList(room.roster());
        self.deliver_all(&room.registry().connection_ids(), &roster)
            .await;

        let notice = self
            .router
            .system_notice(format!("{} joined the chat", participant.name));
        let joined = OutboundEvent::UserJoined {
            participant: participant.clone(),
            notice,
        };
        self.deliver_all(
            &room.registry().connection_ids_except(connection_id),
            &joined,
        )
        .await;

        Ok(participant)
    }

    /// Active --send_message--> Active
    ///
    /// 送信者を含む全員に `receive_message` を送る。
    pub async fn send_message(
        &self,
        connection_id: &ConnectionId,
        body: String,
    ) -> Result<Message, CoordinatorError> {
        let room = self.room.lock().await;
        check_transition(&room, connection_id, EventKind::SendMessage)?;

        let message = self.router.broadcast(room.registry(), connection_id, body);
        tracing::debug!(
            "Broadcasting message from '{}' to {} participants",
            message.sender_name(),
            room.registry().len()
        );

        let event = OutboundEvent::ReceiveMessage(message.clone());
        self.deliver_all(&room.registry().connection_ids(), &event)
            .await;
        Ok(message)
    }

    /// Active --private_message--> Active
    ///
    /// 宛先だけに `private_message` を送る。宛先が未登録なら何も送らず
    /// `RecipientNotFound` を返す。
    pub async fn send_private(
        &self,
        connection_id: &ConnectionId,
        recipient: &ConnectionId,
        body: String,
    ) -> Result<Message, CoordinatorError> {
        let room = self.room.lock().await;
        check_transition(&room, connection_id, EventKind::PrivateMessage)?;

        let delivery = self
            .router
            .send_private(room.registry(), connection_id, recipient, body)?;
        tracing::debug!(
            "Routing private message from '{}' to '{}'",
            connection_id,
            delivery.recipient
        );

        let event = OutboundEvent::PrivateMessage(delivery.message.clone());
        self.deliver_to(&delivery.recipient, &event).await;
        Ok(delivery.message)
    }

    /// Active --typing--> Active
    ///
    /// 更新後の入力中リスト全体を全員に `typing_users` で送る。
    pub async fn set_typing(
        &self,
        connection_id: &ConnectionId,
        is_typing: bool,
    ) -> Result<Vec<String>, CoordinatorError> {
        let mut room = self.room.lock().await;
        check_transition(&room, connection_id, EventKind::Typing)?;

        room.set_typing(connection_id, is_typing);
        let snapshot = room.typing_snapshot();

        let event = OutboundEvent::TypingUsers(snapshot.clone());
        self.deliver_all(&room.registry().connection_ids(), &event)
            .await;
        Ok(snapshot)
    }

    /// Anonymous | Active --disconnect--> Closed
    ///
    /// join 済みなら残りの参加者に `user_list` と `user_left` を送る。
    /// 切断した参加者が入力中だった場合は `typing_users` も送り直す。
    pub async fn disconnect(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<Participant>, CoordinatorError> {
        let mut room = self.room.lock().await;
        check_transition(&room, connection_id, EventKind::Disconnect)?;

        let was_typing = room.is_typing(connection_id);
        let departed = room.leave(connection_id);
        self.message_pusher.unregister_client(connection_id).await;

        let Some(participant) = departed else {
            tracing::info!("Connection '{}' closed before joining", connection_id);
            return Ok(None);
        };
        tracing::info!("'{}' ({}) left", participant.name, connection_id);

        let targets = room.registry().connection_ids();
        self.deliver_all(&targets, &OutboundEvent::UserList(room.roster()))
            .await;

        let notice = self
            .router
            .system_notice(format!("{} left the chat", participant.name));
        let left = OutboundEvent::UserLeft {
            participant: participant.clone(),
            notice,
        };
        self.deliver_all(&targets, &left).await;

        if was_typing {
            let typing = OutboundEvent::TypingUsers(room.typing_snapshot());
            self.deliver_all(&targets, &typing).await;
        }

        Ok(Some(participant))
    }

    /// 現在の名簿（join 順のスナップショット）
    pub async fn roster(&self) -> Vec<Participant> {
        self.room.lock().await.roster()
    }

    /// 現在の入力中リスト
    pub async fn typing_users(&self) -> Vec<String> {
        self.room.lock().await.typing_snapshot()
    }

    pub async fn session_state(&self, connection_id: &ConnectionId) -> SessionState {
        self.room.lock().await.session_state(connection_id)
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// 複数の宛先に送信（失敗はログに残して続行）
    async fn deliver_all(&self, targets: &[ConnectionId], event: &OutboundEvent) {
        if targets.is_empty() {
            return;
        }
        if let Err(e) = self.message_pusher.broadcast(targets, event).await {
            tracing::warn!("Failed to broadcast '{}': {}", event.name(), e);
        }
    }

    /// 1 つの宛先に送信（失敗はログに残して続行）
    async fn deliver_to(&self, target: &ConnectionId, event: &OutboundEvent) {
        if let Err(e) = self.message_pusher.push_to(target, event).await {
            tracing::warn!("Failed to push '{}' to '{}': {}", event.name(), target, e);
        }
    }
}

/// 現在の状態で `event` を受け付けられるか検証する
fn check_transition(
    room: &ChatRoom,
    connection_id: &ConnectionId,
    event: EventKind,
) -> Result<(), CoordinatorError> {
    let state = room.session_state(connection_id);
    if state.accepts(event) {
        return Ok(());
    }

    let id = connection_id.to_string();
    Err(match (state, event) {
        (SessionState::Closed, _) => CoordinatorError::ConnectionClosed(id),
        (SessionState::Active, EventKind::Join) => CoordinatorError::DuplicateRegistration(id),
        (SessionState::Anonymous, _) => CoordinatorError::NotJoined(id),
        (state, event) => CoordinatorError::UnexpectedEvent { event, state },
    })
}
