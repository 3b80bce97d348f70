//! Conversion logic between DTOs and domain types.

use crate::domain::{
    ClientEvent, ConnectionId, Message, MessageKind, OutboundEvent, Participant,
    ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ClientEventDto> for ClientEvent {
    type Error = ValueObjectError;

    fn try_from(value: dto::ClientEventDto) -> Result<Self, Self::Error> {
        Ok(match value {
            dto::ClientEventDto::UserJoin(display_name) => Self::Join { display_name },
            dto::ClientEventDto::SendMessage(payload) => Self::SendMessage {
                body: payload.message,
            },
            dto::ClientEventDto::PrivateMessage(payload) => Self::PrivateMessage {
                to: ConnectionId::new(payload.to)?,
                body: payload.message,
            },
            dto::ClientEventDto::Typing(is_typing) => Self::Typing { is_typing },
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<MessageKind> for dto::MessageType {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Broadcast => Self::Broadcast,
            MessageKind::Private => Self::Private,
            MessageKind::System => Self::System,
        }
    }
}

impl From<&Message> for dto::ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            from: message.sender_name().to_string(),
            message: message.body().to_string(),
            timestamp: message.timestamp().to_rfc3339(),
            kind: message.kind().into(),
        }
    }
}

impl From<&Participant> for dto::ParticipantInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.as_str().to_string(),
            username: participant.name.as_str().to_string(),
        }
    }
}

impl From<&Participant> for http::ParticipantDetailDto {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.as_str().to_string(),
            username: participant.name.as_str().to_string(),
            joined_at: participant.joined_at.to_rfc3339(),
        }
    }
}

impl From<&OutboundEvent> for dto::ServerEventDto {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::Connected { id } => Self::Connected(dto::ConnectedPayload {
                id: id.as_str().to_string(),
            }),
            OutboundEvent::UserList(participants) => {
                Self::UserList(participants.iter().map(dto::ParticipantInfo::from).collect())
            }
            OutboundEvent::UserJoined {
                participant,
                notice,
            } => Self::UserJoined(dto::PresenceNotice {
                participant: participant.into(),
                notice: notice.into(),
            }),
            OutboundEvent::UserLeft {
                participant,
                notice,
            } => Self::UserLeft(dto::PresenceNotice {
                participant: participant.into(),
                notice: notice.into(),
            }),
            OutboundEvent::ReceiveMessage(message) => Self::ReceiveMessage(message.into()),
            OutboundEvent::PrivateMessage(message) => Self::PrivateMessage(message.into()),
            OutboundEvent::TypingUsers(names) => Self::TypingUsers(names.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Timestamp};

    fn participant(id: &str, name: &str) -> Participant {
        Participant::new(
            ConnectionId::new(id.to_string()).unwrap(),
            DisplayName::new(name).unwrap(),
            Timestamp::new(1672531200000),
        )
    }

    #[test]
    fn test_private_message_dto_to_domain() {
        // テスト項目: private_message の DTO がドメインイベントに変換される
        // given (前提条件):
        let dto_event = dto::ClientEventDto::PrivateMessage(dto::PrivateMessagePayload {
            to: "c2".to_string(),
            message: "secret".to_string(),
        });

        // when (操作):
        let event = ClientEvent::try_from(dto_event).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::PrivateMessage {
                to: ConnectionId::new("c2".to_string()).unwrap(),
                body: "secret".to_string(),
            }
        );
    }

    #[test]
    fn test_private_message_with_empty_recipient_is_rejected() {
        // テスト項目: 宛先が空の private_message は変換エラーになる
        // given (前提条件):
        let dto_event = dto::ClientEventDto::PrivateMessage(dto::PrivateMessagePayload {
            to: "".to_string(),
            message: "secret".to_string(),
        });

        // when (操作):
        let result = ClientEvent::try_from(dto_event);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::InvalidConnectionId));
    }

    #[test]
    fn test_message_to_dto() {
        // テスト項目: ドメインの Message が送信者名・本文・ISO 時刻・種別を持つ DTO になる
        // given (前提条件):
        let message = Message::new(
            "alice".to_string(),
            "hi".to_string(),
            Timestamp::new(1672531200000),
            MessageKind::Broadcast,
        );

        // when (操作):
        let dto_message = dto::ChatMessage::from(&message);

        // then (期待する結果):
        assert_eq!(dto_message.from, "alice");
        assert_eq!(dto_message.message, "hi");
        assert_eq!(dto_message.timestamp, "2023-01-01T00:00:00.000Z");
        assert_eq!(dto_message.kind, dto::MessageType::Broadcast);
    }

    #[test]
    fn test_user_list_to_dto() {
        // テスト項目: 名簿イベントが join 順の参加者 DTO リストになる
        // given (前提条件):
        let event = OutboundEvent::UserList(vec![participant("c1", "alice"), participant("c2", "bob")]);

        // when (操作):
        let dto_event = dto::ServerEventDto::from(&event);

        // then (期待する結果):
        assert_eq!(
            dto_event,
            dto::ServerEventDto::UserList(vec![
                dto::ParticipantInfo {
                    id: "c1".to_string(),
                    username: "alice".to_string()
                },
                dto::ParticipantInfo {
                    id: "c2".to_string(),
                    username: "bob".to_string()
                },
            ])
        );
    }

    #[test]
    fn test_participant_to_http_dto() {
        // テスト項目: HTTP 用の参加者 DTO に join 時刻が ISO 形式で入る
        // given (前提条件):
        let alice = participant("c1", "alice");

        // when (操作):
        let detail = http::ParticipantDetailDto::from(&alice);

        // then (期待する結果):
        assert_eq!(detail.id, "c1");
        assert_eq!(detail.username, "alice");
        assert_eq!(detail.joined_at, "2023-01-01T00:00:00.000Z");
    }
}
