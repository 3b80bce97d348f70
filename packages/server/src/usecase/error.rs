//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{EventKind, RegistryError, RouteError, SessionState};

/// セッションコーディネーターのエラー
///
/// どれもプロセスにとって致命的ではなく、UI 層はログに残して破棄する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    #[error("connection '{0}' is already open")]
    ConnectionAlreadyOpen(String),

    #[error("connection '{0}' is already registered")]
    DuplicateRegistration(String),

    #[error("invalid display name: {0}")]
    InvalidDisplayName(String),

    #[error("connection '{0}' has not joined yet")]
    NotJoined(String),

    #[error("connection '{0}' is closed")]
    ConnectionClosed(String),

    #[error("recipient '{0}' is not registered")]
    RecipientNotFound(String),

    #[error("event {event:?} is not accepted in state {state:?}")]
    UnexpectedEvent {
        event: EventKind,
        state: SessionState,
    },
}

impl From<RegistryError> for CoordinatorError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::DuplicateRegistration(id) => Self::DuplicateRegistration(id),
        }
    }
}

impl From<RouteError> for CoordinatorError {
    fn from(error: RouteError) -> Self {
        match error {
            RouteError::RecipientNotFound(id) => Self::RecipientNotFound(id),
        }
    }
}
