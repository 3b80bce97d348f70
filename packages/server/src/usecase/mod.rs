//! UseCase 層
//!
//! トランスポートからのイベントを受け取り、ドメインの状態を更新して通知を送る。

mod error;
mod session_coordinator;

pub use error::CoordinatorError;
pub use session_coordinator::SessionCoordinator;
