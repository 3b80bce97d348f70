//! Server state.

use std::sync::Arc;

use crate::usecase::SessionCoordinator;

/// Shared application state
pub struct AppState {
    /// SessionCoordinator（プレゼンスとメッセージングのユースケース）
    pub coordinator: Arc<SessionCoordinator>,
}
