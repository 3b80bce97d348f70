//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::SessionCoordinator;

use super::{
    handler::{get_participants, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(coordinator);
/// server.run("127.0.0.1".to_string(), 5000).await?;
/// ```
pub struct Server {
    /// SessionCoordinator（プレゼンスとメッセージングのユースケース）
    coordinator: Arc<SessionCoordinator>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(coordinator: Arc<SessionCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Build the axum router with all endpoints.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            coordinator: self.coordinator.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/participants", get(get_participants))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the WebSocket chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 5000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Hearth presence server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
