//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ClientEvent, ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::ClientEventDto,
    ui::state::AppState,
    usecase::{CoordinatorError, SessionCoordinator},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// Frames produced for this connection by any other connection's events arrive
/// through `rx`; this task is the only writer to the socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = state.coordinator.connect(connection_id.clone(), tx).await {
        tracing::warn!("Rejected connection '{}': {}", connection_id, e);
        return;
    }

    let (sender, receiver) = socket.split();

    // Spawn a task to deliver frames queued for this connection
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive events from this client, one at a time
    let (stop_tx, stop_rx) = oneshot::channel();
    let mut recv_task = tokio::spawn(read_loop(
        receiver,
        stop_rx,
        state.coordinator.clone(),
        connection_id.clone(),
    ));

    // Reader finished: abort the writer. Writer finished: stop the reader between frames.
    let writer_closed = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => true,
    };
    if writer_closed {
        let _ = stop_tx.send(());
        if let Err(e) = recv_task.await {
            tracing::warn!("Reader task for '{}' failed: {}", connection_id, e);
        }
    } else {
        send_task.abort();
    }

    if let Err(e) = state.coordinator.disconnect(&connection_id).await {
        tracing::debug!("Disconnect of '{}' ignored: {}", connection_id, e);
    }
}

/// Read frames and dispatch them in order until the client goes away or `stop_rx` fires.
///
/// The stop signal is only observed between frames, so a dispatch that already
/// started always delivers all of its notifications.
async fn read_loop<S>(
    mut receiver: S,
    mut stop_rx: oneshot::Receiver<()>,
    coordinator: Arc<SessionCoordinator>,
    client_id: ConnectionId,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let msg = tokio::select! {
            biased;
            _ = &mut stop_rx => {
                tracing::debug!("Writer for '{}' closed, stopping reader", client_id);
                break;
            }
            msg = receiver.next() => msg,
        };
        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error on '{}': {}", client_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                handle_text(&coordinator, &client_id, text.as_str()).await;
            }
            Message::Binary(data) => {
                tracing::debug!(
                    "Ignoring binary frame ({} bytes) from '{}'",
                    data.len(),
                    client_id
                );
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", client_id);
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
}

/// Parse one text frame and dispatch it. Malformed or out-of-order events degrade to no-ops.
async fn handle_text(coordinator: &SessionCoordinator, client_id: &ConnectionId, text: &str) {
    let dto = match serde_json::from_str::<ClientEventDto>(text) {
        Ok(dto) => dto,
        Err(e) => {
            tracing::warn!("Failed to parse event from '{}': {}", client_id, e);
            return;
        }
    };

    let event = match ClientEvent::try_from(dto) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Invalid event from '{}': {}", client_id, e);
            return;
        }
    };

    let kind = event.kind();
    match coordinator.dispatch(client_id, event).await {
        Ok(()) => {}
        Err(e @ CoordinatorError::RecipientNotFound(_)) => {
            // 宛先不明のプライベートメッセージは送信者に通知せず破棄する
            tracing::debug!("Dropped {:?} from '{}': {}", kind, client_id, e);
        }
        Err(e) => {
            tracing::warn!("Ignored {:?} from '{}': {}", kind, client_id, e);
        }
    }
}
