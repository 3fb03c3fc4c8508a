//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::PlayerId,
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
};

/// Answer to a frame that is not a known event
pub const MALFORMED_REQUEST: &str = "不正なリクエストです。";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the controller drops this connection's channel or the socket closes.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let player_id = PlayerId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = state.session.connect(player_id.clone(), tx).await {
        tracing::error!("Failed to seat player '{}': {}", player_id, e);
        return;
    }
    tracing::info!("Player '{}' connected", player_id);

    let (sender, mut receiver) = socket.split();

    let session = state.session.clone();
    let sender_id = player_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", sender_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let queued = match serde_json::from_str::<ClientMessage>(text.as_str()) {
                        Ok(message) => session.dispatch(sender_id.clone(), message.into()).await,
                        Err(e) => {
                            tracing::warn!("Malformed frame from '{}': {}", sender_id, e);
                            session
                                .reject(sender_id.clone(), MALFORMED_REQUEST.to_string())
                                .await
                        }
                    };
                    if queued.is_err() {
                        tracing::error!("Session controller is gone, closing '{}'", sender_id);
                        break;
                    }
                }
                Message::Ping(_) => {
                    tracing::trace!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Player '{}' requested close", sender_id);
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state.session.disconnect(player_id.clone()).await {
        Ok(()) => tracing::info!("Player '{}' disconnected", player_id),
        Err(e) => tracing::warn!("Failed to disconnect '{}': {}", player_id, e),
    }
}
