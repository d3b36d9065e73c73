//! `WebSocket` handler for the live tick stream.
//!
//! Clients connect to `GET /ws/ticks` and receive one JSON
//! [`TickBroadcast`](crate::state::TickBroadcast) per completed tick. A
//! client that falls behind skips to the newest tick.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade to a `WebSocket` and stream tick summaries.
pub async fn ws_ticks(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| stream_ticks(socket, state))
}

async fn stream_ticks(mut socket: WebSocket, state: Arc<AppState>) {
    let mut rx = state.subscribe();
    debug!("Tick stream client connected");

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Ok(tick) => {
                    let json = match serde_json::to_string(&tick) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(tick = tick.tick, "Failed to encode tick: {e}");
                            continue;
                        }
                    };
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        debug!("Tick stream client gone");
                        return;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Tick stream client lagged");
                }
                Err(RecvError::Closed) => return,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Ping(data))) => {
                    if socket.send(Message::Pong(data)).await.is_err() {
                        return;
                    }
                }
                Some(Ok(Message::Close(_)) | Err(_)) | None => {
                    debug!("Tick stream client disconnected");
                    return;
                }
                Some(Ok(_)) => {}
            },
        }
    }
}
