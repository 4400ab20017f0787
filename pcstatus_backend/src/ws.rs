//! WebSocket upgrade for the memory stream; adapts axum's socket to the
//! session's connection seam.

use async_trait::async_trait;
use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use tracing::debug;

use crate::session::{self, Disconnected, StreamConn};
use crate::state::AppState;
use crate::types::StreamMessage;

pub async fn memory_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    debug!("memory stream connected");
    let cfg = state.settings.stream.clone();
    let mut conn = WsConn { socket };
    session::run(&mut conn, &state, &cfg).await;
}

struct WsConn {
    socket: WebSocket,
}

#[async_trait]
impl StreamConn for WsConn {
    async fn send(&mut self, msg: &StreamMessage) -> Result<(), Disconnected> {
        // Serialization of the wire enum cannot fail; skip rather than tear
        // down if it somehow does.
        let Ok(json) = serde_json::to_string(msg) else {
            return Ok(());
        };
        self.socket
            .send(Message::Text(json))
            .await
            .map_err(|_| Disconnected)
    }

    async fn close(&mut self, code: u16) {
        let frame = CloseFrame {
            code,
            reason: "".into(),
        };
        let _ = self.socket.send(Message::Close(Some(frame))).await;
    }
}
