use crate::hub::HubHandle;
use crate::server::AppState;
use crate::signaling::{ConnectionLifecycle, WsConnection};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.hub))
}

async fn handle_socket(socket: WebSocket, hub: HubHandle) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut lifecycle = ConnectionLifecycle::new(hub);
    let peer_id = match lifecycle.open(Box::new(WsConnection::new(tx))).await {
        Ok(peer_id) => peer_id,
        Err(e) => {
            error!("Failed to register WebSocket connection: {}", e);
            return;
        }
    };
    info!("New WebSocket connection: {}", peer_id);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    lifecycle.on_frame(Bytes::from(text)).await;
                }
                Some(Ok(Message::Binary(data))) => lifecycle.on_frame(data).await,
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("WebSocket error for {}: {}", peer_id, e);
                    break;
                }
            },
            _ = &mut send_task => break,
        }
    }

    send_task.abort();
    lifecycle.close().await;
    info!("WebSocket disconnected: {}", peer_id);
}
