use crate::error::SendError;
use crate::routing::ConnectionHandle;
use axum::extract::ws::Message;
use tokio::sync::mpsc;

/// Registry-side handle of a WebSocket. Frames are queued on an unbounded
/// channel drained by the socket's writer task.
pub struct WsConnection {
    tx: mpsc::UnboundedSender<Message>,
}

impl WsConnection {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { tx }
    }
}

impl ConnectionHandle for WsConnection {
    fn send(&self, frame: &str) -> Result<(), SendError> {
        self.tx
            .send(Message::Text(frame.to_owned().into()))
            .map_err(|_| SendError::Closed)
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}
