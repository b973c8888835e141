use crate::error::LifecycleError;
use crate::hub::HubHandle;
use crate::routing::ConnectionHandle;
use bytes::Bytes;
use switchyard_core::PeerId;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// Per-connection state machine: `Connecting -> Open -> Closed`.
///
/// Transport glue calls [`open`](Self::open) once the socket is up, feeds
/// every inbound frame to [`on_frame`](Self::on_frame), and calls
/// [`close`](Self::close) on close or error. Cleanup reaches the hub at most
/// once no matter how often `close` is called.
pub struct ConnectionLifecycle {
    hub: HubHandle,
    state: ConnectionState,
    peer_id: Option<PeerId>,
}

impl ConnectionLifecycle {
    pub fn new(hub: HubHandle) -> Self {
        Self {
            hub,
            state: ConnectionState::Connecting,
            peer_id: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn peer_id(&self) -> Option<&PeerId> {
        self.peer_id.as_ref()
    }

    /// Registers the connection. The hub greets the client with its ID.
    pub async fn open(
        &mut self,
        connection: Box<dyn ConnectionHandle>,
    ) -> Result<PeerId, LifecycleError> {
        if self.state != ConnectionState::Connecting {
            return Err(LifecycleError::InvalidState(self.state));
        }

        match self.hub.open(connection).await {
            Ok(peer_id) => {
                self.state = ConnectionState::Open;
                self.peer_id = Some(peer_id.clone());
                Ok(peer_id)
            }
            Err(e) => {
                self.state = ConnectionState::Closed;
                Err(e.into())
            }
        }
    }

    pub async fn on_frame(&self, payload: Bytes) {
        let (ConnectionState::Open, Some(peer_id)) = (self.state, &self.peer_id) else {
            debug!("Ignoring frame on a connection in state {:?}", self.state);
            return;
        };

        if let Err(e) = self.hub.frame(peer_id.clone(), payload).await {
            error!("Failed to hand frame from {} to hub: {}", peer_id, e);
        }
    }

    pub async fn close(&mut self) {
        let previous = std::mem::replace(&mut self.state, ConnectionState::Closed);
        if previous != ConnectionState::Open {
            return;
        }

        let Some(peer_id) = self.peer_id.clone() else {
            return;
        };
        if let Err(e) = self.hub.close(peer_id.clone()).await {
            error!("Failed to clean up {}: {}", peer_id, e);
        }
    }
}
